use std::process;
use clap::Parser;

use dsa_sheets::cli::Cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = cli.run().await {
        eprintln!("Error [{}]: {}", e.error_code(), e);
        // 2 for bad input, 1 for everything else
        process::exit(if e.is_user_error() { 2 } else { 1 });
    }
}
