use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap_complete::{generate, Shell};
use clap::CommandFactory;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::browse::render::{render_company_grid, render_question_table};
use crate::browse::{
    CatalogClient, CompaniesPage, CompanyPage, DifficultyFilter, QuestionView, SheetSource,
};
use crate::catalog::{FsCatalog, Timeframe};
use crate::cli::Cli;
use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use crate::server;

/// Write a default configuration file
pub fn init(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_file = get_config_file(config_path)?;

    if config_file.exists() && !force {
        warn!("Configuration file already exists: {}", config_file.display());
        println!("Configuration already exists at {}", config_file.display());
        println!("   Use --force to overwrite it.");
        return Ok(());
    }

    if let Some(parent) = config_file.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&config_file, create_default_config())?;
    info!("Created default configuration: {}", config_file.display());

    println!("✅ Configuration written to {}", config_file.display());
    println!();
    println!("Next steps:");
    println!("   1. Point [server].data_root at your sheets directory");
    println!("   2. Start the server: dsa-sheets serve");

    Ok(())
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn serve(config: Config) -> Result<()> {
    server::start_server(config).await
}

/// Pick the data source: a running server when `remote` is given, the local
/// data root otherwise.
pub fn source_for(
    config: &Config,
    remote: Option<String>,
    data_root: Option<PathBuf>,
) -> Result<Arc<dyn SheetSource>> {
    if let Some(base_url) = remote {
        let mut client_config = config.client.clone();
        client_config.base_url = base_url;
        debug!("Using remote catalog at {}", client_config.base_url);
        return Ok(Arc::new(CatalogClient::new(&client_config)?));
    }

    let root = data_root.unwrap_or_else(|| config.server.data_root.clone());
    debug!("Using local catalog at {}", root.display());
    Ok(Arc::new(FsCatalog::new(root)))
}

/// Print the company grid, optionally narrowed by a search term
pub async fn list_companies(source: Arc<dyn SheetSource>, search: &str) -> Result<()> {
    let mut page = CompaniesPage::new(source);
    page.load().await;
    page.set_search(search);

    print!("{}", render_company_grid(&page.visible(), page.search()));
    Ok(())
}

/// Print one company's questions for a timeframe
pub async fn list_questions(
    source: Arc<dyn SheetSource>,
    company: String,
    timeframe: Timeframe,
    search: String,
    difficulty: DifficultyFilter,
) -> Result<()> {
    let page = CompanyPage::new(source, company);
    page.set_search(search);
    page.set_difficulty(difficulty);
    page.set_timeframe(timeframe).await;

    let view = page.snapshot();
    let rows = view.visible();
    let views: Vec<QuestionView<'_>> = rows
        .iter()
        .filter_map(|row| QuestionView::from_value(row))
        .collect();

    let color = io::stdout().is_terminal();
    print!(
        "{}",
        render_question_table(&view.company, view.timeframe, &views, view.loading, color)
    );
    Ok(())
}

/// Generate shell completion scripts
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Initialize the tracing subscriber. Flags win over the configured level;
/// `RUST_LOG` wins over both. The returned guard must be held while logging
/// to a file.
pub fn init_logging(
    debug: bool,
    verbose: bool,
    default_level: &str,
    logging: Option<&LoggingConfig>,
) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    let (writer, guard) = match logging.filter(|l| l.log_to_file) {
        Some(logging) => {
            let path = resolve_log_file(&logging.log_file)?;
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            fs::create_dir_all(dir)?;
            let file_name = path
                .file_name()
                .ok_or_else(|| Error::Config(format!("Invalid log file: {}", logging.log_file)))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(io::stderr), None),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(debug)
        .with_line_number(debug)
        .with_writer(writer);

    let result = if logging.map_or(false, |l| l.json_format) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        // already initialized, e.g. by another test
        debug!("Logging not re-initialized: {}", e);
    }

    debug!("Logging initialized");
    Ok(guard)
}

fn resolve_log_file(log_file: &str) -> Result<PathBuf> {
    let path = PathBuf::from(log_file);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(Config::config_dir()?.join(path))
    }
}

/// Get the configuration file path
fn get_config_file(config_path: Option<PathBuf>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path),
        None => Config::config_file(),
    }
}

/// Create default configuration content
fn create_default_config() -> String {
    format!(r#"# DSA Sheets Configuration File
# Generated on {}

[server]
# Address the HTTP server listens on
bind = "127.0.0.1:3000"

# Directory with one folder per company, each holding <timeframe>.csv files
data_root = "data"

# How long browsers may cache CORS preflight responses, in seconds
cors_max_age_secs = 3600

[client]
# Server used by `--remote` when no URL is given on the command line
base_url = "http://127.0.0.1:3000"

# Request timeout in seconds
timeout_secs = 30

[logging]
# Log level: error, warn, info, debug, trace
level = "info"

# Log to file instead of stderr
log_to_file = false

# Log file path (relative to config directory)
log_file = "logs/dsa-sheets.log"

# Emit JSON lines
json_format = false
"#,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}
