pub mod commands;

use clap::{Parser, Subcommand};
use crate::browse::DifficultyFilter;
use crate::catalog::Timeframe;
use crate::config::Config;
use crate::error::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dsa-sheets")]
#[command(about = "Company-wise interview question sheets")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Serve the catalog over HTTP
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:3000
        #[arg(short, long)]
        bind: Option<String>,

        /// Directory holding one folder per company
        #[arg(long)]
        data_root: Option<PathBuf>,
    },

    /// List companies
    Companies {
        /// Case-insensitive search term
        #[arg(short, long, default_value = "")]
        search: String,

        /// Query a running server instead of the local data root
        #[arg(long, value_name = "URL")]
        remote: Option<String>,

        /// Directory holding one folder per company
        #[arg(long)]
        data_root: Option<PathBuf>,
    },

    /// Show a company's questions
    Questions {
        /// Company directory name
        company: String,

        /// all, six-months, three-months, thirty-days or more-than-six-months
        #[arg(short, long, default_value = "six-months")]
        timeframe: Timeframe,

        /// Case-insensitive title search
        #[arg(short, long, default_value = "")]
        search: String,

        /// all, Easy, Medium or Hard
        #[arg(long, default_value = "all")]
        difficulty: DifficultyFilter,

        /// Query a running server instead of the local data root
        #[arg(long, value_name = "URL")]
        remote: Option<String>,

        /// Directory holding one folder per company
        #[arg(long)]
        data_root: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Commands::Init { force } = self.command {
            commands::init_logging(self.debug, self.verbose, "warn", None)?;
            return commands::init(self.config, force);
        }
        if let Commands::Completions { shell } = &self.command {
            commands::generate_completions(*shell);
            return Ok(());
        }

        let mut config = Config::resolve(self.config.as_deref())?;

        let default_level = match self.command {
            Commands::Serve { .. } => config.logging.level.clone(),
            _ => "warn".to_string(),
        };
        let _guard = commands::init_logging(
            self.debug,
            self.verbose,
            &default_level,
            Some(&config.logging),
        )?;

        match self.command {
            Commands::Serve { bind, data_root } => {
                if let Some(bind) = bind {
                    config.server.bind = bind;
                }
                if let Some(root) = data_root {
                    config.server.data_root = root;
                }
                config.validate()?;
                commands::serve(config).await
            }
            Commands::Companies { search, remote, data_root } => {
                let source = commands::source_for(&config, remote, data_root)?;
                commands::list_companies(source, &search).await
            }
            Commands::Questions { company, timeframe, search, difficulty, remote, data_root } => {
                let source = commands::source_for(&config, remote, data_root)?;
                commands::list_questions(source, company, timeframe, search, difficulty).await
            }
            Commands::Init { .. } | Commands::Completions { .. } => Ok(()),
        }
    }
}
