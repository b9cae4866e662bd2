pub mod browse;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
