//! CLI module for the font license gateway
//!
//! - `serve`: run the HTTP gateway (default)
//! - `check-config`: validate and print the effective configuration

pub mod check_config;
pub mod serve;

use clap::{Parser, Subcommand};

/// Font license gateway - serves licensed font stylesheets to API key holders
#[derive(Parser)]
#[command(name = "font-license-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP gateway
    Serve,

    /// Load the configuration, validate it and print the effective values
    CheckConfig,
}
