//! CLI for the mortality tables API

pub mod serve;

use clap::{Parser, Subcommand};

/// Tábua API - mortality tables and projections over HTTP
#[derive(Parser)]
#[command(name = "tabua-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
