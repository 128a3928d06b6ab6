//! Binary crate for the `wxreport` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive login / registration / configuration prompts
//! - Human-friendly output formatting

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
