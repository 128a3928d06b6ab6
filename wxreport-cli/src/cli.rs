use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use std::{fs, sync::Arc};
use wxreport_core::{AccountStore, Config, ReportComposer};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxreport", version, about = "City weather reporter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key used by the report engine.
    Configure,

    /// Create a new local account.
    Register,

    /// Log in and generate a weather report for a city.
    Report {
        /// City name, e.g. "London" or "new york".
        city: String,
    },

    /// Print all previously generated reports.
    Log,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        init_tracing(&config)?;

        match self.command {
            Command::Configure => configure(config),
            Command::Register => register(&config),
            Command::Report { city } => report(&config, &city).await,
            Command::Log => view_log(&config),
        }
    }
}

/// Route tracing events to the operational log file, appending.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let path = config.log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    config.set_api_key(api_key);
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn register(config: &Config) -> anyhow::Result<()> {
    let mut store = AccountStore::load(config.users_file_path()?)?;

    let username = Text::new("New username:").prompt()?;
    let password = Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;

    store.register(username.trim(), &password)?;
    println!("Account created successfully!");
    Ok(())
}

async fn report(config: &Config, city: &str) -> anyhow::Result<()> {
    let store = AccountStore::load(config.users_file_path()?)?;

    let username = Text::new("Username:").prompt()?;
    let password = Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let username = username.trim();
    if !store.verify(username, &password) {
        anyhow::bail!("Invalid username or password.");
    }
    println!("Welcome, {username}!");

    let composer = ReportComposer::from_config(config)?;
    let report = composer.compose(city).await?;
    println!("{report}");

    Ok(())
}

fn view_log(config: &Config) -> anyhow::Result<()> {
    let path = config.report_file_path()?;
    if !path.exists() {
        println!("No weather reports found.");
        return Ok(());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read report file: {}", path.display()))?;
    print!("{contents}");

    Ok(())
}
