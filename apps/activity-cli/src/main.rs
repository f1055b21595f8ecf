//! Account activity webhook CLI
//!
//! Registers, verifies and removes the webhook of an environment and manages
//! the users subscribed to it.

mod commands;
mod output;
mod telemetry;

use activity_hooks::{ManagerConfig, WebhookManager};
use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use output::OutputFormat;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "activity-hooks",
    author = "Activity Hooks Team",
    version,
    about = "Manage account activity webhooks and subscriptions",
    long_about = "Manage the webhook registered for an account activity environment\n\
                  and the users subscribed to it.\n\n\
                  Credentials are read from a TOML file (--config) and/or\n\
                  ACTIVITY__* environment variables, e.g. ACTIVITY__ENVIRONMENT\n\
                  or ACTIVITY__CREDENTIALS__CONSUMER_KEY."
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "ACTIVITY_CONFIG")]
    config: Option<String>,

    /// Override the configured environment name
    #[arg(short, long)]
    environment: Option<String>,

    /// Output format (text, json)
    #[arg(
        short,
        long,
        default_value = "text",
        value_parser = ["text", "json"]
    )]
    format: String,

    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, env = "ACTIVITY_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "ACTIVITY_JSON_LOGS")]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the environment's webhook
    #[command(subcommand)]
    Webhook(WebhookCommands),

    /// Manage user subscriptions
    #[command(subcommand)]
    Subscription(SubscriptionCommands),
}

#[derive(Subcommand)]
enum WebhookCommands {
    /// List registered webhooks and show the valid one
    Show,
    /// Register a callback URL as the webhook
    Register {
        /// Public HTTPS callback URL
        url: String,
    },
    /// Trigger a challenge-response check of the valid webhook
    Verify,
    /// Remove the valid webhook, if any
    Remove,
}

#[derive(Subcommand)]
enum SubscriptionCommands {
    /// Subscribe the user owning the access token
    Add,
    /// List subscribed users
    List,
    /// Unsubscribe one user
    Remove {
        /// Numeric user id
        user_id: u64,
    },
    /// Unsubscribe every user
    RemoveAll,
}

fn load_manager(cli: &Cli) -> anyhow::Result<WebhookManager> {
    let mut config = match cli.config.as_deref() {
        Some(path) => ManagerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => ManagerConfig::load().context("Failed to load configuration from environment")?,
    };

    if let Some(environment) = &cli.environment {
        config.environment = environment.clone();
    }

    WebhookManager::from_config(&config).context("Failed to create webhook manager")
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = telemetry::init_telemetry(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        return ExitCode::FAILURE;
    }

    // value_parser restricts the flag to known formats
    let format: OutputFormat = cli.format.parse().unwrap_or(OutputFormat::Text);

    let result = match load_manager(&cli) {
        Ok(manager) => match &cli.command {
            Commands::Webhook(cmd) => commands::webhook::run(&manager, cmd, format).await,
            Commands::Subscription(cmd) => {
                commands::subscription::run(&manager, cmd, format).await
            }
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) if outcome.is_error() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            if cli.verbose {
                for cause in e.chain().skip(1) {
                    eprintln!("{}: {}", "Caused by".yellow(), cause);
                }
            }
            ExitCode::FAILURE
        }
    }
}
