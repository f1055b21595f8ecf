//! Webhook lifecycle commands

use crate::output::{self, OutputFormat};
use crate::WebhookCommands;
use activity_hooks::{Outcome, WebhookManager};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;

pub async fn run(
    manager: &WebhookManager,
    cmd: &WebhookCommands,
    format: OutputFormat,
) -> Result<Outcome> {
    match cmd {
        WebhookCommands::Show => show_webhooks(manager, format).await,
        WebhookCommands::Register { url } => {
            let outcome = manager.register_webhook(url).await?;
            output::outcome(&outcome, format)?;
            Ok(outcome)
        }
        WebhookCommands::Verify => {
            let outcome = manager.trigger_verification().await?;
            output::outcome(&outcome, format)?;
            Ok(outcome)
        }
        WebhookCommands::Remove => {
            let outcome = manager.remove_webhook().await?;
            output::outcome(&outcome, format)?;
            Ok(outcome)
        }
    }
}

async fn show_webhooks(manager: &WebhookManager, format: OutputFormat) -> Result<Outcome> {
    let webhooks = manager.list_webhooks().await?;
    let valid = webhooks.iter().find(|w| w.is_valid);

    match format {
        OutputFormat::Json => {
            let report = json!({
                "environment": manager.environment(),
                "webhooks": webhooks,
                "valid": valid,
            });
            println!("{}", output::to_json(&report)?);
        }
        OutputFormat::Text => {
            output::key_value("Environment", manager.environment());

            if webhooks.is_empty() {
                output::dimmed("No webhooks registered.");
                return Ok(Outcome::OK);
            }

            for (index, webhook) in webhooks.iter().enumerate() {
                let state = if webhook.is_valid {
                    "valid".green()
                } else {
                    "invalid".red()
                };
                output::list_item(index + 1, &format!("{} ({})", webhook.id, state));
            }
        }
    }

    Ok(Outcome::OK)
}
