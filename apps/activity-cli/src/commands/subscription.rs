//! Subscription management commands

use crate::output::{self, OutputFormat};
use crate::SubscriptionCommands;
use activity_hooks::{Outcome, WebhookManager};
use anyhow::Result;

pub async fn run(
    manager: &WebhookManager,
    cmd: &SubscriptionCommands,
    format: OutputFormat,
) -> Result<Outcome> {
    let outcome = match cmd {
        SubscriptionCommands::List => return list_subscriptions(manager, format).await,
        SubscriptionCommands::Add => manager.register_current_caller().await?,
        SubscriptionCommands::Remove { user_id } => manager.unregister(*user_id).await?,
        SubscriptionCommands::RemoveAll => manager.unregister_all().await?,
    };

    output::outcome(&outcome, format)?;
    Ok(outcome)
}

async fn list_subscriptions(manager: &WebhookManager, format: OutputFormat) -> Result<Outcome> {
    let subscriptions = manager.list_subscriptions().await?;

    match format {
        OutputFormat::Json => println!("{}", output::to_json(&subscriptions)?),
        OutputFormat::Text => {
            output::key_value("Environment", &subscriptions.environment_name);
            output::key_value("Application", &subscriptions.application_id);

            if subscriptions.user_ids.is_empty() {
                output::dimmed("No subscribed users.");
            }
            for (index, user_id) in subscriptions.user_ids.iter().enumerate() {
                output::list_item(index + 1, &user_id.to_string());
            }
        }
    }

    Ok(Outcome::OK)
}
