//! Webhook resource client

use crate::client::{ensure_status, log_unexpected, outcome_of, WebhookManager};
use crate::error::Result;
use crate::models::{parse_webhook_list, WebhookRecord};
use crate::outcome::Outcome;
use crate::routes::Operation;
use tracing::{debug, info, instrument, warn};

/// Message of the error outcome returned when there is nothing to verify
pub const NO_WEBHOOK_MESSAGE: &str = "No webhook for which to trigger CRC";

/// Discovery, registration, verification and removal of the environment's
/// webhook. Every call hits the API; nothing is cached between calls since
/// validity can change server-side.
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a> {
    manager: &'a WebhookManager,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(manager: &'a WebhookManager) -> Self {
        Self { manager }
    }

    /// List every webhook registered for the environment
    #[instrument(skip(self), fields(environment = %self.manager.environment()))]
    pub async fn list(&self) -> Result<Vec<WebhookRecord>> {
        let url = self.manager.endpoints().webhooks()?;
        let response = self.manager.send(Operation::ListWebhooks, url).await?;
        ensure_status(&response, Operation::ListWebhooks)?;

        let webhooks = parse_webhook_list(&response.body)?;
        debug!(count = webhooks.len(), "Listed webhooks");
        Ok(webhooks)
    }

    /// Return a webhook whose validity flag is set.
    ///
    /// Normally at most one exists. If several are valid, which one is
    /// returned is unspecified.
    pub async fn discover(&self) -> Result<Option<WebhookRecord>> {
        let webhook = self.list().await?.into_iter().find(|w| w.is_valid);

        match &webhook {
            Some(w) => debug!(webhook_id = w.id, "Discovered valid webhook"),
            None => debug!("No valid webhook registered"),
        }

        Ok(webhook)
    }

    /// Register `callback_url` as the environment's webhook.
    ///
    /// On failure the outcome carries the raw response body so the API's
    /// structured error detail is visible to the caller.
    #[instrument(skip(self), fields(environment = %self.manager.environment()))]
    pub async fn register(&self, callback_url: &str) -> Result<Outcome> {
        let url = self.manager.endpoints().register_webhook(callback_url)?;
        let response = self.manager.send(Operation::RegisterWebhook, url).await?;

        let outcome = Outcome::normalize_with_body(
            response.status,
            &response.reason,
            &response.body,
            Operation::RegisterWebhook.expected_status(),
        );
        log_unexpected(&outcome, Operation::RegisterWebhook);

        if outcome.is_success() {
            info!(callback_url = %callback_url, "Registered webhook");
        }
        Ok(outcome)
    }

    /// Trigger the challenge-response check for the discovered webhook
    #[instrument(skip(self), fields(environment = %self.manager.environment()))]
    pub async fn trigger_verification(&self) -> Result<Outcome> {
        let webhook = match self.discover().await? {
            Some(webhook) => webhook,
            None => {
                warn!("Cannot trigger CRC without a valid webhook");
                return Ok(Outcome::error_message(NO_WEBHOOK_MESSAGE));
            }
        };

        let url = self.manager.endpoints().webhook(webhook.id)?;
        let response = self
            .manager
            .send(Operation::TriggerVerification, url)
            .await?;

        Ok(outcome_of(&response, Operation::TriggerVerification))
    }

    /// Delete the discovered webhook. Removing nothing succeeds.
    #[instrument(skip(self), fields(environment = %self.manager.environment()))]
    pub async fn remove(&self) -> Result<Outcome> {
        let webhook = match self.discover().await? {
            Some(webhook) => webhook,
            None => return Ok(Outcome::OK),
        };

        let url = self.manager.endpoints().webhook(webhook.id)?;
        let response = self.manager.send(Operation::RemoveWebhook, url).await?;

        let outcome = outcome_of(&response, Operation::RemoveWebhook);
        if outcome.is_success() {
            info!(webhook_id = webhook.id, "Removed webhook");
        }
        Ok(outcome)
    }
}
