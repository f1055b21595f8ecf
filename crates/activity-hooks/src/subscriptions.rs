//! Subscription resource client

use crate::client::{ensure_status, outcome_of, WebhookManager};
use crate::error::Result;
use crate::models::{parse_subscription_list, SubscriptionSet};
use crate::outcome::Outcome;
use crate::routes::Operation;
use futures::future::join_all;
use tracing::{debug, info, instrument};

/// Registration and removal of user subscriptions
#[derive(Debug, Clone, Copy)]
pub struct Subscriptions<'a> {
    manager: &'a WebhookManager,
}

impl<'a> Subscriptions<'a> {
    pub(crate) fn new(manager: &'a WebhookManager) -> Self {
        Self { manager }
    }

    /// Subscribe the user the signing keys belong to
    #[instrument(skip(self), fields(environment = %self.manager.environment()))]
    pub async fn register_current_caller(&self) -> Result<Outcome> {
        let url = self.manager.endpoints().subscriptions()?;
        let response = self
            .manager
            .send(Operation::RegisterSubscription, url)
            .await?;

        Ok(outcome_of(&response, Operation::RegisterSubscription))
    }

    /// List the users subscribed to the environment
    #[instrument(skip(self), fields(environment = %self.manager.environment()))]
    pub async fn list(&self) -> Result<SubscriptionSet> {
        let url = self.manager.endpoints().subscription_list()?;
        let response = self.manager.send(Operation::ListSubscriptions, url).await?;
        ensure_status(&response, Operation::ListSubscriptions)?;

        let subscriptions = parse_subscription_list(&response.body)?;
        debug!(count = subscriptions.user_ids.len(), "Listed subscriptions");
        Ok(subscriptions)
    }

    /// Unsubscribe one user
    #[instrument(skip(self), fields(environment = %self.manager.environment()))]
    pub async fn unregister(&self, user_id: u64) -> Result<Outcome> {
        let url = self.manager.endpoints().subscription(user_id)?;
        let response = self.manager.send(Operation::UnregisterUser, url).await?;

        Ok(outcome_of(&response, Operation::UnregisterUser))
    }

    /// Unsubscribe every listed user.
    ///
    /// All removals run concurrently and every one is awaited, whatever the
    /// others return. The result is [`Outcome::OK`] only if all succeeded;
    /// otherwise an error outcome without per-user detail. A transport
    /// failure in any removal is returned after all of them completed.
    #[instrument(skip(self), fields(environment = %self.manager.environment()))]
    pub async fn unregister_all(&self) -> Result<Outcome> {
        let subscriptions = self.list().await?;
        let total = subscriptions.user_ids.len();

        let results = join_all(
            subscriptions
                .user_ids
                .iter()
                .map(|user_id| self.unregister(*user_id)),
        )
        .await;

        let outcomes = results.into_iter().collect::<Result<Vec<_>>>()?;
        let failed = outcomes.iter().filter(|o| o.is_error()).count();

        info!(total, failed, "Unregistered subscriptions");
        Ok(Outcome::all(outcomes))
    }
}
