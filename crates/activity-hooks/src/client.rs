//! Lifecycle manager facade

use crate::auth::{Authorization, BearerTokenProvider, Credentials, RequestSigner, SigningIdentity};
use crate::config::ManagerConfig;
use crate::error::{ActivityError, Result};
use crate::models::{SubscriptionSet, WebhookRecord};
use crate::outcome::Outcome;
use crate::routes::{Endpoints, Operation};
use crate::subscriptions::Subscriptions;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::webhooks::Webhooks;
use reqwest::header;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// Manages the webhook and subscriptions of one environment.
///
/// Owns the signing identity and the bearer token cache. The cache is per
/// instance: managers for different environments never share a token.
pub struct WebhookManager {
    transport: Arc<dyn HttpTransport>,
    endpoints: Endpoints,
    credentials: Credentials,
}

impl std::fmt::Debug for WebhookManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookManager")
            .field("base_url", &self.endpoints.base_url().as_str())
            .field("environment", &self.endpoints.environment())
            .field("consumer_key", &self.credentials.signer().identity().consumer_key)
            .field("bearer_cached", &self.credentials.bearer().is_cached())
            .finish()
    }
}

/// Builder for creating a WebhookManager
#[derive(Default)]
pub struct WebhookManagerBuilder {
    base_url: Option<String>,
    environment: Option<String>,
    identity: Option<SigningIdentity>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl WebhookManagerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for the API
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the environment every endpoint targets
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Set the long-lived signing keys
    pub fn identity(mut self, identity: SigningIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Set the request timeout of the default transport
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent for the default transport
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use a custom transport instead of reqwest
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the manager
    pub fn build(self) -> Result<WebhookManager> {
        let environment = self
            .environment
            .filter(|env| !env.trim().is_empty())
            .ok_or_else(|| ActivityError::Config("environment is required".to_string()))?;

        let identity = self
            .identity
            .ok_or_else(|| ActivityError::Config("signing identity is required".to_string()))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let user_agent = self
                    .user_agent
                    .unwrap_or_else(|| format!("activity-hooks/{}", env!("CARGO_PKG_VERSION")));
                Arc::new(ReqwestTransport::new(self.timeout, &user_agent)?)
            }
        };

        let endpoints = Endpoints::new(base_url, environment);
        let bearer = BearerTokenProvider::new(
            endpoints.token()?,
            identity.consumer_key.clone(),
            identity.consumer_secret.clone(),
        );
        let credentials = Credentials::new(RequestSigner::new(identity), bearer);

        Ok(WebhookManager {
            transport,
            endpoints,
            credentials,
        })
    }
}

impl WebhookManager {
    /// Create a new manager builder
    pub fn builder() -> WebhookManagerBuilder {
        WebhookManagerBuilder::new()
    }

    /// Create a manager from loaded configuration
    pub fn from_config(config: &ManagerConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .base_url(config.base_url.clone())
            .environment(config.environment.clone())
            .identity(config.credentials.clone());

        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        builder.build()
    }

    /// Get the environment name
    pub fn environment(&self) -> &str {
        self.endpoints.environment()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        self.endpoints.base_url()
    }

    pub(crate) fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Webhook resource client
    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self)
    }

    /// Subscription resource client
    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    /// Authorize and execute one request for an operation
    pub(crate) async fn send(&self, operation: Operation, url: Url) -> Result<HttpResponse> {
        let method = operation.method();
        let authorization = Authorization::for_scheme(operation.auth_scheme(), &method, &url);
        let auth_header = self
            .credentials
            .header(authorization, self.transport.as_ref())
            .await?;

        let request = HttpRequest::new(method, url).header(header::AUTHORIZATION, auth_header);
        self.transport.execute(request).await
    }

    // ===== Webhook API =====

    /// List all webhooks registered for the environment
    pub async fn list_webhooks(&self) -> Result<Vec<WebhookRecord>> {
        self.webhooks().list().await
    }

    /// Find a valid webhook, if any
    pub async fn discover(&self) -> Result<Option<WebhookRecord>> {
        self.webhooks().discover().await
    }

    /// Register a callback URL as the environment's webhook
    pub async fn register_webhook(&self, callback_url: &str) -> Result<Outcome> {
        self.webhooks().register(callback_url).await
    }

    /// Ask the API to re-run the challenge-response check
    pub async fn trigger_verification(&self) -> Result<Outcome> {
        self.webhooks().trigger_verification().await
    }

    /// Remove the environment's webhook
    pub async fn remove_webhook(&self) -> Result<Outcome> {
        self.webhooks().remove().await
    }

    // ===== Subscription API =====

    /// Subscribe the signing user
    pub async fn register_current_caller(&self) -> Result<Outcome> {
        self.subscriptions().register_current_caller().await
    }

    /// List subscribed users
    pub async fn list_subscriptions(&self) -> Result<SubscriptionSet> {
        self.subscriptions().list().await
    }

    /// Unsubscribe one user
    pub async fn unregister(&self, user_id: u64) -> Result<Outcome> {
        self.subscriptions().unregister(user_id).await
    }

    /// Unsubscribe every user
    pub async fn unregister_all(&self) -> Result<Outcome> {
        self.subscriptions().unregister_all().await
    }
}

/// Fail unless a listing call returned its documented status
pub(crate) fn ensure_status(response: &HttpResponse, operation: Operation) -> Result<()> {
    if response.status == operation.expected_status() {
        Ok(())
    } else {
        Err(ActivityError::Api {
            status: response.status,
            message: response.body.clone(),
        })
    }
}

/// Normalize a response against the operation's expected status
pub(crate) fn outcome_of(response: &HttpResponse, operation: Operation) -> Outcome {
    let outcome = Outcome::normalize(response.status, &response.reason, operation.expected_status());
    log_unexpected(&outcome, operation);
    outcome
}

pub(crate) fn log_unexpected(outcome: &Outcome, operation: Operation) {
    if outcome.is_error() {
        warn!(
            operation = ?operation,
            status = ?outcome.status_code(),
            message = outcome.message().unwrap_or_default(),
            "Unexpected response status"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> SigningIdentity {
        SigningIdentity::new("ck", "cs", "at", "ats")
    }

    #[test]
    fn test_builder() {
        let manager = WebhookManager::builder()
            .base_url("http://localhost:8080")
            .environment("dev")
            .identity(identity())
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(manager.base_url().as_str(), "http://localhost:8080/");
        assert_eq!(manager.environment(), "dev");
    }

    #[test]
    fn test_builder_defaults_to_production_host() {
        let manager = WebhookManager::builder()
            .environment("dev")
            .identity(identity())
            .build()
            .unwrap();

        assert_eq!(manager.base_url().as_str(), "https://api.twitter.com/");
    }

    #[test]
    fn test_builder_requires_environment() {
        let err = WebhookManager::builder()
            .identity(identity())
            .build()
            .unwrap_err();
        assert!(matches!(err, ActivityError::Config(_)));

        let err = WebhookManager::builder()
            .environment("  ")
            .identity(identity())
            .build()
            .unwrap_err();
        assert!(matches!(err, ActivityError::Config(_)));
    }

    #[test]
    fn test_builder_requires_identity() {
        let err = WebhookManager::builder().environment("dev").build().unwrap_err();
        assert!(matches!(err, ActivityError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let manager = WebhookManager::builder()
            .environment("dev")
            .identity(SigningIdentity::new("ck", "consumer-secret", "at", "token-secret"))
            .build()
            .unwrap();

        let debug = format!("{:?}", manager);
        assert!(debug.contains("dev"));
        assert!(!debug.contains("consumer-secret"));
        assert!(!debug.contains("token-secret"));
    }

    #[test]
    fn test_ensure_status() {
        let ok = HttpResponse::new(200, "[]");
        assert!(ensure_status(&ok, Operation::ListWebhooks).is_ok());

        let denied = HttpResponse::new(401, "denied");
        let err = ensure_status(&denied, Operation::ListWebhooks).unwrap_err();
        assert_eq!(err.status_code(), Some(401));
    }
}
