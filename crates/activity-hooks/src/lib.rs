//! # Activity Hooks
//!
//! Lifecycle management for an account activity webhook and the user
//! subscriptions attached to it.
//!
//! Write operations on the webhook are OAuth 1.0a signed per request; reads,
//! listings and per-user unsubscription use an application bearer token that
//! is exchanged once and cached for the lifetime of the manager.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use activity_hooks::{SigningIdentity, WebhookManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = WebhookManager::builder()
//!         .environment("dev")
//!         .identity(SigningIdentity::new(
//!             "consumer-key",
//!             "consumer-secret",
//!             "access-token",
//!             "access-token-secret",
//!         ))
//!         .build()?;
//!
//!     // Replace whatever webhook is registered
//!     manager.remove_webhook().await?;
//!     let outcome = manager.register_webhook("https://example.com/webhook").await?;
//!     println!("{}", outcome);
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod models;
mod outcome;
mod routes;
mod subscriptions;
mod transport;
mod webhooks;

pub use auth::{
    Authorization, BearerCredential, BearerTokenProvider, Credentials, RequestSigner,
    SigningIdentity,
};
pub use client::{WebhookManager, WebhookManagerBuilder, DEFAULT_BASE_URL};
pub use self::config::{ManagerConfig, ENV_PREFIX};
pub use error::{ActivityError, Result};
pub use models::{parse_subscription_list, parse_webhook_list, SubscriptionSet, WebhookRecord};
pub use outcome::Outcome;
pub use routes::{AuthScheme, Endpoints, Operation};
pub use subscriptions::Subscriptions;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use webhooks::{Webhooks, NO_WEBHOOK_MESSAGE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
