//! Endpoint layout and per-operation request policy

use crate::error::Result;
use reqwest::Method;
use url::Url;

/// Authorization scheme an operation is sent with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// OAuth 1.0a signature over the exact method and URL
    Signed,
    /// Cached application bearer token
    Bearer,
}

/// Remote operations driven by the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListWebhooks,
    RegisterWebhook,
    TriggerVerification,
    RemoveWebhook,
    RegisterSubscription,
    ListSubscriptions,
    UnregisterUser,
}

impl Operation {
    pub fn method(self) -> Method {
        match self {
            Operation::ListWebhooks | Operation::ListSubscriptions => Method::GET,
            Operation::RegisterWebhook | Operation::RegisterSubscription => Method::POST,
            Operation::TriggerVerification => Method::PUT,
            Operation::RemoveWebhook | Operation::UnregisterUser => Method::DELETE,
        }
    }

    /// Write operations need user context; reads and per-user deletes use
    /// the application token.
    pub const fn auth_scheme(self) -> AuthScheme {
        match self {
            Operation::RegisterWebhook
            | Operation::TriggerVerification
            | Operation::RemoveWebhook
            | Operation::RegisterSubscription => AuthScheme::Signed,
            Operation::ListWebhooks
            | Operation::ListSubscriptions
            | Operation::UnregisterUser => AuthScheme::Bearer,
        }
    }

    pub const fn expected_status(self) -> u16 {
        match self {
            Operation::ListWebhooks | Operation::ListSubscriptions | Operation::RegisterWebhook => {
                200
            }
            Operation::TriggerVerification
            | Operation::RemoveWebhook
            | Operation::RegisterSubscription
            | Operation::UnregisterUser => 204,
        }
    }
}

/// URL builder for one environment
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: Url,
    environment: String,
}

impl Endpoints {
    /// A path on `base_url` is kept as a prefix of every endpoint.
    pub fn new(mut base_url: Url, environment: impl Into<String>) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            base_url,
            environment: environment.into(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Resolve a path relative to the base URL
    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn environment_path(&self, suffix: &str) -> String {
        format!(
            "1.1/account_activity/all/{}/{}",
            urlencoding::encode(&self.environment),
            suffix
        )
    }

    pub fn token(&self) -> Result<Url> {
        self.url("oauth2/token")
    }

    pub fn webhooks(&self) -> Result<Url> {
        self.url(&self.environment_path("webhooks.json"))
    }

    pub fn register_webhook(&self, callback_url: &str) -> Result<Url> {
        let mut url = self.webhooks()?;
        url.query_pairs_mut().append_pair("url", callback_url);
        Ok(url)
    }

    pub fn webhook(&self, id: u64) -> Result<Url> {
        self.url(&self.environment_path(&format!("webhooks/{}.json", id)))
    }

    pub fn subscriptions(&self) -> Result<Url> {
        self.url(&self.environment_path("subscriptions.json"))
    }

    pub fn subscription_list(&self) -> Result<Url> {
        self.url(&self.environment_path("subscriptions/list.json"))
    }

    pub fn subscription(&self, user_id: u64) -> Result<Url> {
        self.url(&self.environment_path(&format!("subscriptions/{}.json", user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new(Url::parse("https://api.twitter.com").unwrap(), "dev")
    }

    #[test]
    fn test_webhook_urls() {
        let endpoints = endpoints();
        assert_eq!(
            endpoints.webhooks().unwrap().as_str(),
            "https://api.twitter.com/1.1/account_activity/all/dev/webhooks.json"
        );
        assert_eq!(
            endpoints.webhook(42).unwrap().as_str(),
            "https://api.twitter.com/1.1/account_activity/all/dev/webhooks/42.json"
        );
    }

    #[test]
    fn test_register_url_encodes_callback() {
        let url = endpoints()
            .register_webhook("https://example.com/hook?a=b")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.twitter.com/1.1/account_activity/all/dev/webhooks.json?url=https%3A%2F%2Fexample.com%2Fhook%3Fa%3Db"
        );
    }

    #[test]
    fn test_subscription_urls() {
        let endpoints = endpoints();
        assert_eq!(
            endpoints.subscriptions().unwrap().as_str(),
            "https://api.twitter.com/1.1/account_activity/all/dev/subscriptions.json"
        );
        assert_eq!(
            endpoints.subscription_list().unwrap().as_str(),
            "https://api.twitter.com/1.1/account_activity/all/dev/subscriptions/list.json"
        );
        assert_eq!(
            endpoints.subscription(3001).unwrap().as_str(),
            "https://api.twitter.com/1.1/account_activity/all/dev/subscriptions/3001.json"
        );
        assert_eq!(
            endpoints.token().unwrap().as_str(),
            "https://api.twitter.com/oauth2/token"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        for base in ["https://proxy.example.com/twitter", "https://proxy.example.com/twitter/"] {
            let endpoints = Endpoints::new(Url::parse(base).unwrap(), "dev");
            assert_eq!(
                endpoints.webhooks().unwrap().as_str(),
                "https://proxy.example.com/twitter/1.1/account_activity/all/dev/webhooks.json"
            );
            assert_eq!(
                endpoints.token().unwrap().as_str(),
                "https://proxy.example.com/twitter/oauth2/token"
            );
        }
    }

    #[test]
    fn test_environment_is_one_path_segment() {
        let endpoints = Endpoints::new(Url::parse("https://api.twitter.com").unwrap(), "a/b c");
        assert_eq!(
            endpoints.subscriptions().unwrap().as_str(),
            "https://api.twitter.com/1.1/account_activity/all/a%2Fb%20c/subscriptions.json"
        );
    }

    #[test]
    fn test_auth_table() {
        assert_eq!(Operation::ListWebhooks.auth_scheme(), AuthScheme::Bearer);
        assert_eq!(Operation::ListSubscriptions.auth_scheme(), AuthScheme::Bearer);
        assert_eq!(Operation::UnregisterUser.auth_scheme(), AuthScheme::Bearer);
        assert_eq!(Operation::RegisterWebhook.auth_scheme(), AuthScheme::Signed);
        assert_eq!(Operation::TriggerVerification.auth_scheme(), AuthScheme::Signed);
        assert_eq!(Operation::RemoveWebhook.auth_scheme(), AuthScheme::Signed);
        assert_eq!(Operation::RegisterSubscription.auth_scheme(), AuthScheme::Signed);
    }

    #[test]
    fn test_expected_statuses() {
        assert_eq!(Operation::RegisterWebhook.expected_status(), 200);
        assert_eq!(Operation::TriggerVerification.expected_status(), 204);
        assert_eq!(Operation::RemoveWebhook.expected_status(), 204);
        assert_eq!(Operation::UnregisterUser.expected_status(), 204);
        assert_eq!(Operation::TriggerVerification.method(), Method::PUT);
    }
}
