//! Data models for the account activity API

use crate::error::{ActivityError, Result};
use serde::{Deserialize, Serialize};

/// Webhook entry as returned by the webhook list endpoint
#[derive(Debug, Clone, Deserialize)]
struct WebhookInfo {
    id: String,
    valid: bool,
}

/// A registered webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WebhookRecord {
    pub id: u64,
    pub is_valid: bool,
}

impl TryFrom<WebhookInfo> for WebhookRecord {
    type Error = ActivityError;

    fn try_from(info: WebhookInfo) -> Result<Self> {
        Ok(Self {
            id: parse_id(&info.id)?,
            is_valid: info.valid,
        })
    }
}

/// Subscription list response
#[derive(Debug, Clone, Deserialize)]
struct SubscriptionInfo {
    environment: String,
    application_id: String,
    #[serde(rename = "subscriptions", default)]
    users: Vec<SubscribedUser>,
}

#[derive(Debug, Clone, Deserialize)]
struct SubscribedUser {
    user_id: String,
}

/// Users subscribed to an environment's webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionSet {
    pub environment_name: String,
    pub application_id: String,
    pub user_ids: Vec<u64>,
}

impl TryFrom<SubscriptionInfo> for SubscriptionSet {
    type Error = ActivityError;

    fn try_from(info: SubscriptionInfo) -> Result<Self> {
        let user_ids = info
            .users
            .iter()
            .map(|user| parse_id(&user.user_id))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            environment_name: info.environment,
            application_id: info.application_id,
            user_ids,
        })
    }
}

/// Token returned by the credential exchange
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub token_type: String,
    pub access_token: String,
}

/// Parse the body of the webhook list endpoint
pub fn parse_webhook_list(body: &str) -> Result<Vec<WebhookRecord>> {
    let entries: Vec<WebhookInfo> = serde_json::from_str(body)?;
    entries.into_iter().map(WebhookRecord::try_from).collect()
}

/// Parse the body of the subscription list endpoint
pub fn parse_subscription_list(body: &str) -> Result<SubscriptionSet> {
    let info: SubscriptionInfo = serde_json::from_str(body)?;
    SubscriptionSet::try_from(info)
}

fn parse_id(value: &str) -> Result<u64> {
    value.parse().map_err(|source| ActivityError::InvalidId {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_webhook_list_ignores_unknown_fields() {
        let body = r#"[
            {"id": "1234567890", "url": "https://example.com/hook", "valid": true, "created_timestamp": "2018-01-01 00:00:00 +0000"}
        ]"#;

        let webhooks = parse_webhook_list(body).unwrap();
        assert_eq!(
            webhooks,
            vec![WebhookRecord {
                id: 1234567890,
                is_valid: true
            }]
        );
    }

    #[test]
    fn test_parse_webhook_list_rejects_malformed_id() {
        let body = r#"[{"id": "12ab", "valid": true}]"#;

        let err = parse_webhook_list(body).unwrap_err();
        assert!(matches!(err, ActivityError::InvalidId { ref value, .. } if value == "12ab"));
    }

    #[test]
    fn test_parse_webhook_list_rejects_non_array() {
        let err = parse_webhook_list(r#"{"errors": []}"#).unwrap_err();
        assert!(matches!(err, ActivityError::Json(_)));
    }

    #[test]
    fn test_parse_subscription_list() {
        let body = r#"{
            "environment": "dev",
            "application_id": "13090192",
            "subscriptions": [{"user_id": "3001"}, {"user_id": "3002"}]
        }"#;

        let set = parse_subscription_list(body).unwrap();
        assert_eq!(set.environment_name, "dev");
        assert_eq!(set.application_id, "13090192");
        assert_eq!(set.user_ids, vec![3001, 3002]);
    }

    #[test]
    fn test_parse_subscription_list_rejects_malformed_user_id() {
        let body = r#"{"environment": "dev", "application_id": "1", "subscriptions": [{"user_id": "-"}]}"#;

        assert!(matches!(
            parse_subscription_list(body),
            Err(ActivityError::InvalidId { .. })
        ));
    }
}
