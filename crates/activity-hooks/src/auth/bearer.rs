//! Application-only bearer token, fetched once per manager

use crate::error::{ActivityError, Result};
use crate::models::TokenResponse;
use crate::transport::{HttpRequest, HttpTransport};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, Method};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};
use url::Url;

const GRANT_BODY: &str = "grant_type=client_credentials";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Token obtained from the credential exchange
#[derive(Debug, Clone)]
pub struct BearerCredential {
    pub token_type: String,
    pub access_token: Secret<String>,
}

/// Lazily-populated bearer token cache.
///
/// The first caller to find the cell empty performs the exchange; concurrent
/// callers wait for it and then read the same token. A failed exchange leaves
/// the cell empty. Once set, the token is never refreshed or invalidated.
#[derive(Debug)]
pub struct BearerTokenProvider {
    token_url: Url,
    consumer_key: String,
    consumer_secret: Secret<String>,
    cached: OnceCell<BearerCredential>,
}

impl BearerTokenProvider {
    pub fn new(token_url: Url, consumer_key: String, consumer_secret: Secret<String>) -> Self {
        Self {
            token_url,
            consumer_key,
            consumer_secret,
            cached: OnceCell::new(),
        }
    }

    /// Whether the exchange has already completed
    pub fn is_cached(&self) -> bool {
        self.cached.initialized()
    }

    /// Return the cached token, exchanging credentials on first use
    pub async fn bearer_token(&self, transport: &dyn HttpTransport) -> Result<String> {
        let credential = self
            .cached
            .get_or_try_init(|| self.exchange(transport))
            .await?;

        Ok(credential.access_token.expose_secret().clone())
    }

    #[instrument(skip(self, transport), fields(token_url = %self.token_url))]
    async fn exchange(&self, transport: &dyn HttpTransport) -> Result<BearerCredential> {
        debug!("Requesting bearer token");

        let request = HttpRequest::new(Method::POST, self.token_url.clone())
            .header(header::AUTHORIZATION, self.basic_auth_header())
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(GRANT_BODY);

        let response = transport
            .execute(request)
            .await
            .map_err(|e| ActivityError::auth_with("Token request failed", e))?;

        if !response.is_success() {
            return Err(ActivityError::auth(format!(
                "Token request failed with status {}: {}",
                response.status, response.body
            )));
        }

        let token: TokenResponse = serde_json::from_str(&response.body)
            .map_err(|e| ActivityError::auth_with("Failed to parse token response", e))?;

        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(ActivityError::auth(format!(
                "Unexpected token type: {}",
                token.token_type
            )));
        }

        info!("Acquired bearer token");

        Ok(BearerCredential {
            token_type: token.token_type,
            access_token: Secret::new(token.access_token),
        })
    }

    /// `Basic base64(urlencode(key):urlencode(secret))`
    fn basic_auth_header(&self) -> String {
        let credentials = format!(
            "{}:{}",
            urlencoding::encode(&self.consumer_key),
            urlencoding::encode(self.consumer_secret.expose_secret())
        );
        format!("Basic {}", STANDARD.encode(credentials))
    }
}
