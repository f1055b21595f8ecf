//! OAuth 1.0a request signing
//!
//! Provides HMAC-SHA1 `Authorization` headers bound to the exact request
//! method and URL, query string included.

use crate::error::{ActivityError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::{distributions::Alphanumeric, Rng};
use reqwest::Method;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use url::Url;
use urlencoding::encode;

type HmacSha1 = Hmac<sha1::Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LENGTH: usize = 32;

/// Long-lived application and user keys
#[derive(Debug, Clone, Deserialize)]
pub struct SigningIdentity {
    pub consumer_key: String,
    pub consumer_secret: Secret<String>,
    pub access_token: String,
    pub access_token_secret: Secret<String>,
}

impl SigningIdentity {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: Secret::new(consumer_secret.into()),
            access_token: access_token.into(),
            access_token_secret: Secret::new(access_token_secret.into()),
        }
    }
}

/// Produces per-request OAuth 1.0a headers
#[derive(Debug, Clone)]
pub struct RequestSigner {
    identity: SigningIdentity,
}

impl RequestSigner {
    pub fn new(identity: SigningIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    /// Sign a request with a fresh nonce and the current timestamp
    pub fn sign(&self, method: &Method, url: &Url) -> Result<String> {
        self.sign_with(method, url, &generate_nonce(), Utc::now().timestamp())
    }

    /// Sign a request with a caller-supplied nonce and timestamp
    pub fn sign_with(&self, method: &Method, url: &Url, nonce: &str, timestamp: i64) -> Result<String> {
        let timestamp = timestamp.to_string();
        let oauth_params = [
            ("oauth_consumer_key", self.identity.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.identity.access_token.as_str()),
            ("oauth_version", OAUTH_VERSION),
        ];

        let base = signature_base_string(method, url, &oauth_params);
        let signature = self.compute_signature(&base)?;

        let mut header_params = oauth_params.to_vec();
        header_params.push(("oauth_signature", signature.as_str()));
        header_params.sort_unstable();

        let fields = header_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", fields))
    }

    /// Compute the base64 HMAC-SHA1 of a signature base string
    fn compute_signature(&self, base: &str) -> Result<String> {
        let key = format!(
            "{}&{}",
            encode(self.identity.consumer_secret.expose_secret()),
            encode(self.identity.access_token_secret.expose_secret())
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| ActivityError::auth(format!("Invalid signing key: {}", e)))?;
        mac.update(base.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&base-uri&normalized-params`, each part percent-encoded
fn signature_base_string(method: &Method, url: &Url, oauth_params: &[(&str, &str)]) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k).into_owned(), encode(&v).into_owned()))
        .collect();
    params.extend(
        oauth_params
            .iter()
            .map(|(k, v)| (encode(k).into_owned(), encode(v).into_owned())),
    );
    params.sort_unstable();

    let normalized = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        encode(&base_uri(url)),
        encode(&normalized)
    )
}

/// Scheme, host, non-default port and path; no query or fragment
fn base_uri(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}

fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}
