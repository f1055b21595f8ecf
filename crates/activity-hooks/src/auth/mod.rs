//! Credential provider
//!
//! Two independent ways of authorizing a request:
//! - [`RequestSigner`]: OAuth 1.0a signature, recomputed for every request
//! - [`BearerTokenProvider`]: application token, exchanged once and reused

mod bearer;
mod signing;

pub use bearer::{BearerCredential, BearerTokenProvider};
pub use signing::{RequestSigner, SigningIdentity};

use crate::error::Result;
use crate::routes::AuthScheme;
use crate::transport::HttpTransport;
use reqwest::Method;
use url::Url;

/// What a single request needs to be authorized
#[derive(Debug, Clone, Copy)]
pub enum Authorization<'a> {
    Signed { method: &'a Method, url: &'a Url },
    Bearer,
}

impl<'a> Authorization<'a> {
    pub fn for_scheme(scheme: AuthScheme, method: &'a Method, url: &'a Url) -> Self {
        match scheme {
            AuthScheme::Signed => Authorization::Signed { method, url },
            AuthScheme::Bearer => Authorization::Bearer,
        }
    }
}

/// Both credentials owned by one manager
#[derive(Debug)]
pub struct Credentials {
    signer: RequestSigner,
    bearer: BearerTokenProvider,
}

impl Credentials {
    pub fn new(signer: RequestSigner, bearer: BearerTokenProvider) -> Self {
        Self { signer, bearer }
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    pub fn bearer(&self) -> &BearerTokenProvider {
        &self.bearer
    }

    /// Produce the `Authorization` header value for a request
    pub async fn header(
        &self,
        authorization: Authorization<'_>,
        transport: &dyn HttpTransport,
    ) -> Result<String> {
        match authorization {
            Authorization::Signed { method, url } => self.signer.sign(method, url),
            Authorization::Bearer => {
                let token = self.bearer.bearer_token(transport).await?;
                Ok(format!("Bearer {}", token))
            }
        }
    }
}
