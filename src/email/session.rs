use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, Secret};

use super::EmailClientError;

/// The result of a successful credential exchange.
///
/// It never changes after authorization and can be shared freely between
/// tasks. There is no renewal: once the token expires every call fails with
/// whatever the API answers for a stale token.
#[derive(Debug, Clone)]
pub struct Session {
    access_token: Secret<String>,
    headers: HeaderMap,
    expires_in: Option<Duration>,
    scope: Option<String>,
}

impl Session {
    pub fn new(
        access_token: Secret<String>,
        expires_in: Option<Duration>,
        scope: Option<String>,
    ) -> Result<Self, EmailClientError> {
        if access_token.expose_secret().trim().is_empty() {
            return Err(EmailClientError::MalformedTokenResponse(
                "access token is empty".into(),
            ));
        }

        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {}", access_token.expose_secret())).map_err(
                |_| {
                    EmailClientError::MalformedTokenResponse(
                        "access token is not a valid header value".into(),
                    )
                },
            )?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            access_token,
            headers,
            expires_in,
            scope,
        })
    }

    /// Headers attached to every authenticated request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn access_token(&self) -> &Secret<String> {
        &self.access_token
    }

    /// Lifetime reported by the API at authorization time. Informational only.
    pub fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}
