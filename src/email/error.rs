use reqwest::StatusCode;

/// Everything that can go wrong while talking to Marketing Cloud.
///
/// Variants that carry a response keep the raw body so callers can see what
/// the API complained about.
#[derive(thiserror::Error, Debug)]
pub enum EmailClientError {
    #[error("authorization was rejected with {status}: {body}")]
    AuthorizationRejected { status: StatusCode, body: String },
    #[error("authorization response is unusable: {0}")]
    MalformedTokenResponse(String),
    /// The token exchange never got an answer. A timeout still reports
    /// `true` from [`EmailClientError::is_timeout`].
    #[error("authorization request failed")]
    AuthorizationRequest(#[source] reqwest::Error),
    #[error("failed to create email definition, got {status}: {body}")]
    DefinitionCreate { status: StatusCode, body: String },
    #[error("failed to send email, got {status}: {body}")]
    Send { status: StatusCode, body: String },
    #[error("failed to decode response body: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    #[error("{url} is not a usable base URL: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("the request timed out")]
    Timeout(#[source] reqwest::Error),
    #[error("failed to execute request")]
    Request(#[source] reqwest::Error),
}

impl EmailClientError {
    /// Whether the credential exchange failed, as opposed to a later call.
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AuthorizationRejected { .. }
                | Self::MalformedTokenResponse(_)
                | Self::AuthorizationRequest(_)
        )
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::AuthorizationRequest(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// The HTTP status of the failed call, when the API answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::AuthorizationRejected { status, .. }
            | Self::DefinitionCreate { status, .. }
            | Self::Send { status, .. } => Some(*status),
            Self::Timeout(e) | Self::Request(e) | Self::AuthorizationRequest(e) => e.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for EmailClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e)
        } else {
            Self::Request(e)
        }
    }
}
