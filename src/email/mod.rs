use std::time::Duration;

use reqwest::{header::ACCEPT, Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use crate::domain::{Attributes, Email, EmailDefinition, Subdomain};

mod endpoints;
mod error;
mod schema;
mod session;

pub use self::endpoints::Endpoints;
pub use self::error::EmailClientError;
pub use self::schema::SendEmailResponse;
pub use self::session::Session;

/// Installed-package credentials, found in Marketing Cloud under
/// Setup > Apps > Installed Packages.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub subdomain: Subdomain,
    /// Member id of the business unit, e.g. `1234567`.
    pub account_id: String,
}

/// Client for transactional sends through the Marketing Cloud REST API.
///
/// Usage is always `authorize` first, then an optional
/// `check_email_definition`/`create_email_definition` pair, then any number
/// of `send_email` calls with the same [`Session`].
#[derive(Debug, Clone)]
pub struct EmailClient {
    http_client: Client,
    endpoints: Endpoints,
    credentials: Credentials,
    timeout: Duration,
}

impl EmailClient {
    /// Builds a client without touching the network.
    pub fn new(credentials: Credentials, timeout: Duration) -> Self {
        Self {
            http_client: Client::new(),
            endpoints: Endpoints::for_subdomain(&credentials.subdomain),
            credentials,
            timeout,
        }
    }

    /// Talks to other hosts than the ones derived from the subdomain.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Exchanges the client credentials for an access token.
    #[tracing::instrument(
        name = "Authorize",
        skip(self),
        fields(
            client_id = %self.credentials.client_id,
            account_id = %self.credentials.account_id,
        )
    )]
    pub async fn authorize(&self) -> Result<Session, EmailClientError> {
        let url = self.endpoints.auth_url(&["v1", "requestToken"]);
        let body = schema::TokenRequestBody {
            grant_type: "client_credentials",
            client_id: &self.credentials.client_id,
            client_secret: self.credentials.client_secret.expose_secret(),
            scope: schema::SCOPE,
            account_id: &self.credentials.account_id,
        };

        let response = self
            .http_client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(EmailClientError::AuthorizationRequest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailClientError::AuthorizationRejected { status, body });
        }

        let text = response
            .text()
            .await
            .map_err(EmailClientError::AuthorizationRequest)?;
        let mut token: schema::TokenResponseBody = serde_json::from_str(&text)
            .map_err(|e| EmailClientError::MalformedTokenResponse(e.to_string()))?;
        let access_token = token.access_token().ok_or_else(|| {
            EmailClientError::MalformedTokenResponse("accessToken is missing".into())
        })?;
        let expires_in = token.expires_in();

        let session = Session::new(
            Secret::new(access_token),
            expires_in.map(Duration::from_secs),
            token.scope,
        )?;

        tracing::info!(?expires_in, "authorized");
        Ok(session)
    }

    /// Whether a send definition exists under `key`.
    ///
    /// Only an explicit `200 OK` counts as found. Every other status, and any
    /// failure to reach the API, reads as "not found".
    #[tracing::instrument(name = "Check email definition", skip(self, session))]
    pub async fn check_email_definition(&self, session: &Session, key: &str) -> bool {
        let url = self
            .endpoints
            .rest_url(&["messaging", "v1", "email", "definitions", key]);

        let response = self
            .http_client
            .get(url)
            .headers(session.headers().clone())
            .timeout(self.timeout)
            .send()
            .await;

        match response {
            Ok(response) => {
                let found = response.status() == StatusCode::OK;
                tracing::debug!(status = %response.status(), found, "email definition lookup");
                found
            }
            Err(e) => {
                tracing::warn!(error = ?e, "email definition lookup failed, treating it as missing");
                false
            }
        }
    }

    /// Registers a send definition.
    ///
    /// Not idempotent: a second call with the same key fails remotely, so
    /// check first. When this fails nothing is known about what the API
    /// kept.
    #[tracing::instrument(
        name = "Create email definition",
        skip(self, session, definition),
        fields(definition_key = %definition.definition_key)
    )]
    pub async fn create_email_definition(
        &self,
        session: &Session,
        definition: &EmailDefinition,
    ) -> Result<(), EmailClientError> {
        let url = self
            .endpoints
            .rest_url(&["messaging", "v1", "email", "definitions"]);

        let response = self
            .http_client
            .post(url)
            .headers(session.headers().clone())
            .json(&definition.to_request_body())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailClientError::DefinitionCreate { status, body });
        }

        tracing::info!("email definition created");
        Ok(())
    }

    /// Triggers one transactional send through an existing definition.
    ///
    /// Every call gets a fresh message id. An `Ok` only means the API
    /// accepted the request: attribute keys that do not match the data
    /// extension make the message vanish without any error.
    #[tracing::instrument(
        name = "Send email",
        skip(self, session, attributes),
        fields(message_id = tracing::field::Empty)
    )]
    pub async fn send_email(
        &self,
        session: &Session,
        definition_key: &str,
        recipient: &Email,
        attributes: &Attributes,
    ) -> Result<SendEmailResponse, EmailClientError> {
        let message_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("message_id", message_id.as_str());

        let url = self
            .endpoints
            .rest_url(&["messaging", "v1", "email", "messages", &message_id]);
        let body = schema::SendEmailRequestBody {
            definition_key,
            recipient: schema::Recipient {
                contact_key: recipient.as_ref(),
                to: recipient.as_ref(),
                attributes,
            },
        };
        tracing::debug!(attributes = ?attributes.keys().collect::<Vec<_>>(), "sending email");

        let response = self
            .http_client
            .post(url)
            .headers(session.headers().clone())
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::ACCEPTED {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailClientError::Send { status, body });
        }

        // Any JSON body counts: the message is already accepted at this point.
        let text = response.text().await?;
        match serde_json::from_str(&text) {
            Ok(response) => Ok(response),
            Err(source) => Err(EmailClientError::Decode { source, body: text }),
        }
    }
}
