//! Client for transactional email sends through the Salesforce Marketing
//! Cloud REST API.
//!
//! ```no_run
//! # async fn run() -> Result<(), marketing_cloud::email::EmailClientError> {
//! use std::time::Duration;
//!
//! use marketing_cloud::domain::{Attributes, Email, Subdomain};
//! use marketing_cloud::email::{Credentials, EmailClient};
//! use secrecy::Secret;
//!
//! let credentials = Credentials {
//!     client_id: "client-id".into(),
//!     client_secret: Secret::new("client-secret".into()),
//!     subdomain: Subdomain::try_from("mc123".to_string()).unwrap(),
//!     account_id: "1234567".into(),
//! };
//! let client = EmailClient::new(credentials, Duration::from_secs(10));
//! let session = client.authorize().await?;
//!
//! let recipient = Email::try_from("hans@meier.ch").unwrap();
//! let attributes: Attributes = [("FirstName", "Kurt")].into_iter().collect();
//! client
//!     .send_email(&session, "my-definition", &recipient, &attributes)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod email;
pub mod telemetry;
