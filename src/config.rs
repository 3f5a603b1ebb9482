use std::time::Duration;

use secrecy::Secret;

use crate::{
    domain::{EmailDefinition, Subdomain},
    email::{Credentials, EmailClient, EmailClientError, Endpoints},
};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub log_level: String,
    pub marketing_cloud: MarketingCloudSettings,
    pub definition: Option<DefinitionSettings>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct MarketingCloudSettings {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub subdomain: String,
    pub account_id: String,
    pub timeout_milliseconds: u64,
    /// Overrides the hosts derived from `subdomain`.
    pub auth_base_url: Option<String>,
    pub rest_base_url: Option<String>,
}

impl MarketingCloudSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn credentials(&self) -> Result<Credentials, String> {
        Ok(Credentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            subdomain: Subdomain::try_from(self.subdomain.clone())?,
            account_id: self.account_id.clone(),
        })
    }

    pub fn endpoints(&self) -> Result<Endpoints, EmailClientError> {
        let subdomain = Subdomain::try_from(self.subdomain.clone()).map_err(|reason| {
            EmailClientError::InvalidEndpoint {
                url: self.subdomain.clone(),
                reason,
            }
        })?;
        let derived = Endpoints::for_subdomain(&subdomain);

        Endpoints::new(
            self.auth_base_url
                .as_deref()
                .unwrap_or(derived.auth_base_url().as_str()),
            self.rest_base_url
                .as_deref()
                .unwrap_or(derived.rest_base_url().as_str()),
        )
    }

    pub fn client(&self) -> anyhow::Result<EmailClient> {
        let credentials = self.credentials().map_err(anyhow::Error::msg)?;
        Ok(EmailClient::new(credentials, self.timeout()).with_endpoints(self.endpoints()?))
    }
}

/// The send definition `mc-send` makes sure exists before sending.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct DefinitionSettings {
    pub definition_key: String,
    pub name: String,
    pub description: String,
    pub customer_key: String,
    pub subscription_list: String,
    pub data_extension: String,
}

impl From<DefinitionSettings> for EmailDefinition {
    fn from(value: DefinitionSettings) -> Self {
        Self {
            definition_key: value.definition_key,
            name: value.name,
            description: value.description,
            customer_key: value.customer_key,
            subscription_list: value.subscription_list,
            data_extension: value.data_extension,
        }
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment = Environment::try_from(
        std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into()),
    )
    .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // E.g. `APP_MARKETING_CLOUD__CLIENT_SECRET=...` sets `marketing_cloud.client_secret`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
