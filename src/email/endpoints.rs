use url::Url;

use super::EmailClientError;
use crate::domain::Subdomain;

/// Base URLs of the two Marketing Cloud host families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    auth_base_url: Url,
    rest_base_url: Url,
}

impl Endpoints {
    /// Explicit base URLs, e.g. a sandbox or a mock server.
    pub fn new(auth_base_url: &str, rest_base_url: &str) -> Result<Self, EmailClientError> {
        Ok(Self {
            auth_base_url: parse_base(auth_base_url)?,
            rest_base_url: parse_base(rest_base_url)?,
        })
    }

    /// The production hosts of the tenant owning `subdomain`.
    pub fn for_subdomain(subdomain: &Subdomain) -> Self {
        let host = |family: &str| {
            Url::parse(&format!(
                "https://{}.{}.marketingcloudapis.com",
                subdomain.as_ref(),
                family
            ))
            .expect("An alphanumeric subdomain should always form a valid host.")
        };

        Self {
            auth_base_url: host("auth"),
            rest_base_url: host("rest"),
        }
    }

    pub fn auth_base_url(&self) -> &Url {
        &self.auth_base_url
    }

    pub fn rest_base_url(&self) -> &Url {
        &self.rest_base_url
    }

    pub(crate) fn auth_url(&self, segments: &[&str]) -> Url {
        join(&self.auth_base_url, segments)
    }

    pub(crate) fn rest_url(&self, segments: &[&str]) -> Url {
        join(&self.rest_base_url, segments)
    }
}

fn parse_base(raw: &str) -> Result<Url, EmailClientError> {
    let url = Url::parse(raw).map_err(|e| EmailClientError::InvalidEndpoint {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(EmailClientError::InvalidEndpoint {
            url: raw.to_owned(),
            reason: "it cannot carry a path".into(),
        });
    }

    Ok(url)
}

// Each segment is percent-encoded, so a key containing `/` stays one segment.
fn join(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
