use derive_more::Display;

/// The tenant-specific subdomain of a Marketing Cloud account, e.g.
/// `abc01abcd0ab0abc01a01abc0ab0`.
///
/// It is spliced into both the authentication and the REST host names, so
/// only ASCII letters and digits are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", _0)]
pub struct Subdomain(String);

impl TryFrom<String> for Subdomain {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim().to_owned();
        if value.is_empty() {
            return Err("subdomain is empty".into());
        }

        // DNS labels are capped at 63 octets.
        if value.len() > 63 {
            return Err("subdomain is too long".into());
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err("subdomain contains invalid characters".into());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Subdomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
