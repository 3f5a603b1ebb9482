pub mod attributes;
pub mod definition;
pub mod email;
pub mod subdomain;

pub use self::attributes::Attributes;
pub use self::definition::EmailDefinition;
pub use self::email::Email;
pub use self::subdomain::Subdomain;
