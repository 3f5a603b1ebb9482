use serde::Serialize;

/// A send definition ties an email template, a subscription list and a
/// data extension together under a caller-chosen key.
///
/// Marketing Cloud requires `name` to be unique within the account and
/// caps its length; neither is checked locally. Creating the same
/// `definition_key` twice fails remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDefinition {
    pub definition_key: String,
    pub name: String,
    pub description: String,
    /// Customer key of the email message used as template.
    pub customer_key: String,
    /// External key of the subscriber list.
    pub subscription_list: String,
    /// External key of the triggered-send data extension.
    pub data_extension: String,
}

impl EmailDefinition {
    pub(crate) fn to_request_body(&self) -> DefinitionRequestBody<'_> {
        DefinitionRequestBody {
            definition_key: &self.definition_key,
            status: "Active",
            name: &self.name,
            description: &self.description,
            classification: "Default Transactional",
            content: Content {
                customer_key: &self.customer_key,
            },
            subscriptions: Subscriptions {
                list: &self.subscription_list,
                auto_add_subscriber: true,
                update_subscriber: true,
                data_extension: &self.data_extension,
            },
            options: Options { track_links: true },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DefinitionRequestBody<'a> {
    definition_key: &'a str,
    status: &'a str,
    name: &'a str,
    description: &'a str,
    classification: &'a str,
    content: Content<'a>,
    subscriptions: Subscriptions<'a>,
    options: Options,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Content<'a> {
    customer_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Subscriptions<'a> {
    list: &'a str,
    auto_add_subscriber: bool,
    update_subscriber: bool,
    data_extension: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Options {
    track_links: bool,
}
