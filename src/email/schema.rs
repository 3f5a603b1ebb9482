use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Attributes;

pub(crate) const SCOPE: &str = "email_read email_write email_send";

#[derive(Serialize)]
pub(crate) struct TokenRequestBody<'a> {
    pub grant_type: &'a str,
    #[serde(rename = "clientId")]
    pub client_id: &'a str,
    #[serde(rename = "clientSecret")]
    pub client_secret: &'a str,
    pub scope: &'a str,
    pub account_id: &'a str,
}

/// Token response of either API generation: v1 answers with `accessToken`
/// and `expiresIn`, v2 with `access_token` and `expires_in`. Both spellings
/// are read as separate fields so a body carrying both still parses; the v1
/// field wins.
#[derive(Deserialize)]
pub(crate) struct TokenResponseBody {
    #[serde(rename = "accessToken")]
    access_token_v1: Option<String>,
    access_token: Option<String>,
    #[serde(rename = "expiresIn")]
    expires_in_v1: Option<u64>,
    expires_in: Option<u64>,
    pub scope: Option<String>,
}

impl TokenResponseBody {
    pub fn access_token(&mut self) -> Option<String> {
        self.access_token_v1.take().or_else(|| self.access_token.take())
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in_v1.or(self.expires_in)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendEmailRequestBody<'a> {
    pub definition_key: &'a str,
    pub recipient: Recipient<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Recipient<'a> {
    pub contact_key: &'a str,
    pub to: &'a str,
    pub attributes: &'a Attributes,
}

/// What Marketing Cloud acknowledges for an accepted send, e.g.
///
/// ```json
/// {"requestId":"a01234a1-05a1-4116-8503-ab0123a0a0a0","errorcode":0,"responses":[{"messageKey":"432a987f-ab01-012a-0123-0a01a0a0ab01"}]}
/// ```
///
/// The body is kept exactly as received. The accessors only read the usual
/// fields and return `None` when the API sent something else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SendEmailResponse(Value);

impl SendEmailResponse {
    pub fn request_id(&self) -> Option<&str> {
        self.0.get("requestId").and_then(Value::as_str)
    }

    pub fn errorcode(&self) -> Option<i64> {
        self.0.get("errorcode").and_then(Value::as_i64)
    }

    pub fn message_keys(&self) -> Vec<&str> {
        self.0
            .get("responses")
            .and_then(Value::as_array)
            .map(|responses| {
                responses
                    .iter()
                    .filter_map(|r| r.get("messageKey").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
