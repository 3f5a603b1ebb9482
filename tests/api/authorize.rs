use marketing_cloud::email::EmailClientError;
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{spawn_app, unreachable_email_client};

#[tokio::test]
async fn authorize_yields_a_bearer_session() {
    let app = spawn_app().await;

    let session = app.authorized().await;

    assert_eq!(session.headers()["Authorization"], "Bearer test-token");
    assert_eq!(session.headers()["Content-Type"], "application/json");
}

#[tokio::test]
async fn authorize_exchanges_the_configured_credentials() {
    let app = spawn_app().await;

    Mock::given(path("/v1/requestToken"))
        .and(method("POST"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "grant_type": "client_credentials",
            "clientId": "test-client",
            "clientSecret": "test-secret",
            "scope": "email_read email_write email_send",
            "account_id": "1234567"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "v2-token",
            "expires_in": 1079,
            "scope": "email_read email_write email_send"
        })))
        .expect(1)
        .mount(&app.marketing_cloud)
        .await;

    let session = app
        .email_client
        .authorize()
        .await
        .expect("Authorization should succeed.");

    assert_eq!(session.headers()["Authorization"], "Bearer v2-token");
    assert_eq!(session.scope(), Some("email_read email_write email_send"));
}

#[tokio::test]
async fn authorize_fails_deterministically_without_a_token() {
    let app = spawn_app().await;

    Mock::given(path("/v1/requestToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expiresIn": 3479})))
        .mount(&app.marketing_cloud)
        .await;

    for _ in 0..3 {
        let err = app.email_client.authorize().await.unwrap_err();
        assert!(err.is_authorization(), "unexpected error: {}", err);
    }
}

#[tokio::test]
async fn authorize_surfaces_an_unreachable_host() {
    let err = unreachable_email_client().authorize().await.unwrap_err();

    assert!(matches!(err, EmailClientError::AuthorizationRequest(_)));
    assert!(err.status().is_none());
    assert!(err.is_authorization());
    assert!(!err.is_timeout());
}
