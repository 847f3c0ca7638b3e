#![allow(dead_code)]

use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use api::auth::token::{TokenConfig, TokenManager};
use api::state::app_state::AppState;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";
pub const TEST_ISSUER: &str = "svc";

pub fn test_token_manager() -> TokenManager {
    TokenManager::new(TokenConfig {
        secret: TEST_SECRET.as_bytes().to_vec(),
        access_ttl: Duration::from_secs(3600),
        refresh_ttl: Duration::from_secs(7 * 24 * 3600),
        issuer: TEST_ISSUER.to_string(),
    })
}

pub fn test_state() -> AppState {
    AppState::without_db(test_token_manager())
}

/// Assert the uniform error body shape: `{"error", "message", "code"}`.
pub async fn assert_error_body<B>(resp: ServiceResponse<B>, status: u16, slug: &str, message: &str)
where
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    assert_eq!(resp.status().as_u16(), status);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], slug);
    assert_eq!(body["message"], message);
    assert_eq!(body["code"], status);
}
