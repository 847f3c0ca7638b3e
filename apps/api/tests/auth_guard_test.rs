mod common;

use std::time::Duration;

use actix_web::{test, web, App};
use api::auth::token::{TokenConfig, TokenManager};
use api::extractors::CurrentUser;
use api::middleware::AuthGuard;
use api::routes;
use api::state::app_state::AppState;
use api::AppError;
use serde_json::Value;
use uuid::Uuid;

async fn whoami(user: CurrentUser) -> Result<web::Json<Value>, AppError> {
    Ok(web::Json(serde_json::json!({ "user_id": user.user_id })))
}

#[actix_web::test]
async fn missing_header_yields_401() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_state()))
            .service(
                web::scope("/api/user")
                    .wrap(AuthGuard)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/user/whoami").to_request();
    let resp = test::call_service(&app, req).await;

    common::assert_error_body(resp, 401, "unauthorized", "missing authorization header").await;
}

#[actix_web::test]
async fn malformed_header_yields_401() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_state()))
            .service(
                web::scope("/api/user")
                    .wrap(AuthGuard)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    for header_value in ["Basic xyz", "Bearer", "Bearer ", "bearer abc", "Bearerabc"] {
        let req = test::TestRequest::get()
            .uri("/api/user/whoami")
            .insert_header(("Authorization", header_value))
            .to_request();
        let resp = test::call_service(&app, req).await;

        common::assert_error_body(resp, 401, "unauthorized", "invalid authorization header format")
            .await;
    }
}

#[actix_web::test]
async fn valid_token_attaches_identity() {
    let tokens = common::test_token_manager();
    let user_id = Uuid::new_v4();
    let token = tokens.generate_access_token(user_id).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::without_db(tokens)))
            .service(
                web::scope("/api/user")
                    .wrap(AuthGuard)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/user/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], user_id.to_string());
}

#[actix_web::test]
async fn refresh_token_is_rejected_as_access_token() {
    let tokens = common::test_token_manager();
    let token = tokens.generate_refresh_token(Uuid::new_v4()).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::without_db(tokens)))
            .service(
                web::scope("/api/user")
                    .wrap(AuthGuard)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/user/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    common::assert_error_body(resp, 401, "unauthorized", "invalid or expired access token").await;
}

#[actix_web::test]
async fn foreign_signature_is_rejected() {
    let other = TokenManager::new(TokenConfig {
        secret: b"some-other-secret".to_vec(),
        access_ttl: Duration::from_secs(3600),
        refresh_ttl: Duration::from_secs(3600),
        issuer: common::TEST_ISSUER.to_string(),
    });
    let token = other.generate_access_token(Uuid::new_v4()).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_state()))
            .service(
                web::scope("/api/user")
                    .wrap(AuthGuard)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/user/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    common::assert_error_body(resp, 401, "unauthorized", "invalid or expired access token").await;
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let tokens = TokenManager::new(TokenConfig {
        secret: common::TEST_SECRET.as_bytes().to_vec(),
        access_ttl: Duration::from_secs(1),
        refresh_ttl: Duration::from_secs(1),
        issuer: common::TEST_ISSUER.to_string(),
    });
    let token = tokens.generate_access_token(Uuid::new_v4()).unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::without_db(tokens)))
            .service(
                web::scope("/api/user")
                    .wrap(AuthGuard)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/user/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    common::assert_error_body(resp, 401, "unauthorized", "invalid or expired access token").await;
}

#[actix_web::test]
async fn profile_route_returns_authenticated_identity() {
    let tokens = common::test_token_manager();
    let user_id = Uuid::new_v4();
    let token = tokens.generate_access_token(user_id).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::without_db(tokens)))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], user_id.to_string());
}
