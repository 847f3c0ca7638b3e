mod common;

use actix_web::{test, web, App, HttpResponse};
use api::middleware::RequestLog;
use api::AppError;

async fn failing_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::validation("example failure"))
}

#[actix_web::test]
async fn error_body_has_uniform_shape() {
    let app = test::init_service(
        App::new()
            .wrap(RequestLog)
            .route("/_test/error", web::get().to(failing_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/_test/error").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);

    let headers = resp.headers().clone();
    let request_id = headers.get("x-request-id").unwrap().to_str().unwrap();
    assert!(!request_id.is_empty());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "example failure");
    assert_eq!(body["code"], 400);
}

#[actix_web::test]
async fn internal_errors_do_not_leak_detail() {
    async fn db_failure() -> Result<HttpResponse, AppError> {
        Err(AppError::db("connection refused at 10.0.0.1:5432"))
    }

    let app = test::init_service(
        App::new().route("/_test/db", web::get().to(db_failure)),
    )
    .await;

    let req = test::TestRequest::get().uri("/_test/db").to_request();
    let resp = test::call_service(&app, req).await;

    common::assert_error_body(resp, 500, "internal_error", "database error").await;
}
