use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::auth::token::TokenPair;
use crate::error::AppError;
use crate::services::users::{signin, signup, SigninRequest, SignupRequest};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

async fn signup_handler(
    req: web::Json<SignupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let response = signup(db, &app_state.tokens, &req).await?;
    Ok(HttpResponse::Created().json(response))
}

async fn signin_handler(
    req: web::Json<SigninRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let response = signin(db, &app_state.tokens, &req).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Exchange a valid refresh token for a fresh access token. Stateless: the
/// submitted refresh token is validated, never rotated, and echoed back in
/// the response.
async fn refresh_handler(
    req: web::Json<RefreshRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.refresh_token.is_empty() {
        return Err(AppError::validation("refresh_token is required"));
    }

    let claims = match app_state.tokens.validate_refresh_token(&req.refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = %e, "refresh token rejected");
            return Err(AppError::unauthorized("invalid or expired refresh token"));
        }
    };

    let access_token = match app_state.tokens.generate_access_token(claims.user_id) {
        Ok(token) => token,
        Err(e) => {
            error!(user_id = %claims.user_id, error = %e, "access token generation failed");
            return Err(AppError::internal("failed to generate access token"));
        }
    };

    info!(user_id = %claims.user_id, "refresh token used");

    Ok(HttpResponse::Ok().json(TokenPair {
        access_token,
        refresh_token: req.refresh_token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: app_state.tokens.access_ttl().as_secs() as i64,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/signup").route(web::post().to(signup_handler)))
        .service(web::resource("/signin").route(web::post().to(signin_handler)))
        .service(web::resource("/refresh").route(web::post().to(refresh_handler)));
}
