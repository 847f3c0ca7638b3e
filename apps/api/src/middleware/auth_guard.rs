//! Access-token enforcement middleware.
//!
//! Extracts the bearer token from the Authorization header, validates it
//! against the token manager in `AppState` and stores the authenticated
//! identity in request extensions for downstream handlers. Every failure
//! is answered directly with a 401 carrying a generic message; the
//! validation detail is only logged.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::state::app_state::AppState;

pub struct AuthGuard;

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware { service }))
    }
}

pub struct AuthGuardMiddleware<S> {
    service: S,
}

impl<S, B> AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    fn reject(
        req: ServiceRequest,
        err: AppError,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let response = err.error_response().map_into_right_body();
        Box::pin(async move { Ok(req.into_response(response)) })
    }
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();

        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(value) => value.clone(),
            None => {
                warn!(url.path = %path, "missing authorization header");
                return Self::reject(req, AppError::unauthorized("missing authorization header"));
            }
        };

        let token = match auth_header
            .to_str()
            .ok()
            .and_then(extract_bearer_token)
            .map(str::to_string)
        {
            Some(token) => token,
            None => {
                warn!(url.path = %path, "invalid authorization header format");
                return Self::reject(
                    req,
                    AppError::unauthorized("invalid authorization header format"),
                );
            }
        };

        let app_state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.clone(),
            None => {
                return Self::reject(req, AppError::internal("AppState not available"));
            }
        };

        match app_state.tokens.validate_access_token(&token) {
            Ok(claims) => {
                debug!(user_id = %claims.user_id, url.path = %path, "user authenticated");
                req.extensions_mut().insert(CurrentUser {
                    user_id: claims.user_id,
                });
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(e) => {
                warn!(url.path = %path, error = %e, "access token rejected");
                Self::reject(
                    req,
                    AppError::unauthorized("invalid or expired access token"),
                )
            }
        }
    }
}

/// Parse a `Bearer <token>` header value. The scheme must match exactly and
/// the value must be exactly two whitespace-separated parts.
fn extract_bearer_token(value: &str) -> Option<&str> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return None;
    }
    Some(parts[1])
}
