use actix_web::web;

use crate::middleware::auth_guard::AuthGuard;

pub mod auth;
pub mod health;
pub mod users;

/// Wire application routes. `main.rs` and the integration tests use the
/// same layout: auth and health are public, user routes sit behind the
/// access-token guard.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Protected user routes: /api/user/**
    cfg.service(
        web::scope("/api/user")
            .wrap(AuthGuard)
            .configure(users::configure_routes),
    );
}
