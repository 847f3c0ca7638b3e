use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::users as users_repo;
use crate::services::users::UserDto;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct ProfileResponse {
    user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserDto>,
}

/// Profile of the authenticated user. The identity comes from the auth
/// middleware; the full record is included when a database is configured.
async fn profile(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = match app_state.db.as_ref() {
        Some(db) => users_repo::find_by_id(db, current_user.user_id)
            .await?
            .map(UserDto::from),
        None => None,
    };

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user_id: current_user.user_id,
        user,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/profile").route(web::get().to(profile)));
}
