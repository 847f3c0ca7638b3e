use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Authenticated identity stored in request extensions by `AuthGuard` and
/// read back here. The typed extension key makes a wrong-type read
/// impossible; a missing value means the guard was not applied to the
/// route, which is a wiring mistake surfaced as an error, not a panic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user_id: Uuid,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<CurrentUser>().cloned();
        ready(user.ok_or_else(|| {
            AppError::internal("authentication middleware not applied to this route")
        }))
    }
}
