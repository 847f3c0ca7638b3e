//! Signup and signin flows: request validation, password hashing and
//! verification, token pair issuance.

use lazy_regex::regex_is_match;
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{TokenManager, TokenPair};
use crate::entities::users::Model as User;
use crate::error::AppError;
use crate::repos::users as users_repo;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a user row; never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserDto,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Password must carry uppercase, lowercase, digit and special characters.
fn password_is_strong(password: &str) -> bool {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace());
    has_upper && has_lower && has_digit && has_special
}

pub fn validate_signup(req: &SignupRequest) -> Result<(), AppError> {
    let mut problems: Vec<String> = Vec::new();

    if req.email.is_empty() {
        problems.push("email is required".to_string());
    } else if !regex_is_match!(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", &req.email) {
        problems.push("email must be a valid email address".to_string());
    }

    if req.username.len() < 3 || req.username.len() > 100 {
        problems.push("username must be between 3 and 100 characters".to_string());
    }

    if req.full_name.is_empty() || req.full_name.len() > 255 {
        problems.push("full_name must be between 1 and 255 characters".to_string());
    }

    if req.password.len() < 8 || req.password.len() > 255 {
        problems.push("password must be between 8 and 255 characters".to_string());
    } else if !password_is_strong(&req.password) {
        problems.push(
            "password must contain uppercase letters, lowercase letters, numbers, and special characters"
                .to_string(),
        );
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(problems.join("; ")))
    }
}

pub async fn signup(
    conn: &impl ConnectionTrait,
    tokens: &TokenManager,
    req: &SignupRequest,
) -> Result<AuthResponse, AppError> {
    validate_signup(req)?;

    if users_repo::find_by_email(conn, &req.email).await?.is_some() {
        return Err(AppError::conflict("email already registered"));
    }
    if users_repo::find_by_username(conn, &req.username)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("username already taken"));
    }

    let password_hash = hash_password(&req.password)?;
    let user =
        users_repo::create_user(conn, &req.email, &req.username, &password_hash, &req.full_name)
            .await?;

    let pair = tokens
        .generate_token_pair(user.id)
        .map_err(|e| AppError::internal(format!("failed to generate tokens: {e}")))?;

    info!(user_id = %user.id, "user registered");

    Ok(AuthResponse {
        user: user.into(),
        tokens: pair,
    })
}

pub async fn signin(
    conn: &impl ConnectionTrait,
    tokens: &TokenManager,
    req: &SigninRequest,
) -> Result<AuthResponse, AppError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("email and password are required"));
    }

    let user = match users_repo::find_by_email(conn, &req.email).await? {
        Some(user) => user,
        None => {
            warn!("signin attempt for unknown email");
            return Err(AppError::unauthorized("invalid email or password"));
        }
    };

    if !user.is_active {
        warn!(user_id = %user.id, "signin attempt for inactive user");
        return Err(AppError::unauthorized("invalid email or password"));
    }

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = %user.id, "signin attempt with wrong password");
        return Err(AppError::unauthorized("invalid email or password"));
    }

    let pair = tokens
        .generate_token_pair(user.id)
        .map_err(|e| AppError::internal(format!("failed to generate tokens: {e}")))?;

    info!(user_id = %user.id, "user signed in");

    Ok(AuthResponse {
        user: user.into(),
        tokens: pair,
    })
}
