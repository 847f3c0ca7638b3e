use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use users::Model as User;
use uuid::Uuid;

use crate::entities::users;
use crate::error::AppError;

pub async fn find_by_id(
    conn: &impl ConnectionTrait,
    id: Uuid,
) -> Result<Option<User>, AppError> {
    users::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(AppError::from)
}

pub async fn find_by_email(
    conn: &impl ConnectionTrait,
    email: &str,
) -> Result<Option<User>, AppError> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(AppError::from)
}

pub async fn find_by_username(
    conn: &impl ConnectionTrait,
    username: &str,
) -> Result<Option<User>, AppError> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
        .map_err(AppError::from)
}

pub async fn create_user(
    conn: &impl ConnectionTrait,
    email: &str,
    username: &str,
    password_hash: &str,
    full_name: &str,
) -> Result<User, AppError> {
    let now = OffsetDateTime::now_utc();
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
        full_name: Set(full_name.to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user.insert(conn).await.map_err(AppError::from)
}
