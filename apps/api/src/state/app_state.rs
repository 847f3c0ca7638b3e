use sea_orm::DatabaseConnection;

use crate::auth::token::TokenManager;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional so auth-only tests run without one)
    pub db: Option<DatabaseConnection>,
    /// Token manager owning the JWT configuration
    pub tokens: TokenManager,
}

impl AppState {
    pub fn new(db: DatabaseConnection, tokens: TokenManager) -> Self {
        Self {
            db: Some(db),
            tokens,
        }
    }

    pub fn without_db(tokens: TokenManager) -> Self {
        Self { db: None, tokens }
    }

    /// Database handle or an internal error when the service runs without one.
    pub fn require_db(&self) -> Result<&DatabaseConnection, crate::error::AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| crate::error::AppError::internal("database connection not available"))
    }
}
