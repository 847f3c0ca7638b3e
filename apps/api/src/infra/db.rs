use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::error::AppError;

/// Connect to the database. Does not run migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Apply pending migrations at startup.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<(), AppError> {
    Migrator::up(conn, None).await.map_err(AppError::from)
}
