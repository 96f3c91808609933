use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

/// Set up test database connection
/// Uses TEST_DATABASE_URL environment variable or falls back to default
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let database_url = env::var("TEST_DATABASE_URL").unwrap_or_else(|_| {
        "postgresql://finboard_user@localhost:5432/finboard_test".to_string()
    });

    Database::connect(&database_url).await
}

/// A symbol unlikely to collide across test runs against a shared database
#[allow(dead_code)]
pub fn unique_symbol(prefix: &str) -> String {
    format!("{}{}", prefix, std::process::id())
}
