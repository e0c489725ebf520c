pub mod dto;
pub mod error;
pub mod models;
pub mod repository;

pub use error::{Result, StorageError};

/// Apply any pending schema migrations. Binaries run this once after
/// connecting, before touching the repositories.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
