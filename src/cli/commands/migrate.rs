use anyhow::Context;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::{schema, DatabaseManager};

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config::config().database)
        .await
        .context("failed to connect to the database")?;
    schema::migrate(&pool).await.context("migration failed")?;
    output_success(&output_format, "Schema is up to date", None)
}
