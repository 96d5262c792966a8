use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;

/// Table definitions, applied in dependency order
const SCHEMA: &[(&str, &str)] = &[
    (
        "companies",
        r#"CREATE TABLE IF NOT EXISTS companies (
            handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
            name TEXT UNIQUE NOT NULL,
            num_employees INTEGER CHECK (num_employees >= 0),
            description TEXT NOT NULL,
            logo_url TEXT
        )"#,
    ),
    (
        "jobs",
        r#"CREATE TABLE IF NOT EXISTS jobs (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            salary INTEGER CHECK (salary >= 0),
            equity NUMERIC CHECK (equity <= 1.0),
            company_handle VARCHAR(25) NOT NULL
                REFERENCES companies ON DELETE CASCADE
        )"#,
    ),
    (
        "users",
        r#"CREATE TABLE IF NOT EXISTS users (
            username VARCHAR(25) PRIMARY KEY,
            password TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL CHECK (position('@' IN email) > 1),
            is_admin BOOLEAN NOT NULL DEFAULT FALSE
        )"#,
    ),
    (
        "applications",
        r#"CREATE TABLE IF NOT EXISTS applications (
            username VARCHAR(25)
                REFERENCES users ON DELETE CASCADE,
            job_id INTEGER
                REFERENCES jobs ON DELETE CASCADE,
            PRIMARY KEY (username, job_id)
        )"#,
    ),
];

/// Create any missing tables
pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
    for (table, ddl) in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
        info!("Ensured table: {}", table);
    }
    Ok(())
}
