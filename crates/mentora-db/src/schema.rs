use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr};

const SQLITE_SCHEMA: &str = include_str!("../sql/sqlite.sql");
const POSTGRES_SCHEMA: &str = include_str!("../sql/postgres.sql");

/// Creates every table that does not exist yet. Safe to run on every start.
pub async fn setup_schema<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let schema = match conn.get_database_backend() {
        DatabaseBackend::Sqlite => SQLITE_SCHEMA,
        DatabaseBackend::Postgres => POSTGRES_SCHEMA,
        DatabaseBackend::MySql => {
            return Err(DbErr::Custom("mysql is not a supported backend".to_owned()));
        }
    };

    tracing::debug!(backend = ?conn.get_database_backend(), "creating schema");
    conn.execute_unprepared(schema).await.inspect_err(|error| {
        tracing::error!(error = error as &dyn std::error::Error, "failed to create schema");
    })?;
    Ok(())
}
