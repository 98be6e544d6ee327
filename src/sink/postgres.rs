//! Postgres [`RecordSink`] backed by an sqlx connection pool.

use async_trait::async_trait;
use log::debug;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DbParams;
use crate::error::SinkError;
use crate::types::{InsertResult, NormalizedRecord};

use super::RecordSink;

/// Sink writing to the `users` table over a [`PgPool`].
///
/// All statements are parameterized; field values never reach the SQL text.
#[derive(Debug, Clone)]
pub struct PostgresSink {
    pool: PgPool,
}

impl PostgresSink {
    /// Connect with the given credentials and wrap the pool in a sink.
    pub async fn connect(db: &DbParams) -> Result<Self, SinkError> {
        let options = PgConnectOptions::new()
            .host(&db.host)
            .username(&db.user)
            .password(&db.password);
        // One connection: the whole run is a single sequential writer.
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordSink for PostgresSink {
    async fn create_schema(&self) -> Result<(), SinkError> {
        debug!("ensuring schema exists");
        sqlx::query("CREATE SCHEMA IF NOT EXISTS public")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn drop_table(&self) -> Result<(), SinkError> {
        debug!("dropping users table");
        sqlx::query("DROP TABLE IF EXISTS users")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn create_table(&self) -> Result<(), SinkError> {
        debug!("creating users table");
        sqlx::query(
            "CREATE TABLE users (\
                name VARCHAR(120) NOT NULL, \
                surname VARCHAR(120) NOT NULL, \
                email VARCHAR(254) NOT NULL, \
                CONSTRAINT users_email_key UNIQUE (email)\
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, record: &NormalizedRecord) -> InsertResult {
        let result = sqlx::query("INSERT INTO users (name, surname, email) VALUES ($1, $2, $3)")
            .bind(&record.name)
            .bind(&record.surname)
            .bind(&record.email)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => InsertResult::Inserted,
            Err(e) => InsertResult::Failed(e.to_string()),
        }
    }
}
