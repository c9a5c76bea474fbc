use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::models::{Event, EventCategory, EventImage, User, UserSettings};

pub mod collection;
pub mod migrator;
pub mod seeding;

pub use collection::{Collection, Document, Filter, Stored};
pub use seeding::{SeedOutcome, seed_if_empty};

/// Errors raised by the document store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    /// A unique index rejected the write; carries the driver message,
    /// which names the index.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("stored document has a malformed id '{0}'")]
    CorruptId(String),
}

impl StoreError {
    #[must_use]
    pub fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::UniqueViolation(message),
            _ => Self::Db(err),
        }
    }
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Closes every pooled connection.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    #[must_use]
    pub fn collection<T: Document>(&self) -> Collection<T> {
        Collection::new(self.conn.clone())
    }

    #[must_use]
    pub fn events(&self) -> Collection<Event> {
        self.collection()
    }

    #[must_use]
    pub fn categories(&self) -> Collection<EventCategory> {
        self.collection()
    }

    #[must_use]
    pub fn images(&self) -> Collection<EventImage> {
        self.collection()
    }

    #[must_use]
    pub fn users(&self) -> Collection<User> {
        self.collection()
    }

    #[must_use]
    pub fn user_settings(&self) -> Collection<UserSettings> {
        self.collection()
    }
}
