use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{ContactId, ContactMessage, StoredContactMessage};

/// Durable sink for accepted contact messages.
///
/// Implementations must either store the whole record or report failure;
/// callers never retry.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<ContactId>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;
        Self::connect(database_url, true).await
    }

    /// Opens a database that must already exist. Nothing is created on disk.
    pub async fn open_existing(database_url: &str) -> Result<Self> {
        if let Some(path) = sqlite_path(database_url) {
            if !path.exists() {
                bail!("database file '{}' does not exist", path.display());
            }
        }
        Self::connect(database_url, false).await
    }

    async fn connect(database_url: &str, create_if_missing: bool) -> Result<Self> {
        let connect_options =
            SqliteConnectOptions::from_str(database_url)?.create_if_missing(create_if_missing);
        let mut pool_options = SqlitePoolOptions::new().max_connections(5);
        if is_memory_url(database_url) {
            // Every connection to `sqlite::memory:` opens its own database, so
            // keep exactly one alive for the lifetime of the pool.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(connect_options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Newest first. Ties on timestamp fall back to insertion order.
    pub async fn list_contact_messages(&self, limit: u32) -> Result<Vec<StoredContactMessage>> {
        let rows = sqlx::query(
            "SELECT id, name, email, message, created_at
             FROM contact_messages
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .context("failed to list contact messages")?;

        rows.into_iter()
            .map(|row| -> Result<StoredContactMessage> {
                Ok(StoredContactMessage {
                    contact_id: ContactId(row.try_get::<i64, _>("id")?),
                    name: row.try_get("name")?,
                    email: row.try_get("email")?,
                    message: row.try_get("message")?,
                    timestamp: row.try_get::<DateTime<Utc>, _>("created_at")?,
                })
            })
            .collect()
    }

    pub async fn count_contact_messages(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.pool)
            .await
            .context("failed to count contact messages")?;
        Ok(count)
    }
}

#[async_trait]
impl ContactStore for Storage {
    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<ContactId> {
        let rec = sqlx::query(
            "INSERT INTO contact_messages (name, email, message, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(message.timestamp)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert contact message")?;
        Ok(ContactId(rec.get::<i64, _>(0)))
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_memory_url(database_url) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
