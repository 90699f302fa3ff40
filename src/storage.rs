use chrono::{DateTime, TimeZone, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::domain::{email_batch_query::EmailBatchQuery, email_entry::EmailEntry};

#[derive(thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Query(#[from] sqlx::Error),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Stored record for {email} is corrupt: {reason}")]
    CorruptRow { email: String, reason: String },
}

impl std::fmt::Debug for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

/// Creates the `emails` table if it does not exist yet.
#[tracing::instrument(name = "Ensure the emails table exists", skip(db_pool))]
pub async fn ensure_schema(db_pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS emails (
            id INTEGER PRIMARY KEY,
            email TEXT UNIQUE,
            confirmed_at INTEGER,
            opt_out INTEGER
        )
        "#,
    )
    .execute(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to create emails table: {:?}", err);
        err
    })?;

    Ok(())
}

#[tracing::instrument(name = "Insert a new email into the database", skip(db_pool))]
pub async fn create_email(db_pool: &SqlitePool, email: &str) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        INSERT INTO emails (email, confirmed_at, opt_out)
        VALUES (?1, 0, 0)
        "#,
    )
    .bind(email)
    .execute(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })?;

    Ok(())
}

/// Looks up a single entry by exact email match. A missing row is `Ok(None)`;
/// only a failing query is an error.
#[tracing::instrument(name = "Get an email from the database", skip(db_pool))]
pub async fn get_email(
    db_pool: &SqlitePool,
    email: &str,
) -> Result<Option<EmailEntry>, StorageError> {
    let row = sqlx::query(
        r#"
        SELECT id, email, confirmed_at, opt_out
        FROM emails
        WHERE email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })?;

    row.map(|row| email_entry_from_row(&row)).transpose()
}

/// Inserts the entry, or overwrites `confirmed_at` and `opt_out` of the row
/// that already holds the same email.
#[tracing::instrument(
    name = "Upsert an email into the database",
    skip(db_pool, entry),
    fields(
        email_id = %entry.id,
        email = %entry.email
    )
)]
pub async fn update_email(db_pool: &SqlitePool, entry: &EmailEntry) -> Result<(), StorageError> {
    let confirmed_at = entry.confirmed_at.ok_or_else(|| {
        StorageError::InvalidArgument(format!(
            "ConfirmedAt field is required to update {}",
            entry.email
        ))
    })?;

    sqlx::query(
        r#"
        INSERT INTO emails (id, email, confirmed_at, opt_out)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(email) DO UPDATE SET
            confirmed_at = ?3,
            opt_out = ?4
        "#,
    )
    .bind(entry.id)
    .bind(&entry.email)
    .bind(confirmed_at.timestamp())
    .bind(entry.opt_out)
    .execute(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })?;

    Ok(())
}

/// Marks the entry as opted out. Unknown emails are left alone.
#[tracing::instrument(name = "Opt out an email in the database", skip(db_pool))]
pub async fn delete_email(db_pool: &SqlitePool, email: &str) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        UPDATE emails
        SET opt_out = 1
        WHERE email = ?1
        "#,
    )
    .bind(email)
    .execute(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })?;

    Ok(())
}

#[tracing::instrument(
    name = "Get a page of emails from the database",
    skip(db_pool, query),
    fields(
        page = %query.page(),
        count = %query.count()
    )
)]
pub async fn get_email_batch(
    db_pool: &SqlitePool,
    query: &EmailBatchQuery,
) -> Result<Vec<EmailEntry>, StorageError> {
    let rows = sqlx::query(
        r#"
        SELECT id, email, confirmed_at, opt_out
        FROM emails
        WHERE opt_out = 0
        ORDER BY id ASC
        LIMIT ?1 OFFSET ?2
        "#,
    )
    .bind(query.count())
    .bind(query.offset())
    .fetch_all(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })?;

    rows.iter().map(email_entry_from_row).collect()
}

fn email_entry_from_row(row: &SqliteRow) -> Result<EmailEntry, StorageError> {
    let id: i64 = row.try_get("id")?;
    let email: String = row.try_get("email")?;
    let confirmed_at: Option<i64> = row.try_get("confirmed_at")?;
    let opt_out: i64 = row.try_get("opt_out")?;

    let confirmed_at = confirmed_at
        .map(|seconds| timestamp_from_seconds(&email, seconds))
        .transpose()?;

    Ok(EmailEntry {
        id,
        email,
        confirmed_at,
        opt_out: opt_out != 0,
    })
}

fn timestamp_from_seconds(email: &str, seconds: i64) -> Result<DateTime<Utc>, StorageError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| StorageError::CorruptRow {
            email: email.to_string(),
            reason: format!("{} is not a valid unix timestamp", seconds),
        })
}
