//! Repository implementations using SQLite.

mod entry_repository;
mod workspace_server_repository;

pub use entry_repository::SqliteEntryRepository;
pub use workspace_server_repository::SqliteWorkspaceServerRepository;

use chrono::{DateTime, Utc};

/// Parse a stored timestamp (RFC3339, or SQLite `datetime('now')` format).
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return dt.and_utc();
    }
    Utc::now()
}

/// Map a JSON column decode failure into a rusqlite error for `query_map`
pub(crate) fn json_column<T: serde::de::DeserializeOwned>(
    index: usize,
    raw: &str,
) -> rusqlite::Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// `UNIQUE` / primary key violations, as opposed to foreign key or `NOT NULL` ones
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
    )
}
