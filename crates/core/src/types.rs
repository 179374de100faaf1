/// Primary keys across the schema are PostgreSQL `BIGSERIAL`.
pub type DbId = i64;

/// Timestamps are always UTC; clients see them as RFC 3339 strings.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
