//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod conversations;
pub mod expert;
pub mod messages;
pub mod updates;

use peerline_core::error::CoreError;
use peerline_core::types::{DbId, Timestamp};

use crate::error::AppError;

/// Parse a path/body id (exchanged as text on the wire) into a database id.
///
/// An unparsable id is indistinguishable from a nonexistent resource, so it
/// maps to the same not-found signal.
pub(crate) fn parse_id(raw: &str, entity: &'static str) -> Result<DbId, AppError> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::Core(CoreError::NotFound { entity }))
}

/// Parse an optional `since` polling cursor (RFC 3339 / ISO 8601).
pub(crate) fn parse_since(raw: Option<&str>) -> Result<Option<Timestamp>, AppError> {
    match raw {
        None => Ok(None),
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&chrono::Utc)))
            .map_err(|_| {
                AppError::BadRequest("Invalid timestamp format. Use ISO 8601 format.".into())
            }),
    }
}
