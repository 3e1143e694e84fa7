/// Farm and pond primary keys are UUIDs generated on insert.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Resolve an id received from a client.
///
/// Clients treat ids as opaque strings, so anything that is not a UUID simply
/// names no row and yields `None`.
pub fn parse_id(raw: &str) -> Option<DbId> {
    DbId::parse_str(raw.trim()).ok()
}
