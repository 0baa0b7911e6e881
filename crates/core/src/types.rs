/// Record ids are opaque strings on the wire and in storage.
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh record id.
///
/// UUIDv7 keeps ids roughly creation-ordered while staying collision
/// resistant under concurrent creates.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::now_v7().to_string()
}
