/// All database primary keys are opaque hex strings generated at insert time.
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
