/// Every row in the hosted store is keyed by a UUID (profiles share the
/// auth user's id).
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without a time component (task due dates).
pub type Date = chrono::NaiveDate;
