/// Free-form JSON object used to carry fields a model does not name.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
