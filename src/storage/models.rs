use serde::{Deserialize, Serialize};

/// Captured form fields, in the order the visitor's client submitted them.
/// `serde_json` is built with `preserve_order`, so the map keeps insertion
/// order through storage round-trips. No fixed field set is assumed.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// A short code mapped to a destination URL, owned by one operator.
/// Write-once: code, owner and destination never change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub code: String,
    pub owner: String,
    pub destination: String,
    pub label: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One recorded form submission against a link's code.
///
/// Append-only. The code is checked to resolve at record time, but there is
/// no foreign key: the link may be deleted later and the submission stays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub code: String,
    pub fields: FieldMap,
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageInfo {
    pub backend: String,
}
