//! Submission capture.
//!
//! Records whatever a visitor submitted against a code before they are
//! forwarded. The referential check happens at call time: an unknown code is
//! `InvalidCode` and nothing is written. No dedup is performed; identical
//! repeated submissions are distinct records by design.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::{GatelinkError, Result};
use crate::storage::{FieldMap, SeaOrmStorage, Submission};

/// A freshly recorded submission plus the destination the visitor should be
/// forwarded to, so the caller can redirect without a second lookup.
#[derive(Debug, Clone)]
pub struct CaptureRecord {
    pub submission: Submission,
    pub destination: String,
}

pub struct CaptureService {
    storage: Arc<SeaOrmStorage>,
}

impl CaptureService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Record one submission against `code`.
    ///
    /// The whole record is written in a single insert; a partial submission
    /// is never observable. The field set is taken as-is, in submit order.
    pub async fn record(&self, code: &str, fields: FieldMap) -> Result<CaptureRecord> {
        let link = self.storage.get_link(code).await?.ok_or_else(|| {
            GatelinkError::invalid_code(format!(
                "cannot record a submission against unknown code '{}'",
                code
            ))
        })?;

        let submission = Submission {
            id: Uuid::new_v4().to_string(),
            code: link.code.clone(),
            fields,
            captured_at: Utc::now(),
        };

        self.storage.insert_submission(&submission).await?;

        info!(
            "Submission {} recorded against '{}' ({} fields)",
            submission.id,
            submission.code,
            submission.fields.len()
        );

        Ok(CaptureRecord {
            submission,
            destination: link.destination,
        })
    }
}
