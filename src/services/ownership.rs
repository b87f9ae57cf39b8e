//! Ownership-scoped submission queries.
//!
//! The one correctness property that matters for the whole system lives
//! here: an operator can never observe a submission whose owning link
//! belongs to a different operator. The query is an explicit two-step
//! lookup — resolve the owned code set, then fetch submissions inside that
//! set — so the isolation check is a single auditable membership test
//! rather than something implicit in query construction.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::errors::{GatelinkError, Result};
use crate::storage::{FieldMap, SeaOrmStorage};

/// Listing parameters. `code` is untrusted input: it may name any code in
/// the system, including another operator's.
#[derive(Debug, Clone, Default)]
pub struct SubmissionQuery {
    pub code: Option<String>,
    pub page: u64,
    pub page_size: u64,
}

/// A submission joined to its link's label for presentation. The label is
/// absent when the link never had one; submissions never fail to list over
/// a missing label.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedSubmission {
    pub id: String,
    pub code: String,
    pub label: Option<String>,
    pub fields: FieldMap,
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

pub struct OwnershipService {
    storage: Arc<SeaOrmStorage>,
}

impl OwnershipService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// List submissions reachable from codes owned by `owner`, newest first.
    ///
    /// A code filter outside the owned set fails with `Forbidden` before any
    /// submission data is touched. This is the tenant-isolation enforcement
    /// point; every console read of submissions goes through it.
    pub async fn list_submissions_for_owner(
        &self,
        owner: &str,
        query: SubmissionQuery,
    ) -> Result<(Vec<OwnedSubmission>, u64)> {
        let owned = self.storage.links_by_owner(owner).await?;

        let labels: HashMap<String, Option<String>> = owned
            .iter()
            .map(|link| (link.code.clone(), link.label.clone()))
            .collect();

        let codes: Vec<String> = match query.code {
            Some(filter) => {
                if !labels.contains_key(&filter) {
                    warn!(
                        "Operator '{}' requested submissions for code '{}' outside their owned set",
                        owner, filter
                    );
                    return Err(GatelinkError::forbidden(format!(
                        "code '{}' is not owned by this operator",
                        filter
                    )));
                }
                vec![filter]
            }
            None => owned.into_iter().map(|link| link.code).collect(),
        };

        if codes.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let (submissions, total) = self
            .storage
            .list_submissions(&codes, query.page, query.page_size)
            .await?;

        let rows = submissions
            .into_iter()
            .map(|sub| {
                let label = labels.get(&sub.code).cloned().flatten();
                OwnedSubmission {
                    id: sub.id,
                    code: sub.code,
                    label,
                    fields: sub.fields,
                    captured_at: sub.captured_at,
                }
            })
            .collect();

        Ok((rows, total))
    }
}
