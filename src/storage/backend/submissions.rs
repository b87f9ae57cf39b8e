//! Submission store operations.
//!
//! Submissions are append-only: one INSERT per capture, no updates, no
//! cascade from link deletion.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{model_to_submission, submission_to_active_model};
use super::retry;
use crate::errors::{GatelinkError, Result};
use crate::storage::Submission;

use migration::entities::submission;

impl SeaOrmStorage {
    /// Append one submission in a single insert. Either the whole record is
    /// written or none of it.
    pub async fn insert_submission(&self, sub: &Submission) -> Result<()> {
        let db = &self.db;
        let active_model = submission_to_active_model(sub)?;

        retry::with_retry(
            &format!("insert_submission({})", sub.id),
            self.retry_config(),
            || async { submission::Entity::insert(active_model.clone()).exec(db).await },
        )
        .await
        .map_err(|e| {
            GatelinkError::database_operation(format!(
                "failed to record submission for '{}': {}",
                sub.code, e
            ))
        })?;

        self.invalidate_count_cache();
        debug!("Submission recorded: {} against {}", sub.id, sub.code);
        Ok(())
    }

    /// Submissions for a set of codes, capture time descending.
    ///
    /// The caller is responsible for `codes` being an ownership-checked set;
    /// this layer only filters and orders.
    pub async fn list_submissions(
        &self,
        codes: &[String],
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Submission>, u64)> {
        if codes.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let db = &self.db;
        let cache_key = format!("subs:codes={}", codes.join(","));

        let total = if let Some(cached) = self.count_cache().get(&cache_key) {
            debug!("count cache hit: key={}, value={}", cache_key, cached);
            cached
        } else {
            let count = retry::with_retry(
                "list_submissions(count)",
                self.retry_config(),
                || async {
                    submission::Entity::find()
                        .filter(submission::Column::Code.is_in(codes.iter().cloned()))
                        .count(db)
                        .await
                },
            )
            .await
            .map_err(|e| {
                GatelinkError::database_operation(format!(
                    "failed to count submissions: {}",
                    e
                ))
            })?;
            self.count_cache().insert(cache_key, count);
            count
        };

        let page_offset = page.saturating_sub(1);
        let models = retry::with_retry(
            "list_submissions(data)",
            self.retry_config(),
            || async {
                submission::Entity::find()
                    .filter(submission::Column::Code.is_in(codes.iter().cloned()))
                    .order_by_desc(submission::Column::CapturedAt)
                    .paginate(db, page_size)
                    .fetch_page(page_offset)
                    .await
            },
        )
        .await
        .map_err(|e| {
            GatelinkError::database_operation(format!("failed to list submissions: {}", e))
        })?;

        let submissions = models
            .into_iter()
            .map(model_to_submission)
            .collect::<Result<Vec<_>>>()?;

        Ok((submissions, total))
    }
}
