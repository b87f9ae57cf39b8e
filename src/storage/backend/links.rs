//! Link store operations.
//!
//! `insert_link` is a plain INSERT: the primary-key constraint on `code` is
//! what arbitrates concurrent creates, and a violation comes back as
//! `Collision` so the create flow can retry with a fresh candidate.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{link_to_active_model, model_to_link};
use super::retry::{self, is_unique_violation};
use crate::errors::{GatelinkError, Result};
use crate::storage::Link;

use migration::entities::link;

impl SeaOrmStorage {
    /// Insert a new link. Fails with `Collision` when the code is taken.
    pub async fn insert_link(&self, new_link: &Link) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("insert_link({})", new_link.code),
            self.retry_config(),
            || async { link::Entity::insert(link_to_active_model(new_link)).exec(db).await },
        )
        .await;

        match result {
            Ok(_) => {
                self.invalidate_count_cache();
                info!("Link created: {} -> {}", new_link.code, new_link.destination);
                Ok(())
            }
            Err(e) if is_unique_violation(&e) => Err(GatelinkError::collision(format!(
                "code '{}' is already taken",
                new_link.code
            ))),
            Err(e) => Err(GatelinkError::database_operation(format!(
                "failed to insert link '{}': {}",
                new_link.code, e
            ))),
        }
    }

    /// Point lookup by code. Store failures propagate; they are not `None`.
    pub async fn get_link(&self, code: &str) -> Result<Option<Link>> {
        let db = &self.db;
        let code_owned = code.to_string();

        let model = retry::with_retry(
            &format!("get_link({})", code),
            self.retry_config(),
            || async { link::Entity::find_by_id(&code_owned).one(db).await },
        )
        .await
        .map_err(|e| {
            GatelinkError::database_operation(format!("failed to look up '{}': {}", code, e))
        })?;

        Ok(model.map(model_to_link))
    }

    /// All links owned by one operator, in creation order.
    pub async fn links_by_owner(&self, owner: &str) -> Result<Vec<Link>> {
        let db = &self.db;
        let owner_owned = owner.to_string();

        let models = retry::with_retry(
            "links_by_owner",
            self.retry_config(),
            || async {
                link::Entity::find()
                    .filter(link::Column::Owner.eq(&owner_owned))
                    .order_by_asc(link::Column::CreatedAt)
                    .all(db)
                    .await
            },
        )
        .await
        .map_err(|e| {
            GatelinkError::database_operation(format!(
                "failed to load links for owner '{}': {}",
                owner, e
            ))
        })?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// Paginated owner listing for the console, newest first.
    pub async fn list_links_by_owner(
        &self,
        owner: &str,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Link>, u64)> {
        let db = &self.db;
        let owner_owned = owner.to_string();
        let cache_key = format!("links:owner={}", owner);

        let total = if let Some(cached) = self.count_cache().get(&cache_key) {
            debug!("count cache hit: key={}, value={}", cache_key, cached);
            cached
        } else {
            let count = retry::with_retry(
                "list_links_by_owner(count)",
                self.retry_config(),
                || async {
                    link::Entity::find()
                        .filter(link::Column::Owner.eq(&owner_owned))
                        .count(db)
                        .await
                },
            )
            .await
            .map_err(|e| {
                GatelinkError::database_operation(format!(
                    "failed to count links for owner '{}': {}",
                    owner, e
                ))
            })?;
            self.count_cache().insert(cache_key, count);
            count
        };

        let page_offset = page.saturating_sub(1);
        let models = retry::with_retry(
            "list_links_by_owner(data)",
            self.retry_config(),
            || async {
                link::Entity::find()
                    .filter(link::Column::Owner.eq(&owner_owned))
                    .order_by_desc(link::Column::CreatedAt)
                    .paginate(db, page_size)
                    .fetch_page(page_offset)
                    .await
            },
        )
        .await
        .map_err(|e| {
            GatelinkError::database_operation(format!(
                "failed to list links for owner '{}': {}",
                owner, e
            ))
        })?;

        Ok((models.into_iter().map(model_to_link).collect(), total))
    }

    /// Remove a link. Submissions recorded against it are left untouched.
    pub async fn delete_link(&self, code: &str) -> Result<()> {
        let db = &self.db;
        let code_owned = code.to_string();

        let result = retry::with_retry(
            &format!("delete_link({})", code),
            self.retry_config(),
            || async { link::Entity::delete_by_id(&code_owned).exec(db).await },
        )
        .await
        .map_err(|e| {
            GatelinkError::database_operation(format!("failed to delete link '{}': {}", code, e))
        })?;

        if result.rows_affected == 0 {
            return Err(GatelinkError::not_found(format!("link not found: {}", code)));
        }

        self.invalidate_count_cache();
        info!("Link deleted: {}", code);
        Ok(())
    }
}
