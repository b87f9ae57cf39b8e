//! Link management service
//!
//! Operator-facing create/list/get/delete for links. Creation owns the
//! collision-retry loop: the store reports `Collision`, this layer decides
//! whether to retry with a fresh candidate or surface the failure.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::get_config;
use crate::errors::{GatelinkError, Result};
use crate::storage::{Link, SeaOrmStorage};
use crate::utils::url_validator::validate_destination;
use crate::utils::{generate_random_code, is_reserved_code, is_valid_code};

/// Request to create a new link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Short code (optional, generated if not provided)
    pub code: Option<String>,
    /// Destination URL
    pub destination: String,
    /// Optional display label
    pub label: Option<String>,
}

/// Result of link creation
#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub link: Link,
    /// Whether the code was auto-generated
    pub generated_code: bool,
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    fn code_length(&self) -> usize {
        get_config().codes.length
    }

    fn max_generation_attempts(&self) -> u32 {
        get_config().codes.max_generation_attempts
    }

    /// Create a new link for `owner`.
    ///
    /// A custom code gets exactly one insert attempt and `Collision`
    /// surfaces to the caller. A generated code retries with a fresh
    /// candidate per collision, bounded: collisions are astronomically rare
    /// at the alphabet size, so exhausting the bound means something is
    /// systemically wrong and the flow fails with `CodeAllocation`.
    pub async fn create_link(
        &self,
        owner: &str,
        req: CreateLinkRequest,
    ) -> Result<LinkCreateResult> {
        validate_destination(&req.destination)
            .map_err(|e| GatelinkError::validation(e.to_string()))?;

        match req.code.clone().filter(|c| !c.is_empty()) {
            Some(code) => {
                if !is_valid_code(&code) {
                    return Err(GatelinkError::validation(format!(
                        "invalid code '{}'. Only alphanumeric, underscore and hyphen allowed, max 64 chars",
                        code
                    )));
                }
                if is_reserved_code(&code) {
                    return Err(GatelinkError::validation(format!(
                        "code '{}' conflicts with reserved routes",
                        code
                    )));
                }

                let link = self.build_link(owner, code, &req);
                self.storage.insert_link(&link).await?;
                Ok(LinkCreateResult {
                    link,
                    generated_code: false,
                })
            }
            None => {
                let max_attempts = self.max_generation_attempts();
                for attempt in 1..=max_attempts {
                    let candidate = generate_random_code(self.code_length());
                    let link = self.build_link(owner, candidate, &req);

                    match self.storage.insert_link(&link).await {
                        Ok(()) => {
                            return Ok(LinkCreateResult {
                                link,
                                generated_code: true,
                            });
                        }
                        Err(GatelinkError::Collision(_)) => {
                            warn!(
                                "Generated code '{}' collided (attempt {}/{}), regenerating",
                                link.code, attempt, max_attempts
                            );
                        }
                        Err(e) => return Err(e),
                    }
                }

                Err(GatelinkError::code_allocation(format!(
                    "failed to allocate a unique code after {} attempts",
                    max_attempts
                )))
            }
        }
    }

    fn build_link(&self, owner: &str, code: String, req: &CreateLinkRequest) -> Link {
        Link {
            code,
            owner: owner.to_string(),
            destination: req.destination.trim().to_string(),
            label: req.label.clone().filter(|l| !l.is_empty()),
            created_at: Utc::now(),
        }
    }

    /// Fetch one of the operator's own links. Another operator's code is
    /// `Forbidden`, not `NotFound`: the link exists, it just isn't theirs.
    pub async fn get_link_for_owner(&self, owner: &str, code: &str) -> Result<Link> {
        let link = self
            .storage
            .get_link(code)
            .await?
            .ok_or_else(|| GatelinkError::not_found(format!("link not found: {}", code)))?;

        if link.owner != owner {
            warn!(
                "Operator '{}' denied access to link '{}' owned by another operator",
                owner, code
            );
            return Err(GatelinkError::forbidden(format!(
                "link '{}' belongs to another operator",
                code
            )));
        }

        Ok(link)
    }

    /// Paginated listing of the operator's own links, newest first.
    pub async fn list_links(
        &self,
        owner: &str,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Link>, u64)> {
        self.storage.list_links_by_owner(owner, page, page_size).await
    }

    /// Delete one of the operator's own links. Submissions already recorded
    /// against it are kept.
    pub async fn delete_link(&self, owner: &str, code: &str) -> Result<()> {
        self.get_link_for_owner(owner, code).await?;
        self.storage.delete_link(code).await?;
        info!("Operator '{}' deleted link '{}'", owner, code);
        Ok(())
    }
}
