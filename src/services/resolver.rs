//! Code resolution.
//!
//! Pure read through the link store: a code either maps to its destination
//! or the lookup is `NotFound`. What to render for a miss is the caller's
//! problem; this layer only signals the condition.

use std::sync::Arc;

use crate::errors::{GatelinkError, Result};
use crate::storage::SeaOrmStorage;

pub struct ResolverService {
    storage: Arc<SeaOrmStorage>,
}

impl ResolverService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Resolve a code to its destination URL. No side effects.
    pub async fn resolve(&self, code: &str) -> Result<String> {
        match self.storage.get_link(code).await? {
            Some(link) => Ok(link.destination),
            None => Err(GatelinkError::not_found(format!(
                "no link for code '{}'",
                code
            ))),
        }
    }
}
