//! Trait abstraction for the backstage client to enable mocking in tests

use super::check::UniquenessQuery;
use crate::state::FormSnapshot;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for backstage server operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackstageClientTrait: Send + Sync {
    /// Ask whether an email or username is still available
    ///
    /// `Ok(true)` means available. Any non-boolean answer is an error.
    async fn is_unique(&self, query: &UniquenessQuery) -> Result<bool>;

    /// POST a validated form to a backstage path
    async fn submit_form(&self, path: &str, form: &FormSnapshot) -> Result<()>;

    /// Record one read of a post
    async fn increment_read_count(&self, post_uid: &str) -> Result<()>;
}
