use crate::error::Result;
use crate::github::types::{LanguageBreakdown, RepoRecord};

/// The two read-only endpoints the pipeline needs from a source-control host.
///
/// Listing failures must come back as `UpstreamListing` and language failures
/// as `UpstreamDetail`; callers recover from them differently.
pub trait RepoHost {
    async fn list_repos_page(&self, page: u32, per_page: u8) -> Result<Vec<RepoRecord>>;

    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBreakdown>;
}
