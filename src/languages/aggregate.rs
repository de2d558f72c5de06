use crate::config::Credentials;
use crate::github::host::RepoHost;
use crate::github::types::RepoRecord;
use crate::languages::tally::{LanguageShares, LanguageTally};

/// Sums every repository's language breakdown and converts the result to
/// shares of the grand total.
///
/// A repository whose breakdown cannot be fetched is logged and left out;
/// the rest still count.
pub async fn aggregate_languages<H: RepoHost>(
    host: &H,
    credentials: &Credentials,
    repos: &[RepoRecord],
) -> LanguageShares {
    let mut tally = LanguageTally::new();

    for repo in repos {
        match host.repo_languages(&credentials.username, &repo.name).await {
            Ok(breakdown) => tally.add_breakdown(&breakdown),
            Err(e) => {
                tracing::warn!("{e}");
                continue;
            }
        }
    }

    let shares = tally.percentages();
    tracing::info!(
        repos = repos.len(),
        languages = shares.len(),
        total_bytes = tally.total_bytes(),
        "aggregated language usage"
    );
    shares
}
