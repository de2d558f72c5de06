use crate::error::Result;
use crate::github::host::RepoHost;
use crate::github::types::RepoRecord;

/// Walks every page of the account's repositories, dropping forks.
///
/// Stops at the first empty page. A failed page aborts the walk and nothing
/// gathered from earlier pages is returned.
pub async fn try_list_repositories<H: RepoHost>(host: &H, per_page: u8) -> Result<Vec<RepoRecord>> {
    let mut repos = Vec::new();
    let mut page = 1u32;

    loop {
        let items = host.list_repos_page(page, per_page).await?;
        if items.is_empty() {
            break;
        }
        tracing::debug!(page, count = items.len(), "fetched repository page");
        repos.extend(items.into_iter().filter(|r| !r.fork));
        page += 1;
    }

    Ok(repos)
}

pub async fn list_repositories<H: RepoHost>(host: &H, per_page: u8) -> Vec<RepoRecord> {
    match try_list_repositories(host, per_page).await {
        Ok(repos) => repos,
        Err(e) => {
            tracing::error!("{e}");
            Vec::new()
        }
    }
}
