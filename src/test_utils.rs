#![cfg(test)]

use crate::config::Credentials;
use crate::error::{RepolangError, Result};
use crate::github::host::RepoHost;
use crate::github::types::{LanguageBreakdown, RepoRecord};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub fn repo(name: &str) -> RepoRecord {
    RepoRecord {
        name: name.to_string(),
        fork: false,
    }
}

pub fn fork(name: &str) -> RepoRecord {
    RepoRecord {
        name: name.to_string(),
        fork: true,
    }
}

pub fn breakdown(entries: &[(&str, u64)]) -> LanguageBreakdown {
    entries.iter().map(|&(lang, bytes)| (lang, bytes)).collect()
}

pub fn credentials() -> Credentials {
    Credentials {
        username: "octo".to_string(),
        token: "ghp_test".to_string(),
    }
}

/// Scripted host: page N answers with the Nth scripted page, anything past
/// the script is an empty page. Unknown repositories answer 404.
#[derive(Default)]
pub struct FakeHost {
    pages: Vec<std::result::Result<Vec<RepoRecord>, String>>,
    languages: HashMap<String, std::result::Result<LanguageBreakdown, String>>,
    pages_requested: RefCell<Vec<u32>>,
    last_per_page: Cell<Option<u8>>,
    language_requests: RefCell<Vec<(String, String)>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, repos: Vec<RepoRecord>) -> Self {
        self.pages.push(Ok(repos));
        self
    }

    pub fn failing_page(mut self, message: &str) -> Self {
        self.pages.push(Err(message.to_string()));
        self
    }

    pub fn languages(mut self, repo: &str, entries: &[(&str, u64)]) -> Self {
        self.languages.insert(repo.to_string(), Ok(breakdown(entries)));
        self
    }

    pub fn failing_languages(mut self, repo: &str, message: &str) -> Self {
        self.languages.insert(repo.to_string(), Err(message.to_string()));
        self
    }

    pub fn pages_requested(&self) -> Vec<u32> {
        self.pages_requested.borrow().clone()
    }

    pub fn last_per_page(&self) -> Option<u8> {
        self.last_per_page.get()
    }

    pub fn language_requests(&self) -> Vec<(String, String)> {
        self.language_requests.borrow().clone()
    }
}

impl RepoHost for FakeHost {
    async fn list_repos_page(&self, page: u32, per_page: u8) -> Result<Vec<RepoRecord>> {
        self.pages_requested.borrow_mut().push(page);
        self.last_per_page.set(Some(per_page));
        match self.pages.get(page as usize - 1) {
            Some(Ok(repos)) => Ok(repos.clone()),
            Some(Err(message)) => Err(RepolangError::UpstreamListing {
                page,
                message: message.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBreakdown> {
        self.language_requests
            .borrow_mut()
            .push((owner.to_string(), repo.to_string()));
        match self.languages.get(repo) {
            Some(Ok(breakdown)) => Ok(breakdown.clone()),
            Some(Err(message)) => Err(RepolangError::UpstreamDetail {
                repo: repo.to_string(),
                message: message.clone(),
            }),
            None => Err(RepolangError::UpstreamDetail {
                repo: repo.to_string(),
                message: "status 404 Not Found: Not Found".to_string(),
            }),
        }
    }
}
