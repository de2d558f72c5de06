use crate::config::{Config, Credentials};
use crate::error::RepolangError;
use crate::github::host::RepoHost;
use crate::github::listing::list_repositories;
use crate::languages::aggregate::aggregate_languages;
use crate::readme::section::{update_file, SectionMarkers, UpdateStatus};
use crate::readme::table::render_table;

#[derive(Debug)]
pub enum RunOutcome {
    Updated,
    Unchanged,
    DryRun(String),
    NoRepositories,
    NoLanguageData,
    MarkerMissing,
    Failed(RepolangError),
}

impl RunOutcome {
    pub fn report(&self) {
        match self {
            RunOutcome::Updated => tracing::info!("language table updated"),
            RunOutcome::Unchanged => tracing::info!("language table already current"),
            RunOutcome::DryRun(table) => print!("{table}"),
            RunOutcome::NoRepositories => {
                tracing::warn!("no repositories found or error occurred while fetching repositories")
            }
            RunOutcome::NoLanguageData => tracing::warn!("no language data to report"),
            RunOutcome::MarkerMissing => tracing::warn!("section markers not found, nothing written"),
            RunOutcome::Failed(e) => tracing::error!("{e}"),
        }
    }
}

pub struct App<'a, H: RepoHost> {
    config: &'a Config,
    credentials: &'a Credentials,
    host: &'a H,
    dry_run: bool,
}

impl<'a, H: RepoHost> App<'a, H> {
    pub fn new(config: &'a Config, credentials: &'a Credentials, host: &'a H) -> Self {
        Self {
            config,
            credentials,
            host,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Lists repositories, aggregates their languages and rewrites the
    /// configured README section, strictly in that order.
    pub async fn run(&self) -> RunOutcome {
        let repos = list_repositories(self.host, self.config.per_page).await;
        if repos.is_empty() {
            return RunOutcome::NoRepositories;
        }
        tracing::info!(count = repos.len(), "found repositories");

        let shares = aggregate_languages(self.host, self.credentials, &repos).await;
        if shares.is_empty() {
            return RunOutcome::NoLanguageData;
        }

        if self.dry_run {
            return RunOutcome::DryRun(render_table(&shares));
        }

        let markers = SectionMarkers::new(&self.config.section);
        match update_file(&self.config.readme_path, &markers, &shares) {
            Ok(UpdateStatus::Updated) => RunOutcome::Updated,
            Ok(UpdateStatus::Unchanged) => RunOutcome::Unchanged,
            Ok(UpdateStatus::NoData) => RunOutcome::NoLanguageData,
            Ok(UpdateStatus::MarkerMissing) => RunOutcome::MarkerMissing,
            Err(e) => RunOutcome::Failed(e),
        }
    }
}
