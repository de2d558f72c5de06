mod app;
mod config;
mod error;
mod github;
mod languages;
mod readme;
#[cfg(test)]
mod test_utils;

use app::App;
use clap::Parser;
use config::{Config, Overrides};
use github::client::GitHubClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "repolang",
    about = "Refresh the language table in a README from your GitHub repositories"
)]
struct Cli {
    #[arg(long, short, help = "GitHub account to scan (defaults to GITHUB_USERNAME)")]
    username: Option<String>,

    #[arg(long, short, help = "File containing the section markers")]
    readme: Option<PathBuf>,

    #[arg(long, help = "Section name used in the START_SECTION/END_SECTION markers")]
    section: Option<String>,

    #[arg(long, help = "GitHub API base URL, for GitHub Enterprise")]
    api_url: Option<String>,

    #[arg(long, help = "Print the table instead of writing the file")]
    dry_run: bool,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "repolang=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

// Every failure is logged and the process still exits 0.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    let config = match Config::load(Overrides {
        username: cli.username,
        readme_path: cli.readme,
        section: cli.section,
        api_base_url: cli.api_url,
    }) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            return;
        }
    };
    tracing::debug!(?config, "loaded configuration");

    let credentials = match config.credentials() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            return;
        }
    };

    let client = match GitHubClient::new(&credentials, config.api_base_url.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            return;
        }
    };

    App::new(&config, &credentials, &client)
        .dry_run(cli.dry_run)
        .run()
        .await
        .report();
}
