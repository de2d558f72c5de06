use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepolangError {
    #[error("config error: {0}")]
    Configuration(String),

    #[error("listing repositories failed on page {page}: {message}")]
    UpstreamListing { page: u32, message: String },

    #[error("fetching languages for {repo} failed: {message}")]
    UpstreamDetail { repo: String, message: String },

    #[error("github client error: {0}")]
    Client(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RepolangError>;
