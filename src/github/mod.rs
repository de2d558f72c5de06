pub mod client;
pub mod host;
pub mod listing;
pub mod types;
