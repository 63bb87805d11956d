pub mod analysis;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod query;
pub mod server;
pub mod taxonomy;

pub use analysis::ProfileAnalyzer;
pub use cache::AnalysisCache;
pub use config::Config;
pub use error::{Error, Result};
pub use github::{GitHubClient, PlatformClient};
