pub mod cli;
pub mod config;
pub mod github;
mod http;
pub mod pipeline;
pub mod resolver;
pub mod storage;
pub mod walker;

#[cfg(test)]
mod testing;

pub use github::{GitHubClient, PullRequestSource};
pub use pipeline::{MergeMode, PrSelector, RunOptions, RunSummary};
pub use resolver::JobResolver;
pub use storage::{GcsClient, ObjectMeta, ObjectStore};
pub use walker::HistoryWalker;
