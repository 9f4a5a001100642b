pub mod error;
pub mod naming;
pub mod record;
pub mod store;
pub mod version;

pub use error::{CollectError, Result};
pub use naming::JobNaming;
pub use record::{BuildResult, BuildStatus, FinishedFile, JobResult, ResultRecord};
pub use store::{ResultStore, DATA_FILE};
pub use version::{gpu_suffix_to_display_version, JobPathMatch, JobPattern};

/// Número de pull request.
pub type PrNumber = u64;
