pub mod acquire;

pub use crate::domain::model::{
    ApiKey, Dataset, DatasetTarget, DownloadOutcome, ExportFormat, Project, Version, Workspace,
};
pub use crate::domain::ports::DatasetHost;
pub use crate::utils::error::Result;
