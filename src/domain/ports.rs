use crate::domain::model::{DownloadOutcome, ExportFormat, Project, Version, Workspace};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Remote dataset host, addressed as workspace / project / version.
#[async_trait]
pub trait DatasetHost: Send + Sync {
    async fn workspace(&self, name: &str) -> Result<Workspace>;
    async fn project(&self, workspace: &Workspace, name: &str) -> Result<Project>;
    async fn version(&self, project: &Project, number: u32) -> Result<Version>;
    async fn download(
        &self,
        version: &Version,
        format: ExportFormat,
        location: &Path,
        overwrite: bool,
    ) -> Result<DownloadOutcome>;
}
