use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub const WORKSPACE: &str = "robert-demo-qvail";
pub const PROJECT: &str = "pokedex";
pub const VERSION: u32 = 14;

/// Secret credential for the dataset host. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One directory per class, images inside.
    Folder,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Folder => "folder",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetTarget {
    pub workspace: &'static str,
    pub project: &'static str,
    pub version: u32,
    pub format: ExportFormat,
}

impl DatasetTarget {
    pub const fn pokedex() -> Self {
        Self {
            workspace: WORKSPACE,
            project: PROJECT,
            version: VERSION,
            format: ExportFormat::Folder,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    pub name: String,
    /// Slug used in API paths.
    pub url: String,
    #[serde(default)]
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// `<workspace>/<project>`
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub versions: Vec<VersionSummary>,
}

impl Project {
    pub fn slug(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }

    pub fn workspace_slug(&self) -> &str {
        self.id.split('/').next().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionSummary {
    /// `<workspace>/<project>/<number>`
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Option<u64>,
    #[serde(default)]
    pub exports: Vec<String>,
}

impl VersionSummary {
    pub fn number(&self) -> Option<u32> {
        self.id.rsplit('/').next().and_then(|n| n.parse().ok())
    }
}

#[derive(Debug, Clone)]
pub struct Version {
    pub workspace: String,
    pub project: String,
    pub number: u32,
    pub name: Option<String>,
    pub images: Option<u64>,
    pub exports: Vec<String>,
}

impl Version {
    pub fn id(&self) -> String {
        format!("{}/{}/{}", self.workspace, self.project, self.number)
    }
}

/// A version materialized on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub version: u32,
    pub format: ExportFormat,
    pub location: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded {
        dataset: Dataset,
        files: usize,
        bytes: u64,
    },
    AlreadyPresent {
        dataset: Dataset,
    },
}

impl DownloadOutcome {
    pub fn dataset(&self) -> &Dataset {
        match self {
            DownloadOutcome::Downloaded { dataset, .. } => dataset,
            DownloadOutcome::AlreadyPresent { dataset } => dataset,
        }
    }

    pub fn transferred(&self) -> bool {
        matches!(self, DownloadOutcome::Downloaded { .. })
    }
}
