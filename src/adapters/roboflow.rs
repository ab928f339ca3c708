use crate::domain::destination;
use crate::domain::model::{
    ApiKey, Dataset, DownloadOutcome, ExportFormat, Project, Version, VersionSummary, Workspace,
};
use crate::domain::ports::DatasetHost;
use crate::utils::archive;
use crate::utils::error::{AcquireError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use url::Url;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    workspace: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceResponse {
    workspace: Workspace,
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    project: Project,
    #[serde(default)]
    versions: Vec<VersionSummary>,
}

#[derive(Debug, Deserialize)]
struct ExportResponse {
    #[serde(default)]
    export: Option<ExportLink>,
}

#[derive(Debug, Deserialize)]
struct ExportLink {
    #[serde(default)]
    link: Option<String>,
}

/// Client for the Roboflow REST API.
pub struct RoboflowClient {
    client: Client,
    api_key: ApiKey,
    api_url: String,
    default_workspace: Option<String>,
}

impl RoboflowClient {
    /// Builds a client and checks the key against the API root.
    pub async fn connect(api_key: ApiKey, api_url: String) -> Result<Self> {
        let mut client = Self {
            client: Client::new(),
            api_key,
            api_url,
            default_workspace: None,
        };

        let url = client.endpoint(&[])?;
        tracing::debug!("Authenticating against {}", url.path());
        let response = client
            .client
            .post(url)
            .send()
            .await
            .map_err(AcquireError::http)?;
        let auth: AuthResponse = read_json(response).await?;

        if let Some(workspace) = &auth.workspace {
            tracing::debug!("API key belongs to workspace '{}'", workspace);
        }
        client.default_workspace = auth.workspace;
        tracing::info!("🔑 Authenticated with Roboflow");
        Ok(client)
    }

    /// Workspace the key was issued for, as reported at connect time.
    pub fn default_workspace(&self) -> Option<&str> {
        self.default_workspace.as_deref()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)?;
        url.path_segments_mut()
            .map_err(|_| AcquireError::ConfigError {
                message: format!("API URL '{}' cannot carry a path", self.api_url),
            })?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("api_key", self.api_key.expose());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        tracing::debug!("GET {}", url.path());
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(AcquireError::http)?;
        read_json(response).await
    }

    async fn fetch_archive(&self, link: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(link)
            .send()
            .await
            .map_err(AcquireError::http)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(AcquireError::http)?;
            return Err(api_error(status.as_u16(), &body));
        }
        let bytes = response.bytes().await.map_err(AcquireError::http)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl DatasetHost for RoboflowClient {
    async fn workspace(&self, name: &str) -> Result<Workspace> {
        let response: WorkspaceResponse = self.get_json(&[name]).await?;
        tracing::info!(
            "📂 Workspace '{}' ({} projects)",
            response.workspace.url,
            response.workspace.projects.len()
        );
        Ok(response.workspace)
    }

    async fn project(&self, workspace: &Workspace, name: &str) -> Result<Project> {
        let response: ProjectResponse = self.get_json(&[&workspace.url, name]).await?;
        let mut project = response.project;
        if project.versions.is_empty() {
            project.versions = response.versions;
        }
        tracing::info!(
            "🗂️  Project '{}' ({} versions)",
            project.id,
            project.versions.len()
        );
        Ok(project)
    }

    async fn version(&self, project: &Project, number: u32) -> Result<Version> {
        let summary = project
            .versions
            .iter()
            .find(|v| v.number() == Some(number))
            .ok_or_else(|| AcquireError::UnknownVersion {
                project: project.id.clone(),
                version: number,
            })?;

        let version = Version {
            workspace: project.workspace_slug().to_string(),
            project: project.slug().to_string(),
            number,
            name: summary.name.clone(),
            images: summary.images,
            exports: summary.exports.clone(),
        };
        tracing::info!("🏷️  Version {}", version.id());
        Ok(version)
    }

    async fn download(
        &self,
        version: &Version,
        format: ExportFormat,
        location: &Path,
        overwrite: bool,
    ) -> Result<DownloadOutcome> {
        let dataset = Dataset {
            name: version.project.clone(),
            version: version.number,
            format,
            location: std::path::absolute(location)?,
        };

        if destination::is_populated(location)? && !overwrite {
            tracing::info!(
                "✅ {} already holds data, skipping download",
                location.display()
            );
            return Ok(DownloadOutcome::AlreadyPresent { dataset });
        }

        if !version.exports.is_empty() && !version.exports.iter().any(|e| e == format.as_str()) {
            tracing::debug!(
                "'{}' not among listed exports {:?}, requesting anyway",
                format,
                version.exports
            );
        }

        let number = version.number.to_string();
        let export: ExportResponse = self
            .get_json(&[&version.workspace, &version.project, &number, format.as_str()])
            .await?;
        let link = export
            .export
            .and_then(|e| e.link)
            .ok_or_else(|| AcquireError::ExportUnavailable {
                version: version.id(),
                format: format.to_string(),
            })?;

        tracing::info!("⬇️  Downloading {} ({} export)", version.id(), format);
        let data = self.fetch_archive(&link).await?;
        tracing::debug!("Received {} bytes", data.len());

        let staging = destination::staging_path(location);
        destination::clear_staging(&staging)?;
        let files = match archive::extract_zip(&data, &staging) {
            Ok(files) => files,
            Err(e) => {
                destination::clear_staging(&staging)?;
                return Err(e);
            }
        };
        destination::promote(&staging, location)?;

        tracing::info!("📁 Extracted {} files to {}", files, location.display());
        Ok(DownloadOutcome::Downloaded {
            dataset,
            files,
            bytes: data.len() as u64,
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(AcquireError::http)?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body));
    }

    let value: serde_json::Value = serde_json::from_str(&body)?;
    if let Some(error) = value.get("error") {
        return Err(AcquireError::ApiError {
            status: status.as_u16(),
            message: error_message(error),
        });
    }
    Ok(serde_json::from_value(value)?)
}

fn api_error(status: u16, body: &str) -> AcquireError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").map(error_message))
        .unwrap_or_else(|| body.trim().to_string());
    AcquireError::ApiError { status, message }
}

fn error_message(error: &serde_json::Value) -> String {
    match error {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}
