use crate::config::Settings;
use crate::core::{ApiKey, DatasetHost, DatasetTarget, DownloadOutcome};
use crate::domain::destination;
use crate::utils::error::Result;
use std::future::Future;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default)]
pub struct AcquireOptions {
    pub overwrite: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireReport {
    Finished(DownloadOutcome),
    /// Dry run: the version resolved, nothing was downloaded.
    Planned {
        version_id: String,
        location: PathBuf,
        would_download: bool,
    },
}

pub struct Acquisition<H: DatasetHost> {
    host: H,
    target: DatasetTarget,
    destination: PathBuf,
    options: AcquireOptions,
}

impl<H: DatasetHost> Acquisition<H> {
    pub fn new(host: H, target: DatasetTarget, destination: PathBuf) -> Self {
        Self {
            host,
            target,
            destination,
            options: AcquireOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AcquireOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn run(&self) -> Result<AcquireReport> {
        let target = &self.target;
        tracing::info!(
            "🚀 Acquiring {}/{} version {} as '{}'",
            target.workspace,
            target.project,
            target.version,
            target.format
        );

        let workspace = self.host.workspace(target.workspace).await?;
        let project = self.host.project(&workspace, target.project).await?;
        let version = self.host.version(&project, target.version).await?;

        if self.options.dry_run {
            let populated = destination::is_populated(&self.destination)?;
            let would_download = self.options.overwrite || !populated;
            tracing::info!(
                "🔍 Dry run: {} would {}",
                self.destination.display(),
                if would_download { "be downloaded" } else { "be left as is" }
            );
            return Ok(AcquireReport::Planned {
                version_id: version.id(),
                location: self.destination.clone(),
                would_download,
            });
        }

        let outcome = self
            .host
            .download(
                &version,
                target.format,
                &self.destination,
                self.options.overwrite,
            )
            .await?;
        Ok(AcquireReport::Finished(outcome))
    }
}

/// Builds a host from the configured key and fetches the Pokédex dataset into
/// `<repo_root>/data/pokedex`.
pub async fn acquire<F, Fut, H>(
    settings: &Settings,
    options: AcquireOptions,
    make_host: F,
) -> Result<AcquireReport>
where
    F: FnOnce(ApiKey, String) -> Fut,
    Fut: Future<Output = Result<H>>,
    H: DatasetHost,
{
    let host = make_host(settings.api_key.clone(), settings.api_url.clone()).await?;
    Acquisition::new(host, DatasetTarget::pokedex(), settings.destination())
        .with_options(options)
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dataset, ExportFormat, Project, Version, Workspace};
    use crate::utils::error::AcquireError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Records every call and mimics the host's presence check.
    #[derive(Clone, Default)]
    struct RecordingHost {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingHost {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl DatasetHost for RecordingHost {
        async fn workspace(&self, name: &str) -> Result<Workspace> {
            self.record(format!("workspace({})", name));
            Ok(Workspace {
                name: name.to_string(),
                url: name.to_string(),
                projects: vec![],
            })
        }

        async fn project(&self, workspace: &Workspace, name: &str) -> Result<Project> {
            self.record(format!("project({})", name));
            Ok(Project {
                id: format!("{}/{}", workspace.url, name),
                name: name.to_string(),
                project_type: None,
                versions: vec![],
            })
        }

        async fn version(&self, project: &Project, number: u32) -> Result<Version> {
            self.record(format!("version({})", number));
            Ok(Version {
                workspace: project.workspace_slug().to_string(),
                project: project.slug().to_string(),
                number,
                name: None,
                images: None,
                exports: vec![],
            })
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
                location: location.to_path_buf(),
            };
            if destination::is_populated(location)? && !overwrite {
                self.record(format!("download({}) skip", format));
                return Ok(DownloadOutcome::AlreadyPresent { dataset });
            }
            self.record(format!("download({}) fetch", format));
            std::fs::create_dir_all(location.join("train"))?;
            std::fs::write(location.join("train/001.jpg"), b"jpg")?;
            Ok(DownloadOutcome::Downloaded {
                dataset,
                files: 1,
                bytes: 3,
            })
        }
    }

    fn settings(repo_root: &Path) -> Settings {
        let vars: HashMap<String, String> =
            [("ROBOFLOW_API_KEY".to_string(), "stub-key".to_string())].into();
        Settings::from_sources(repo_root, &vars).unwrap()
    }

    #[tokio::test]
    async fn test_acquire_calls_fixed_target_once() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings(temp_dir.path());
        let host = RecordingHost::default();
        let seen_key = Arc::new(Mutex::new(None));

        let report = {
            let host = host.clone();
            let seen_key = seen_key.clone();
            acquire(&settings, AcquireOptions::default(), |key, _url| async move {
                *seen_key.lock().unwrap() = Some(key.expose().to_string());
                Ok(host)
            })
            .await
            .unwrap()
        };

        assert_eq!(seen_key.lock().unwrap().as_deref(), Some("stub-key"));
        assert_eq!(
            host.calls(),
            vec![
                "workspace(robert-demo-qvail)",
                "project(pokedex)",
                "version(14)",
                "download(folder) fetch",
            ]
        );
        match report {
            AcquireReport::Finished(outcome) => {
                assert!(outcome.transferred());
                assert_eq!(
                    outcome.dataset().location,
                    temp_dir.path().join("data").join("pokedex")
                );
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_second_run_skips_download() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings(temp_dir.path());
        let host = RecordingHost::default();

        for _ in 0..2 {
            let host = host.clone();
            acquire(&settings, AcquireOptions::default(), |_, _| async move { Ok(host) })
                .await
                .unwrap();
        }

        let calls = host.calls();
        assert_eq!(calls[3], "download(folder) fetch");
        assert_eq!(calls[7], "download(folder) skip");
    }

    #[tokio::test]
    async fn test_overwrite_forces_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("pokedex");
        std::fs::create_dir_all(&destination).unwrap();
        std::fs::write(destination.join("old.jpg"), b"jpg").unwrap();
        let host = RecordingHost::default();

        Acquisition::new(host.clone(), DatasetTarget::pokedex(), destination)
            .with_options(AcquireOptions {
                overwrite: true,
                dry_run: false,
            })
            .run()
            .await
            .unwrap();

        assert_eq!(host.calls().last().unwrap(), "download(folder) fetch");
    }

    #[tokio::test]
    async fn test_dry_run_does_not_download() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("pokedex");
        let host = RecordingHost::default();

        let report = Acquisition::new(host.clone(), DatasetTarget::pokedex(), destination.clone())
            .with_options(AcquireOptions {
                overwrite: false,
                dry_run: true,
            })
            .run()
            .await
            .unwrap();

        assert_eq!(
            report,
            AcquireReport::Planned {
                version_id: "robert-demo-qvail/pokedex/14".to_string(),
                location: destination.clone(),
                would_download: true,
            }
        );
        assert_eq!(host.calls().len(), 3);
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_host_construction_error_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings(temp_dir.path());

        let result = acquire(&settings, AcquireOptions::default(), |_, _| async {
            Err::<RecordingHost, _>(AcquireError::ApiError {
                status: 401,
                message: "This API key does not exist.".to_string(),
            })
        })
        .await;

        assert!(matches!(result, Err(AcquireError::ApiError { status: 401, .. })));
        assert!(!temp_dir.path().join("data").exists());
    }
}
