#[cfg(feature = "cli")]
pub mod cli;
pub mod env_file;

use crate::domain::model::{ApiKey, PROJECT};
use crate::utils::error::Result;
use crate::utils::validation::{require_credential, validate_path, validate_url, Validate};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
pub use cli::CliArgs;

pub const API_KEY_VAR: &str = "ROBOFLOW_API_KEY";
pub const API_URL_VAR: &str = "ROBOFLOW_API_URL";
pub const DEFAULT_API_URL: &str = "https://api.roboflow.com";
pub const ENV_FILE: &str = ".env";
pub const DATA_DIR: &str = "data";

/// Repository root, fixed at build time so paths do not depend on the cwd.
pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub api_url: String,
    pub repo_root: PathBuf,
}

impl Settings {
    /// Reads `<repo_root>/.env` and the process environment.
    pub fn load(repo_root: &Path) -> Result<Self> {
        let process_vars: HashMap<String, String> = [API_KEY_VAR, API_URL_VAR]
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();
        Self::from_sources(repo_root, &process_vars)
    }

    /// Process variables win over `.env` entries, like a non-overriding dotenv load.
    pub fn from_sources(repo_root: &Path, process_vars: &HashMap<String, String>) -> Result<Self> {
        let file_vars = env_file::read_env_file(&repo_root.join(ENV_FILE))?;

        let api_key =
            require_credential(API_KEY_VAR, lookup(API_KEY_VAR, process_vars, &file_vars))?;
        let api_url = lookup(API_URL_VAR, process_vars, &file_vars)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let settings = Self {
            api_key: ApiKey::new(api_key),
            api_url,
            repo_root: repo_root.to_path_buf(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.repo_root.join(DATA_DIR)
    }

    /// `<repo_root>/data/pokedex`
    pub fn destination(&self) -> PathBuf {
        self.data_dir().join(PROJECT)
    }
}

fn lookup<'a>(
    key: &str,
    process_vars: &'a HashMap<String, String>,
    file_vars: &'a HashMap<String, String>,
) -> Option<&'a str> {
    process_vars
        .get(key)
        .or_else(|| file_vars.get(key))
        .map(String::as_str)
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_url)?;
        validate_path("repo_root", &self.repo_root.to_string_lossy())?;
        Ok(())
    }
}
