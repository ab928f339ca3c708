use crate::utils::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Reads a dotenv file into a map without touching the process environment.
/// A missing file is treated as empty.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.is_file() {
        tracing::debug!("No env file at {}", path.display());
        return Ok(HashMap::new());
    }

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        vars.insert(key, value);
    }

    tracing::debug!("Loaded {} entries from {}", vars.len(), path.display());
    Ok(vars)
}
