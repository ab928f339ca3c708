use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// True when `path` already holds data: a non-empty directory or any other
/// existing filesystem entry.
pub fn is_populated(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    if !path.is_dir() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_some())
}

fn sibling(dest: &Path, suffix: &str) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    dest.with_file_name(name)
}

/// Sibling directory that receives an extraction before it is moved into place.
pub fn staging_path(dest: &Path) -> PathBuf {
    sibling(dest, ".partial")
}

/// Sibling that holds the previous dataset while a replacement is moved in.
pub fn backup_path(dest: &Path) -> PathBuf {
    sibling(dest, ".previous")
}

fn remove_entry(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Removes whatever is left at `staging` from an interrupted run.
pub fn clear_staging(staging: &Path) -> Result<()> {
    if staging.exists() {
        tracing::debug!("Removing stale staging directory {}", staging.display());
        fs::remove_dir_all(staging)?;
    }
    Ok(())
}

/// Moves a completed extraction at `staging` to `dest`, replacing `dest`.
///
/// The previous contents are set aside first and only deleted once the new
/// data is in place; a failed rename puts them back.
pub fn promote(staging: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let backup = backup_path(dest);
    remove_entry(&backup)?;
    let had_previous = dest.exists();
    if had_previous {
        fs::rename(dest, &backup)?;
    }

    if let Err(e) = fs::rename(staging, dest) {
        if had_previous {
            if let Err(restore) = fs::rename(&backup, dest) {
                tracing::error!(
                    "Could not restore previous dataset from {}: {}",
                    backup.display(),
                    restore
                );
            }
        }
        return Err(e.into());
    }

    if had_previous {
        remove_entry(&backup)?;
    }
    Ok(())
}
