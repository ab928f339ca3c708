use crate::utils::error::{AcquireError, Result};
use std::fs::{self, File};
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

/// Extracts a zip payload into `dest`, returning the number of files written.
///
/// Entries whose names would land outside `dest` abort the extraction.
pub fn extract_zip(data: &[u8], dest: &Path) -> Result<usize> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    fs::create_dir_all(dest)?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let outpath = match entry.enclosed_name() {
            Some(path) => dest.join(path),
            None => {
                return Err(AcquireError::ArchiveError {
                    message: format!("Entry '{}' escapes the destination", entry.name()),
                })
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(&outpath)?;
        std::io::copy(&mut entry, &mut outfile)?;
        written += 1;
    }

    tracing::debug!("Extracted {} files into {}", written, dest.display());
    Ok(written)
}
