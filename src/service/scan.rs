use crate::models::backup_file::BackupFile;
use crate::models::error::{Result, SelectError};
use crate::service::classify::classify;
use crate::utils::directory::list_entry_names;
use log::{debug, info};
use std::path::Path;

/// Reads `directory` once and classifies every entry. The first entry that
/// is not a duplicity file aborts the scan.
pub fn scan_directory(directory: &Path) -> Result<Vec<BackupFile>> {
    info!("Scanning {}", directory.display());

    let mut files = Vec::new();
    for name in list_entry_names(directory)? {
        let name = name.into_string().map_err(|raw| {
            SelectError::unknown_file(&raw.to_string_lossy(), "file name is not valid UTF-8")
        })?;
        let file = classify(&name)?;
        debug!(
            "{} -> {} at {} (start {:?}, volume {:?})",
            file.name,
            file.kind.label(),
            file.timestamp,
            file.start_timestamp,
            file.kind.volume()
        );
        files.push(file);
    }

    info!("Found {} duplicity files", files.len());
    Ok(files)
}
