use crate::models::error::{Result, SelectError};
use std::ffi::OsString;
use std::path::Path;
use walkdir::WalkDir;

/// Lists the names of all entries directly inside `dir`, subdirectories
/// included. No recursion.
pub fn list_entry_names(dir: &Path) -> Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|cause| SelectError::DirectoryRead {
            path: dir.to_path_buf(),
            cause,
        })?;
        names.push(entry.file_name().to_os_string());
    }
    Ok(names)
}
