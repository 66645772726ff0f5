use crate::models::backup_file::BackupFile;
use crate::models::error::Result;
use crate::models::generation::Generations;
use crate::service::scan::scan_directory;
use log::{debug, info};
use std::path::Path;

/// Returns the names of the files belonging to the last `nr_full` full
/// generations and the incremental generations depending on them, newest
/// generation first.
///
/// Generations are walked from newest to oldest. A full generation bumps the
/// counter before it is judged, so the walk stops at the first full
/// generation beyond `nr_full`. It also stops right after the `nr_full`-th
/// full generation: anything older belongs to an older chain or is a stale
/// leftover. Incremental generations without a full one below them are all
/// kept, the selector does not check chain completeness.
pub fn select_last_n_full_generations(
    files: &[BackupFile],
    nr_full: usize,
) -> Result<Vec<String>> {
    let generations = Generations::group(files)?;
    debug!(
        "Grouped {} files into {} generations ({} full)",
        files.len(),
        generations.len(),
        generations.full_count()
    );

    let mut selected = Vec::new();
    let mut full_seen = 0;
    for generation in generations.newest_first() {
        if generation.is_full {
            full_seen += 1;
        }
        if full_seen > nr_full {
            debug!(
                "Stopping at full generation {}, already have {}",
                generation.timestamp, nr_full
            );
            break;
        }

        debug!(
            "Selecting {} generation {} ({} files)",
            if generation.is_full { "full" } else { "incremental" },
            generation.timestamp,
            generation.files.len()
        );
        selected.extend(generation.files.iter().cloned());

        if generation.is_full && full_seen == nr_full {
            break;
        }
    }

    Ok(selected)
}

/// Scans `directory` and selects the last `nr_full` full backups from it
pub fn last_n_full_backups(directory: &Path, nr_full: usize) -> Result<Vec<String>> {
    let files = scan_directory(directory)?;
    let selected = select_last_n_full_generations(&files, nr_full)?;
    info!(
        "Selected {} of {} files for the last {} full backups",
        selected.len(),
        files.len(),
        nr_full
    );
    Ok(selected)
}
