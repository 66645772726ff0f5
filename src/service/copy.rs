use crate::models::error::{Result, SelectError};
use crate::models::run_mode::RunMode;
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopySummary {
    pub copied: usize,
    pub skipped: usize,
    pub bytes: u64,
}

enum CopyOutcome {
    Copied(u64),
    Skipped,
}

/// Copies the selected files from `source_dir` into `destination`, keeping
/// their names. Runs on the current rayon pool; the first failure aborts.
pub fn copy_files(
    source_dir: &Path,
    destination: &Path,
    names: &[String],
    run_mode: RunMode,
    overwrite: bool,
    progress: Option<&ProgressBar>,
) -> Result<CopySummary> {
    prepare_destination(destination, run_mode)?;

    let outcomes = names
        .par_iter()
        .map(|name| {
            let outcome = copy_one(source_dir, destination, name, run_mode, overwrite);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            outcome
        })
        .collect::<Result<Vec<CopyOutcome>>>()?;

    let mut summary = CopySummary::default();
    for outcome in outcomes {
        match outcome {
            CopyOutcome::Copied(bytes) => {
                summary.copied += 1;
                summary.bytes += bytes;
            }
            CopyOutcome::Skipped => summary.skipped += 1,
        }
    }
    Ok(summary)
}

fn prepare_destination(destination: &Path, run_mode: RunMode) -> Result<()> {
    if destination.exists() {
        if !destination.is_dir() {
            return Err(SelectError::InvalidDirectory {
                path: destination.to_path_buf(),
            });
        }
        return Ok(());
    }

    if run_mode.should_copy_files() {
        info!("Creating destination {}", destination.display());
        fs::create_dir_all(destination)?;
    } else {
        info!(
            "{}Would create destination {}",
            run_mode.progress_prefix(),
            destination.display()
        );
    }
    Ok(())
}

fn copy_one(
    source_dir: &Path,
    destination: &Path,
    name: &str,
    run_mode: RunMode,
    overwrite: bool,
) -> Result<CopyOutcome> {
    let from = source_dir.join(name);
    let to = destination.join(name);

    if to.exists() && !overwrite {
        warn!("Skipping {}, already present at destination", to.display());
        return Ok(CopyOutcome::Skipped);
    }

    if !run_mode.should_copy_files() {
        info!(
            "{}Would copy {} to {}",
            run_mode.progress_prefix(),
            from.display(),
            to.display()
        );
        return Ok(CopyOutcome::Skipped);
    }

    debug!("Copying {} to {}", from.display(), to.display());
    let bytes = fs::copy(&from, &to).map_err(|cause| SelectError::FileCopy {
        from: from.clone(),
        to: to.clone(),
        cause,
    })?;
    Ok(CopyOutcome::Copied(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::select::tests::create_files;
    use tempfile::TempDir;

    fn names() -> Vec<String> {
        vec![
            "duplicity-full.20130101T010000Z.manifest.gpg".to_string(),
            "duplicity-full.20130101T010000Z.vol1.difftar.gpg".to_string(),
        ]
    }

    #[test]
    fn test_copies_selected_files() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        create_files(source.path(), &names());
        fs::write(source.path().join(&names()[1]), b"volume").unwrap();
        fs::File::create(source.path().join("not-selected")).unwrap();

        let summary = copy_files(
            source.path(),
            destination.path(),
            &names(),
            RunMode::Copy,
            false,
            None,
        )
        .unwrap();

        assert_eq!(summary, CopySummary { copied: 2, skipped: 0, bytes: 6 });
        for name in names() {
            assert!(destination.path().join(name).exists());
        }
        assert!(!destination.path().join("not-selected").exists());
    }

    #[test]
    fn test_creates_missing_destination() {
        let source = TempDir::new().unwrap();
        let parent = TempDir::new().unwrap();
        let destination = parent.path().join("offsite").join("duplicity");
        create_files(source.path(), &names());

        let summary =
            copy_files(source.path(), &destination, &names(), RunMode::Copy, false, None).unwrap();

        assert_eq!(summary.copied, 2);
        assert!(destination.join(&names()[0]).exists());
    }

    #[test]
    fn test_skips_existing_files_unless_overwrite() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        create_files(source.path(), &names());
        fs::write(source.path().join(&names()[0]), b"new").unwrap();
        fs::write(destination.path().join(&names()[0]), b"old-content").unwrap();

        let summary = copy_files(
            source.path(),
            destination.path(),
            &names(),
            RunMode::Copy,
            false,
            None,
        )
        .unwrap();
        assert_eq!(summary.copied, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(fs::read(destination.path().join(&names()[0])).unwrap(), b"old-content");

        let summary = copy_files(
            source.path(),
            destination.path(),
            &names(),
            RunMode::Copy,
            true,
            None,
        )
        .unwrap();
        assert_eq!(summary.copied, 2);
        assert_eq!(fs::read(destination.path().join(&names()[0])).unwrap(), b"new");
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let source = TempDir::new().unwrap();
        let parent = TempDir::new().unwrap();
        let destination = parent.path().join("offsite");
        create_files(source.path(), &names());

        let summary =
            copy_files(source.path(), &destination, &names(), RunMode::DryRun, false, None)
                .unwrap();

        assert_eq!(summary.copied, 0);
        assert_eq!(summary.skipped, 2);
        assert!(!destination.exists());
    }

    #[test]
    fn test_destination_must_be_a_directory() {
        let source = TempDir::new().unwrap();
        let parent = TempDir::new().unwrap();
        let destination = parent.path().join("file");
        fs::File::create(&destination).unwrap();

        match copy_files(source.path(), &destination, &names(), RunMode::Copy, false, None) {
            Err(SelectError::InvalidDirectory { path }) => assert_eq!(path, destination),
            other => panic!("Expected InvalidDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_source_file_fails() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();

        match copy_files(source.path(), destination.path(), &names(), RunMode::Copy, false, None) {
            Err(SelectError::FileCopy { .. }) => {}
            other => panic!("Expected FileCopy error, got {:?}", other),
        }
    }
}
