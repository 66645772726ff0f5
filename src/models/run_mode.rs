/// What to do with the selected files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Print the selected file names only
    Report,

    /// Copy the selected files to the destination directory
    Copy,

    /// Log what a copy would do without touching the destination
    DryRun,
}

impl RunMode {
    pub fn from_flags(has_destination: bool, dry_run: bool) -> Self {
        match (has_destination, dry_run) {
            (false, _) => RunMode::Report,
            (true, false) => RunMode::Copy,
            (true, true) => RunMode::DryRun,
        }
    }

    /// Returns true if this is the dry-run copy mode
    pub fn is_dry_run(&self) -> bool {
        matches!(self, RunMode::DryRun)
    }

    /// Returns true if the copy step runs at all (for real or simulated)
    pub fn wants_copy(&self) -> bool {
        matches!(self, RunMode::Copy | RunMode::DryRun)
    }

    /// Returns true if files should actually be written
    pub fn should_copy_files(&self) -> bool {
        matches!(self, RunMode::Copy)
    }

    /// Get display string for progress bars
    pub fn progress_prefix(&self) -> &'static str {
        match self {
            RunMode::Report | RunMode::Copy => "",
            RunMode::DryRun => "[DRY RUN] ",
        }
    }
}
