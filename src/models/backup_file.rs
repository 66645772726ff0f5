/// Which of the six duplicity naming patterns a file matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupKind {
    FullManifest,
    FullVolume(u64),
    FullSignature,
    IncrementalManifest,
    IncrementalVolume(u64),
    IncrementalSignature,
}

impl BackupKind {
    pub fn is_full(&self) -> bool {
        matches!(
            self,
            BackupKind::FullManifest | BackupKind::FullVolume(_) | BackupKind::FullSignature
        )
    }

    pub fn volume(&self) -> Option<u64> {
        match self {
            BackupKind::FullVolume(nr) | BackupKind::IncrementalVolume(nr) => Some(*nr),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackupKind::FullManifest => "full-manifest",
            BackupKind::FullVolume(_) => "full-volume",
            BackupKind::FullSignature => "full-signature",
            BackupKind::IncrementalManifest => "inc-manifest",
            BackupKind::IncrementalVolume(_) => "inc-volume",
            BackupKind::IncrementalSignature => "inc-signature",
        }
    }
}

/// A classified duplicity file. `timestamp` is the defining timestamp in
/// epoch seconds: the backup time for full files, the end time for
/// incremental files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub name: String,
    pub timestamp: i64,
    pub is_full: bool,
    pub kind: BackupKind,
    pub start_timestamp: Option<i64>,
}

impl BackupFile {
    pub fn full(name: &str, timestamp: i64, kind: BackupKind) -> Self {
        debug_assert!(kind.is_full());
        BackupFile {
            name: name.to_string(),
            timestamp,
            is_full: true,
            kind,
            start_timestamp: None,
        }
    }

    pub fn incremental(name: &str, start: i64, end: i64, kind: BackupKind) -> Self {
        debug_assert!(!kind.is_full());
        BackupFile {
            name: name.to_string(),
            timestamp: end,
            is_full: false,
            kind,
            start_timestamp: Some(start),
        }
    }
}
