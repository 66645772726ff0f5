use crate::models::backup_file::BackupFile;
use crate::models::error::{Result, SelectError};
use std::collections::BTreeMap;

/// All files sharing one defining timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub timestamp: i64,
    pub is_full: bool,
    pub files: Vec<String>,
}

impl Generation {
    fn new(timestamp: i64, is_full: bool) -> Self {
        Generation {
            timestamp,
            is_full,
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Generations {
    by_timestamp: BTreeMap<i64, Generation>,
}

impl Generations {
    pub fn group(files: &[BackupFile]) -> Result<Self> {
        let mut generations = Generations::default();
        for file in files {
            generations.add(file)?;
        }
        Ok(generations)
    }

    /// Adds a file to its generation, creating the generation on first use.
    pub fn add(&mut self, file: &BackupFile) -> Result<()> {
        let generation = self
            .by_timestamp
            .entry(file.timestamp)
            .or_insert_with(|| Generation::new(file.timestamp, file.is_full));

        if generation.is_full != file.is_full {
            return Err(SelectError::InconsistentGeneration {
                timestamp: file.timestamp,
                name: file.name.clone(),
            });
        }
        generation.files.push(file.name.clone());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_timestamp.len()
    }

    pub fn full_count(&self) -> usize {
        self.by_timestamp.values().filter(|g| g.is_full).count()
    }

    /// Newest generation first
    pub fn newest_first(&self) -> impl Iterator<Item = &Generation> {
        self.by_timestamp.values().rev()
    }
}
