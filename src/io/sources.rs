use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::BevError;

/// File name pattern of a yearly extract, e.g. "12411-03-03-2023.csv".
const FILE_PREFIX: &str = "12411-03-03-";
const FILE_SUFFIX: &str = ".csv";

/// Registry of the yearly register extracts found in a data directory.
/// Replaces the hand-maintained year→path table of the dashboard: any file
/// matching the extract naming pattern is picked up.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    by_year: BTreeMap<u16, PathBuf>,
}

impl SourceRegistry {
    pub fn scan(data_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = data_dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read data directory: {}", dir.display()))?;

        let mut by_year = BTreeMap::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(year) = parse_year(name) {
                by_year.insert(year, entry.path());
            }
        }
        log::debug!("source registry: {} extracts under {}", by_year.len(), dir.display());
        Ok(Self { by_year })
    }

    /// Available years, ascending.
    pub fn years(&self) -> Vec<u16> {
        self.by_year.keys().copied().collect()
    }

    pub fn path_for(&self, year: u16) -> Result<&Path, BevError> {
        self.by_year
            .get(&year)
            .map(PathBuf::as_path)
            .ok_or(BevError::UnknownYear(year))
    }
}

fn parse_year(file_name: &str) -> Option<u16> {
    let rest = file_name.strip_prefix(FILE_PREFIX)?;
    let year = rest.strip_suffix(FILE_SUFFIX)?;
    year.parse().ok()
}
