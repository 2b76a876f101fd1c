//! # Local proposal registry
//!
//! Fallback source of observing-program metadata, loaded once from a CSV
//! file with a `project_id,title,pi` header row. Empty fields are treated as
//! absent values. Lookup is case-insensitive on the project code.

use std::collections::HashMap;

use camino::Utf8Path;
use serde::Deserialize;

use crate::ingest_errors::{IngestError, IngestionError};
use crate::omp::{ProjectInfo, ProjectInfoSource};

#[derive(Debug, Deserialize)]
struct ProposalRow {
    project_id: String,
    title: Option<String>,
    pi: Option<String>,
}

/// File-backed registry of known proposals.
#[derive(Debug, Clone, Default)]
pub struct Proposals {
    entries: HashMap<String, ProjectInfo>,
}

impl Proposals {
    /// An empty registry, for configurations without a local proposal file.
    pub fn empty() -> Self {
        Proposals::default()
    }

    /// Load the registry from a CSV file.
    ///
    /// Arguments
    /// ---------
    /// * `path`: CSV file with columns `project_id,title,pi`
    ///
    /// Return
    /// ------
    /// * The loaded registry, or an [`IngestError`] when the file cannot be
    ///   read or parsed (a missing registry is a configuration fault).
    pub fn load(path: &Utf8Path) -> Result<Self, IngestError> {
        let registry_error = |source| IngestError::ProposalRegistry {
            path: path.to_string(),
            source,
        };

        let mut reader = csv::Reader::from_path(path).map_err(registry_error)?;

        let mut entries = HashMap::new();
        for row in reader.deserialize() {
            let row: ProposalRow = row.map_err(registry_error)?;
            entries.insert(
                row.project_id.to_ascii_uppercase(),
                ProjectInfo {
                    title: row.title,
                    pi: row.pi,
                },
            );
        }

        Ok(Proposals { entries })
    }
}

impl ProjectInfoSource for Proposals {
    fn project_info(&self, project_id: &str) -> Result<Option<ProjectInfo>, IngestionError> {
        Ok(self.entries.get(&project_id.to_ascii_uppercase()).cloned())
    }
}

#[cfg(test)]
mod proposals_test {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_and_lookup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "project_id,title,pi").unwrap();
        writeln!(file, "U/23A/1,Galactic plane survey,A. Observer").unwrap();
        writeln!(file, "U/SERV/192,Service time,").unwrap();
        file.flush().unwrap();

        let path = Utf8Path::from_path(file.path()).unwrap();
        let proposals = Proposals::load(path).unwrap();

        let full = proposals.project_info("u/23a/1").unwrap().unwrap();
        assert_eq!(full.title.as_deref(), Some("Galactic plane survey"));
        assert_eq!(full.pi.as_deref(), Some("A. Observer"));

        let partial = proposals.project_info("U/SERV/192").unwrap().unwrap();
        assert_eq!(partial.title.as_deref(), Some("Service time"));
        assert_eq!(partial.pi, None);

        assert_eq!(proposals.project_info("U/99Z/1").unwrap(), None);
    }

    #[test]
    fn test_missing_registry_is_config_error() {
        let result = Proposals::load(Utf8Path::new("/nonexistent/proposals.csv"));
        assert!(matches!(result, Err(IngestError::ProposalRegistry { .. })));
    }
}
