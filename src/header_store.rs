//! # Raw-header store
//!
//! The store serves raw header documents matching selection criteria
//! (instrument, optional UT date, optional observation number) as a lazy,
//! finite sequence. The orchestrator never loads the whole batch up front.
//!
//! [`JsonHeaderStore`] is the file-backed default: one JSON document per raw
//! file under `<root>/<instrument>/`, produced by the header capture jobs.
//! A document that fails to parse surfaces as a per-document error in the
//! sequence, so one corrupt capture cannot halt a night's ingestion.

use camino::{Utf8Path, Utf8PathBuf};

use crate::headers::RawHeaderDocument;
use crate::ingest_errors::{IngestError, IngestionError};

/// Items yielded by a store query.
pub type DocumentResult = Result<RawHeaderDocument, IngestionError>;

/// Query contract consumed by the orchestrator.
pub trait HeaderStore {
    /// Find the documents matching the criteria, in store order.
    ///
    /// Arguments
    /// ---------
    /// * `instrument`: instrument name, required
    /// * `date`: restrict to one UT date (`YYYYMMDD`), optional
    /// * `obs_num`: restrict to one observation sequence number, optional
    ///
    /// Return
    /// ------
    /// * A lazy sequence of matching documents, or an [`IngestError`] when
    ///   the store itself is unavailable.
    fn find(
        &self,
        instrument: &str,
        date: Option<&str>,
        obs_num: Option<i64>,
    ) -> Result<Box<dyn Iterator<Item = DocumentResult> + '_>, IngestError>;
}

/// Directory of JSON header documents, one file per raw observation.
#[derive(Debug, Clone)]
pub struct JsonHeaderStore {
    root: Utf8PathBuf,
}

impl JsonHeaderStore {
    pub fn new(root: Utf8PathBuf) -> Self {
        JsonHeaderStore { root }
    }

    fn document_paths(&self, instrument: &str) -> Result<Vec<Utf8PathBuf>, IngestError> {
        if !self.root.is_dir() {
            return Err(IngestError::StoreUnavailable(format!(
                "header directory {} does not exist",
                self.root
            )));
        }

        let instrument_dir = self.root.join(instrument);
        if !instrument_dir.is_dir() {
            // No captures for this instrument: an empty sequence, not a fault.
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let entries = instrument_dir
            .read_dir_utf8()
            .map_err(|e| IngestError::StoreUnavailable(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| IngestError::StoreUnavailable(e.to_string()))?;
            let path = entry.into_path();
            if path.extension() == Some("json") {
                paths.push(path);
            }
        }

        // read_dir order is platform-dependent; keep ingestion deterministic.
        paths.sort();
        Ok(paths)
    }
}

fn read_document(path: &Utf8Path) -> DocumentResult {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| IngestionError::MalformedDocument(format!("{path}: {e}")))
}

fn matches(doc: &RawHeaderDocument, date: Option<&str>, obs_num: Option<i64>) -> bool {
    date.map_or(true, |d| doc.utdate == d) && obs_num.map_or(true, |n| doc.obs == n)
}

impl HeaderStore for JsonHeaderStore {
    fn find(
        &self,
        instrument: &str,
        date: Option<&str>,
        obs_num: Option<i64>,
    ) -> Result<Box<dyn Iterator<Item = DocumentResult> + '_>, IngestError> {
        let paths = self.document_paths(instrument)?;
        let date = date.map(str::to_owned);

        let documents = paths.into_iter().filter_map(move |path| {
            match read_document(&path) {
                Ok(doc) => matches(&doc, date.as_deref(), obs_num).then_some(Ok(doc)),
                Err(e) => Some(Err(e)),
            }
        });

        Ok(Box::new(documents))
    }
}

#[cfg(test)]
mod header_store_test {
    use std::fs;

    use super::*;

    fn write_doc(dir: &Utf8Path, name: &str, utdate: &str, obs: i64) {
        let body = format!(
            r#"{{"filename": "{name}.fits", "utdate": "{utdate}", "obs": {obs},
                "headers": [{{"PROJECT": "U/23A/1"}}]}}"#
        );
        fs::write(dir.join(format!("{name}.json")), body).unwrap();
    }

    #[test]
    fn test_find_filters_and_orders() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();
        let ircam = root.join("ircam");
        fs::create_dir(&ircam).unwrap();
        write_doc(&ircam, "a20230102_00007", "20230102", 7);
        write_doc(&ircam, "a20230101_00042", "20230101", 42);
        write_doc(&ircam, "a20230101_00043", "20230101", 43);

        let store = JsonHeaderStore::new(root.to_owned());

        let all: Vec<_> = store
            .find("ircam", None, None)
            .unwrap()
            .map(|d| d.unwrap().filename)
            .collect();
        assert_eq!(
            all,
            vec![
                "a20230101_00042.fits",
                "a20230101_00043.fits",
                "a20230102_00007.fits"
            ]
        );

        let dated: Vec<_> = store
            .find("ircam", Some("20230101"), None)
            .unwrap()
            .map(|d| d.unwrap().obs)
            .collect();
        assert_eq!(dated, vec![42, 43]);

        let single: Vec<_> = store
            .find("ircam", Some("20230101"), Some(43))
            .unwrap()
            .map(|d| d.unwrap().obs)
            .collect();
        assert_eq!(single, vec![43]);

        assert_eq!(store.find("uist", None, None).unwrap().count(), 0);
    }

    #[test]
    fn test_corrupt_document_is_per_document_error() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();
        let ircam = root.join("ircam");
        fs::create_dir(&ircam).unwrap();
        fs::write(ircam.join("broken.json"), "{ not json").unwrap();
        write_doc(&ircam, "a20230101_00042", "20230101", 42);

        let store = JsonHeaderStore::new(root.to_owned());
        let results: Vec<_> = store.find("ircam", None, None).unwrap().collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(IngestionError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let store = JsonHeaderStore::new(Utf8PathBuf::from("/nonexistent/headers"));
        assert!(matches!(
            store.find("ircam", None, None),
            Err(IngestError::StoreUnavailable(_))
        ));
    }
}
