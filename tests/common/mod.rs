#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ukirt2caom2::caom2::Observation;
use ukirt2caom2::header_store::{DocumentResult, HeaderStore};
use ukirt2caom2::headers::{HeaderMap, HeaderValue, RawHeaderDocument};
use ukirt2caom2::ingest_errors::{IngestError, IngestionError};
use ukirt2caom2::omp::{ProjectInfo, ProjectInfoSource};
use ukirt2caom2::repository::{record_uri, Repository};

/// Build a raw document with a single primary header.
pub fn doc(
    filename: &str,
    utdate: &str,
    obs: i64,
    entries: &[(&str, HeaderValue)],
) -> RawHeaderDocument {
    let header: HeaderMap = entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    RawHeaderDocument {
        filename: filename.to_owned(),
        utdate: utdate.to_owned(),
        obs,
        headers: vec![header],
    }
}

pub fn str_value(value: &str) -> HeaderValue {
    HeaderValue::String(value.to_owned())
}

/// In-memory header store yielding its documents in insertion order.
/// Selection criteria are ignored: the tests preload exactly the documents
/// the run should see.
pub struct MemoryHeaderStore {
    docs: Vec<RawHeaderDocument>,
}

impl MemoryHeaderStore {
    pub fn new(docs: Vec<RawHeaderDocument>) -> Self {
        MemoryHeaderStore { docs }
    }
}

impl HeaderStore for MemoryHeaderStore {
    fn find(
        &self,
        _instrument: &str,
        _date: Option<&str>,
        _obs_num: Option<i64>,
    ) -> Result<Box<dyn Iterator<Item = DocumentResult> + '_>, IngestError> {
        Ok(Box::new(self.docs.iter().cloned().map(Ok)))
    }
}

/// Store that must never be queried; asserts fail-fast configuration checks.
pub struct PanicStore;

impl HeaderStore for PanicStore {
    fn find(
        &self,
        _instrument: &str,
        _date: Option<&str>,
        _obs_num: Option<i64>,
    ) -> Result<Box<dyn Iterator<Item = DocumentResult> + '_>, IngestError> {
        panic!("header store queried before configuration was validated");
    }
}

/// Project source that knows nothing.
pub struct NullProjectSource;

impl ProjectInfoSource for NullProjectSource {
    fn project_info(&self, _project_id: &str) -> Result<Option<ProjectInfo>, IngestionError> {
        Ok(None)
    }
}

/// Project source backed by a fixed table.
pub struct TableProjectSource {
    entries: HashMap<String, ProjectInfo>,
}

impl TableProjectSource {
    pub fn new(entries: &[(&str, Option<&str>, Option<&str>)]) -> Self {
        let entries = entries
            .iter()
            .map(|(id, title, pi)| {
                (
                    id.to_string(),
                    ProjectInfo {
                        title: title.map(str::to_owned),
                        pi: pi.map(str::to_owned),
                    },
                )
            })
            .collect();
        TableProjectSource { entries }
    }
}

impl ProjectInfoSource for TableProjectSource {
    fn project_info(&self, project_id: &str) -> Result<Option<ProjectInfo>, IngestionError> {
        Ok(self.entries.get(project_id).cloned())
    }
}

#[derive(Default)]
struct MemoryRepositoryInner {
    records: HashMap<String, Observation>,
    puts: usize,
    updates: usize,
}

/// In-memory repository; clones share state so a test can inspect the
/// repository after handing a handle to the pipeline.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    inner: Rc<RefCell<MemoryRepositoryInner>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository::default()
    }

    pub fn record(&self, uri: &str) -> Option<Observation> {
        self.inner.borrow().records.get(uri).cloned()
    }

    pub fn puts(&self) -> usize {
        self.inner.borrow().puts
    }

    pub fn updates(&self) -> usize {
        self.inner.borrow().updates
    }
}

impl Repository for MemoryRepository {
    fn get(&self, uri: &str) -> Result<Option<Observation>, IngestionError> {
        Ok(self.inner.borrow().records.get(uri).cloned())
    }

    fn put(&self, observation: &Observation) -> Result<(), IngestionError> {
        let mut inner = self.inner.borrow_mut();
        inner.puts += 1;
        inner
            .records
            .insert(record_uri(observation), observation.clone());
        Ok(())
    }

    fn update(&self, observation: &Observation) -> Result<(), IngestionError> {
        let mut inner = self.inner.borrow_mut();
        inner.updates += 1;
        inner
            .records
            .insert(record_uri(observation), observation.clone());
        Ok(())
    }
}
