//! Error taxonomy for the ingestion pipeline.
//!
//! Two levels, matching how failures are recovered from:
//!
//! - [`IngestError`] — configuration errors. Fatal to the whole run and
//!   raised before or outside the per-document loop.
//! - [`IngestionError`] — per-document failures while locating, building or
//!   persisting a record. Logged, counted, and the run moves on to the next
//!   document.
//!
//! Translation failures are a third, even milder category and live in
//! [`crate::translate::TranslationError`]: they abort nothing, the document
//! continues with an empty translation mapping.

use thiserror::Error;

/// Fatal whole-run configuration errors.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Header store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Unable to read proposal registry {path}: {source}")]
    ProposalRegistry {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Recoverable per-document ingestion failures.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed raw header document: {0}")]
    MalformedDocument(String),

    #[error("Unable to parse observation record: {0}")]
    XmlRead(#[from] quick_xml::DeError),

    #[error("Unable to serialize observation record: {0}")]
    XmlWrite(#[from] quick_xml::SeError),

    #[error("Project information service error: {0}")]
    ProjectService(String),

    #[error("Repository error for {uri}: {message}")]
    Repository { uri: String, message: String },

    #[error("Instrument construction failed for {instrument}: {message}")]
    Instrument {
        instrument: String,
        message: String,
    },
}
