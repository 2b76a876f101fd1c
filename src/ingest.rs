//! # Ingestion orchestrator
//!
//! [`IngestRaw`] is the central facade wiring together the collaborators of
//! the pipeline: the header store, the remote OMP project-information
//! service with its local registry fallback, the optional archive
//! repository, the record reader/writer and the header translator.
//!
//! One [`IngestRaw::run`] call processes the documents matching the
//! selection criteria strictly in store order:
//!
//! ```text
//! fetch → normalize → translate → locate-or-create → build → persist
//! ```
//!
//! Failure policy, from mildest to hardest:
//!
//! - translation failure: warn, continue the same document with an empty
//!   translation mapping;
//! - ingestion failure: log, count, discard that document's partial state,
//!   move to the next document;
//! - configuration failure (unknown instrument, unreachable store): abort
//!   the run before any document is fetched.
//!
//! The returned failure count is the only machine-readable signal of
//! partial failure; `0` means every document was persisted.

use std::collections::HashMap;
use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, error, info, warn};

use crate::caom2::xml::{ObservationReader, ObservationWriter};
use crate::caom2::{Observation, Proposal, Telescope};
use crate::constants::{CAOM_URI_PREFIX, COLLECTION, RAW_URI_PREFIX, TELESCOPE_NAME};
use crate::geolocation::ukirt_geolocation;
use crate::header_store::HeaderStore;
use crate::headers::{document_to_ascii, fixup_headers, HeaderMap, HeaderMapExt, RawHeaderDocument};
use crate::ingest_errors::{IngestError, IngestionError};
use crate::instrument::{instrument_classes, InstrumentConstructor};
use crate::omp::ProjectInfoSource;
use crate::project_code::valid_project_code;
use crate::repository::Repository;
use crate::translate::{TranslationResult, Translator};

/// Destination and selection options for one ingestion run.
#[derive(Debug, Default, Clone)]
pub struct IngestOptions {
    /// Override the per-document UT date when set.
    pub date: Option<String>,
    /// Override the per-document observation sequence number when set.
    pub obs_num: Option<i64>,
    /// Fetch from and write back to the archive repository.
    pub use_repo: bool,
    /// Write one XML file per record under `<out_dir>/<instrument>/<date>/`.
    pub out_dir: Option<Utf8PathBuf>,
    /// Also write each record to standard output.
    pub dump: bool,
}

/// Where an existing record was located, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordSource {
    Repository,
    File,
    New,
}

/// The locate-or-create decision: repository copy wins over file copy,
/// otherwise a new record is constructed.
fn locate_record(repo_found: bool, file_found: bool) -> RecordSource {
    if repo_found {
        RecordSource::Repository
    } else if file_found {
        RecordSource::File
    } else {
        RecordSource::New
    }
}

/// The ingestion pipeline facade.
pub struct IngestRaw {
    geo: (f64, f64, f64),
    store: Box<dyn HeaderStore>,
    omp: Box<dyn ProjectInfoSource>,
    proposals: Box<dyn ProjectInfoSource>,
    repository: Option<Box<dyn Repository>>,
    reader: ObservationReader,
    writer: ObservationWriter,
    translator: Translator,
    instrument_classes: HashMap<&'static str, InstrumentConstructor>,
}

impl IngestRaw {
    /// Wire the pipeline with its collaborators.
    ///
    /// Arguments
    /// ---------
    /// * `store`: the raw-header store to query
    /// * `omp`: the remote project-information service
    /// * `proposals`: the local proposal registry, used as fallback
    /// * `repository`: the archive repository client, when configured
    pub fn new(
        store: Box<dyn HeaderStore>,
        omp: Box<dyn ProjectInfoSource>,
        proposals: Box<dyn ProjectInfoSource>,
        repository: Option<Box<dyn Repository>>,
    ) -> Self {
        IngestRaw {
            geo: ukirt_geolocation(),
            store,
            omp,
            proposals,
            repository,
            reader: ObservationReader::new(),
            writer: ObservationWriter::new(),
            translator: Translator::new(),
            instrument_classes: instrument_classes(),
        }
    }

    /// Ingest every document matching the criteria.
    ///
    /// Arguments
    /// ---------
    /// * `instrument`: instrument name selecting both the documents and the
    ///   record builder
    /// * `opts`: date/sequence-number overrides and destinations
    ///
    /// Return
    /// ------
    /// * The number of documents that failed ingestion (`0` = full
    ///   success), or an [`IngestError`] on a configuration fault.
    pub fn run(&self, instrument: &str, opts: &IngestOptions) -> Result<usize, IngestError> {
        let constructor = *self
            .instrument_classes
            .get(instrument)
            .ok_or_else(|| IngestError::UnknownInstrument(instrument.to_owned()))?;

        if opts.use_repo && self.repository.is_none() {
            return Err(IngestError::InvalidConfig(
                "repository use requested but no repository client configured".to_owned(),
            ));
        }

        let mut num_errors = 0;

        for document in self
            .store
            .find(instrument, opts.date.as_deref(), opts.obs_num)?
        {
            let mut doc = match document {
                Ok(doc) => doc,
                Err(e) => {
                    error!("Ingestion error: {e}");
                    num_errors += 1;
                    continue;
                }
            };

            document_to_ascii(&mut doc);
            fixup_headers(&mut doc);
            info!("Ingesting observation {}", doc.filename);

            let empty = HeaderMap::new();
            let primary = doc.primary().unwrap_or(&empty);
            let translated = match self.translator.translate(primary) {
                Ok(translated) => translated,
                Err(e) => {
                    warn!("Failed to translate headers: {e}");
                    TranslationResult::new()
                }
            };

            if let Err(e) = self.ingest_document(instrument, constructor, &doc, &translated, opts)
            {
                error!("Ingestion error: {e}");
                num_errors += 1;
            }
        }

        Ok(num_errors)
    }

    /// Locate or create the record for a single document, build it, persist
    /// it. Any error here aborts this document only.
    fn ingest_document(
        &self,
        instrument: &str,
        constructor: InstrumentConstructor,
        doc: &RawHeaderDocument,
        translated: &TranslationResult,
        opts: &IngestOptions,
    ) -> Result<(), IngestionError> {
        let obs_date = opts.date.as_deref().unwrap_or(&doc.utdate);
        let id = doc.id();
        let uri = format!("{RAW_URI_PREFIX}{}", doc.filename);
        let caom2_uri = format!("{CAOM_URI_PREFIX}{id}");

        // Attempt to fetch the record from the repository.
        let repo_record = match (&self.repository, opts.use_repo) {
            (Some(repository), true) => {
                debug!("Getting from CAOM-2: {caom2_uri}");
                repository.get(&caom2_uri)?
            }
            _ => None,
        };
        let in_repo = repo_record.is_some();

        // Make sure the output directory exists; creation is idempotent.
        let obs_file = match &opts.out_dir {
            Some(out_dir) => {
                let obs_dir = out_dir.join(instrument).join(obs_date);
                fs::create_dir_all(&obs_dir)?;
                Some(obs_dir.join(format!("{id}.xml")))
            }
            None => None,
        };
        let file_found = obs_file.as_deref().is_some_and(Utf8Path::exists);

        let caom2_obs = match (locate_record(in_repo, file_found), repo_record, &obs_file) {
            (RecordSource::Repository, Some(record), _) => record,
            (RecordSource::File, _, Some(path)) => {
                debug!("Reading file: {path}");
                self.reader.read(path)?
            }
            _ => {
                debug!("Constructing new CAOM-2 object");
                let mut record = Observation::new(COLLECTION, id);
                record.sequence_number = Some(opts.obs_num.unwrap_or(doc.obs));
                record
            }
        };

        let observation = self.ingest_observation(
            instrument,
            constructor,
            caom2_obs,
            obs_date,
            &uri,
            doc.is_fits(),
            &doc.headers,
            translated,
        )?;

        if opts.dump {
            self.writer.write(&observation, &mut io::stdout().lock())?;
        }

        if let Some(path) = &obs_file {
            debug!("Writing file: {path}");
            let mut file = fs::File::create(path)?;
            self.writer.write(&observation, &mut file)?;
        }

        if let (Some(repository), true) = (&self.repository, opts.use_repo) {
            if in_repo {
                debug!("Updating in CAOM-2: {caom2_uri}");
                repository.update(&observation)?;
            } else {
                debug!("Putting to CAOM-2: {caom2_uri}");
                repository.put(&observation)?;
            }
        }

        Ok(())
    }

    /// Shared record population plus the instrument-specific build.
    #[allow(clippy::too_many_arguments)]
    fn ingest_observation(
        &self,
        instrument: &str,
        constructor: InstrumentConstructor,
        mut caom2_obs: Observation,
        date: &str,
        uri: &str,
        fits_format: bool,
        headers: &[HeaderMap],
        translated: &TranslationResult,
    ) -> Result<Observation, IngestionError> {
        caom2_obs.telescope = Some(Telescope::new(TELESCOPE_NAME, self.geo));

        // Collect project information.
        let project_code = headers.first().and_then(|h| h.get_str("PROJECT"));
        if let Some(project_id) = valid_project_code(project_code) {
            let project_info = match self.omp.project_info(&project_id)? {
                Some(info) => Some(info),
                None => self.proposals.project_info(&project_id)?,
            };

            // A valid code alone is enough for a proposal shell; keep any
            // previously resolved title/PI rather than overwriting with null.
            let mut proposal = caom2_obs
                .proposal
                .take()
                .filter(|p| p.project_id == project_id)
                .unwrap_or_else(|| Proposal::new(project_id));

            if let Some(info) = project_info {
                if let Some(title) = info.title {
                    proposal.title = Some(title);
                }
                if let Some(pi) = info.pi {
                    proposal.pi = Some(pi);
                }
            }

            caom2_obs.proposal = Some(proposal);
        }

        // Construct the instrument-specific builder bound to the record.
        let mut builder = constructor(caom2_obs, date.to_owned(), uri.to_owned(), fits_format);
        builder.ingest(headers, translated)?;

        Ok(builder.into_observation())
    }
}
