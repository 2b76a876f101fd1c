//! # Instrument dispatch and record builders
//!
//! Each UKIRT instrument contributes a builder implementing
//! [`ObservationIngest`]: a capability set over the record it is bound to
//! (instrument identity, spectral/spatial coordinate descriptors, intent),
//! composed by the provided [`ObservationIngest::ingest`] entry point.
//!
//! Dispatch is a plain table: [`instrument_classes`] maps instrument names
//! to constructors. The orchestrator consults the table once, before the
//! document loop, so an unknown instrument is a configuration error rather
//! than a per-document failure. No builder registers itself as a side
//! effect of being loaded.

pub mod ircam;
pub mod uist;

use std::collections::HashMap;

use crate::caom2::{Observation, ObservationIntent, SpatialWcs, SpectralWcs};
use crate::headers::{HeaderMap, HeaderMapExt};
use crate::ingest_errors::IngestionError;
use crate::translate::{TranslationResult, DEC_DEG, RA_DEG};

/// Per-record state shared by every instrument builder.
#[derive(Debug)]
pub struct ObservationUkirt {
    pub caom2: Observation,
    pub date: String,
    pub uri: String,
    pub fits_format: bool,
}

/// Constructor signature stored in the dispatch table.
pub type InstrumentConstructor =
    fn(Observation, String, String, bool) -> Box<dyn ObservationIngest>;

/// The dispatch table of registered instrument builders.
pub fn instrument_classes() -> HashMap<&'static str, InstrumentConstructor> {
    let mut classes: HashMap<&'static str, InstrumentConstructor> = HashMap::new();
    classes.insert("ircam", ircam::ObservationIrcam::construct);
    classes.insert("uist", uist::ObservationUist::construct);
    classes
}

/// Capability set implemented by every instrument builder.
pub trait ObservationIngest {
    /// The shared state bound at construction.
    fn base(&self) -> &ObservationUkirt;
    fn base_mut(&mut self) -> &mut ObservationUkirt;

    /// Set the instrument-identity sub-structure on the bound record.
    /// Instrument-specific; every builder implements this.
    fn ingest_instrument(&mut self, headers: &[HeaderMap]) -> Result<(), IngestionError>;

    /// Spectral coordinate descriptor, when the instrument provides one.
    fn get_spectral_wcs(&self, headers: &[HeaderMap]) -> Option<SpectralWcs> {
        let _ = headers;
        None
    }

    /// Spatial coordinate descriptor derived from the translated quantities.
    fn get_spatial_wcs(
        &self,
        headers: &[HeaderMap],
        translated: &TranslationResult,
    ) -> Option<SpatialWcs> {
        let _ = headers;
        let ra_deg = *translated.get(RA_DEG)?;
        let dec_deg = *translated.get(DEC_DEG)?;
        Some(SpatialWcs {
            coordsys: "ICRS".to_owned(),
            ra_deg,
            dec_deg,
            equinox: 2000.0,
        })
    }

    /// Derive and set the observation-intent classification. A no-op
    /// override is valid for instruments where intent does not apply.
    fn ingest_type_intent(&mut self, headers: &[HeaderMap]) {
        let obstype = headers.first().and_then(|h| h.get_str("OBSTYPE"));
        if let Some(obstype) = obstype {
            let intent = if obstype.eq_ignore_ascii_case("OBJECT") {
                ObservationIntent::Science
            } else {
                ObservationIntent::Calibration
            };
            self.base_mut().caom2.intent = Some(intent);
        }
    }

    /// Entry point invoked by the orchestrator: populate the bound record
    /// from the headers and translated quantities.
    fn ingest(
        &mut self,
        headers: &[HeaderMap],
        translated: &TranslationResult,
    ) -> Result<(), IngestionError> {
        if headers.is_empty() {
            return Err(IngestionError::Instrument {
                instrument: self.instrument_name().to_owned(),
                message: "document has no primary header".to_owned(),
            });
        }

        let uri = self.base().uri.clone();
        self.base_mut().caom2.artifact_uri = Some(uri);

        self.ingest_instrument(headers)?;

        let spectral = self.get_spectral_wcs(headers);
        let spatial = self.get_spatial_wcs(headers, translated);
        let base = self.base_mut();
        base.caom2.spectral_wcs = spectral;
        base.caom2.spatial_wcs = spatial;

        self.ingest_type_intent(headers);
        Ok(())
    }

    /// Name used in error reporting.
    fn instrument_name(&self) -> &'static str;

    /// Release the populated record.
    fn into_observation(self: Box<Self>) -> Observation;
}
