//! IRCAM: the original UKIRT 1-5µm imager.
//!
//! Early IRCAM headers carry too little geometry to build trustworthy
//! coordinate descriptors, so both WCS capabilities are explicit no-ops.

use crate::caom2::{Instrument, Observation, SpatialWcs, SpectralWcs};
use crate::headers::HeaderMap;
use crate::ingest_errors::IngestionError;
use crate::instrument::{ObservationIngest, ObservationUkirt};
use crate::translate::TranslationResult;

pub struct ObservationIrcam {
    base: ObservationUkirt,
}

impl ObservationIrcam {
    pub(crate) fn construct(
        caom2: Observation,
        date: String,
        uri: String,
        fits_format: bool,
    ) -> Box<dyn ObservationIngest> {
        Box::new(ObservationIrcam {
            base: ObservationUkirt {
                caom2,
                date,
                uri,
                fits_format,
            },
        })
    }
}

impl ObservationIngest for ObservationIrcam {
    fn base(&self) -> &ObservationUkirt {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObservationUkirt {
        &mut self.base
    }

    fn ingest_instrument(&mut self, _headers: &[HeaderMap]) -> Result<(), IngestionError> {
        self.base.caom2.instrument = Some(Instrument::new("ircam"));
        Ok(())
    }

    fn get_spectral_wcs(&self, _headers: &[HeaderMap]) -> Option<SpectralWcs> {
        None
    }

    fn get_spatial_wcs(
        &self,
        _headers: &[HeaderMap],
        _translated: &TranslationResult,
    ) -> Option<SpatialWcs> {
        None
    }

    fn instrument_name(&self) -> &'static str {
        "ircam"
    }

    fn into_observation(self: Box<Self>) -> Observation {
        self.base.caom2
    }
}
