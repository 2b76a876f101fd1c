//! UIST: the UKIRT imager-spectrometer.
//!
//! UIST frames mix imaging and spectroscopy and their observation type was
//! recorded inconsistently across eras, so intent derivation is a no-op
//! here. The spectral descriptor comes from the `WAVELEN` keyword (microns);
//! the spatial descriptor is the shared translated-quantities default.

use crate::caom2::{Instrument, Observation, SpectralWcs};
use crate::headers::{HeaderMap, HeaderMapExt};
use crate::ingest_errors::IngestionError;
use crate::instrument::{ObservationIngest, ObservationUkirt};

pub struct ObservationUist {
    base: ObservationUkirt,
}

impl ObservationUist {
    pub(crate) fn construct(
        caom2: Observation,
        date: String,
        uri: String,
        fits_format: bool,
    ) -> Box<dyn ObservationIngest> {
        Box::new(ObservationUist {
            base: ObservationUkirt {
                caom2,
                date,
                uri,
                fits_format,
            },
        })
    }
}

impl ObservationIngest for ObservationUist {
    fn base(&self) -> &ObservationUkirt {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObservationUkirt {
        &mut self.base
    }

    fn ingest_instrument(&mut self, _headers: &[HeaderMap]) -> Result<(), IngestionError> {
        self.base.caom2.instrument = Some(Instrument::new("uist"));
        Ok(())
    }

    fn get_spectral_wcs(&self, headers: &[HeaderMap]) -> Option<SpectralWcs> {
        let wavelen_um = headers.first()?.get_f64("WAVELEN")?;
        Some(SpectralWcs {
            ssyssrc: "TOPOCENT".to_owned(),
            wavelength_m: wavelen_um * 1.0e-6,
        })
    }

    fn ingest_type_intent(&mut self, _headers: &[HeaderMap]) {}

    fn instrument_name(&self) -> &'static str {
        "uist"
    }

    fn into_observation(self: Box<Self>) -> Observation {
        self.base.caom2
    }
}
