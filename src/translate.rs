//! # Header translation
//!
//! [`Translator`] derives the auxiliary quantities the instrument builders
//! need from the primary header mapping: base coordinates in degrees,
//! wavelength in meters, exposure time in seconds.
//!
//! UKIRT headers are not consistent across instrument generations. `RABASE`
//! may be decimal hours or a sexagesimal `HH MM SS.S` string; `DECBASE` may
//! be decimal degrees or `±DD MM SS.S`. The translator normalizes both to
//! degrees.
//!
//! Translation failures are non-fatal to the pipeline: the orchestrator logs
//! a warning and continues with an empty [`TranslationResult`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::conversion::{parse_dec_to_deg, parse_ra_to_deg};
use crate::headers::{HeaderMap, HeaderMapExt, HeaderValue};

/// Mapping from derived-quantity name to value. May be empty, never absent.
pub type TranslationResult = BTreeMap<String, f64>;

/// Derived-quantity key for the base right ascension in degrees.
pub const RA_DEG: &str = "ra_deg";
/// Derived-quantity key for the base declination in degrees.
pub const DEC_DEG: &str = "dec_deg";
/// Derived-quantity key for the reference wavelength in meters.
pub const WAVELENGTH_M: &str = "wavelength_m";
/// Derived-quantity key for the exposure time in seconds.
pub const EXPOSURE_S: &str = "exposure_s";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Missing required keyword {0}")]
    MissingKeyword(&'static str),

    #[error("Malformed value for keyword {keyword}: {value}")]
    MalformedValue {
        keyword: &'static str,
        value: String,
    },
}

/// Derives auxiliary quantities from a primary header mapping.
#[derive(Debug, Default)]
pub struct Translator;

impl Translator {
    pub fn new() -> Self {
        Translator
    }

    /// Translate the primary header mapping into derived quantities.
    ///
    /// Arguments
    /// ---------
    /// * `header`: the primary header mapping of a raw document
    ///
    /// Return
    /// ------
    /// * The derived-quantity mapping, or a [`TranslationError`] when a
    ///   required keyword is absent or malformed.
    pub fn translate(&self, header: &HeaderMap) -> Result<TranslationResult, TranslationError> {
        let mut translated = TranslationResult::new();

        translated.insert(
            RA_DEG.to_owned(),
            base_coordinate(header, "RABASE", CoordinateKind::Ra)?,
        );
        translated.insert(
            DEC_DEG.to_owned(),
            base_coordinate(header, "DECBASE", CoordinateKind::Dec)?,
        );

        if let Some(value) = optional_f64(header, "WAVELEN")? {
            // WAVELEN is recorded in microns.
            translated.insert(WAVELENGTH_M.to_owned(), value * 1.0e-6);
        }

        if let Some(value) = optional_f64(header, "EXP_TIME")? {
            translated.insert(EXPOSURE_S.to_owned(), value);
        }

        Ok(translated)
    }
}

enum CoordinateKind {
    Ra,
    Dec,
}

fn base_coordinate(
    header: &HeaderMap,
    keyword: &'static str,
    kind: CoordinateKind,
) -> Result<f64, TranslationError> {
    match header.get(keyword) {
        None => Err(TranslationError::MissingKeyword(keyword)),
        Some(HeaderValue::Int(v)) => Ok(numeric_coordinate(*v as f64, &kind)),
        Some(HeaderValue::Float(v)) => Ok(numeric_coordinate(*v, &kind)),
        Some(HeaderValue::String(s)) => {
            let parsed = match kind {
                CoordinateKind::Ra => parse_ra_to_deg(s),
                CoordinateKind::Dec => parse_dec_to_deg(s),
            };
            parsed.ok_or_else(|| TranslationError::MalformedValue {
                keyword,
                value: s.clone(),
            })
        }
        Some(other) => Err(TranslationError::MalformedValue {
            keyword,
            value: format!("{other:?}"),
        }),
    }
}

fn numeric_coordinate(value: f64, kind: &CoordinateKind) -> f64 {
    match kind {
        // Numeric RABASE is decimal hours.
        CoordinateKind::Ra => value * 15.0,
        CoordinateKind::Dec => value,
    }
}

fn optional_f64(header: &HeaderMap, keyword: &'static str) -> Result<Option<f64>, TranslationError> {
    match header.get(keyword) {
        None => Ok(None),
        Some(_) => match header.get_f64(keyword) {
            Some(v) => Ok(Some(v)),
            None => Err(TranslationError::MalformedValue {
                keyword,
                value: format!("{:?}", header.get(keyword)),
            }),
        },
    }
}
