//! # Canonical observation data model
//!
//! The standardized description of one UKIRT observation, independent of the
//! instrument that took it, plus the instrument-specific sub-structure the
//! per-instrument builders attach (instrument identity, coordinate
//! descriptors, intent).
//!
//! Identity is `(collection = "UKIRT", observation_id)` where the id is the
//! raw filename without its extension. Records round-trip through XML via
//! [`xml::ObservationReader`] and [`xml::ObservationWriter`]; a re-read
//! record compares field-for-field equal to the written one.

pub mod xml;

use serde::{Deserialize, Serialize};

/// Telescope descriptor: name and geocentric position in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telescope {
    pub name: String,
    #[serde(rename = "geoLocationX")]
    pub geo_location_x: f64,
    #[serde(rename = "geoLocationY")]
    pub geo_location_y: f64,
    #[serde(rename = "geoLocationZ")]
    pub geo_location_z: f64,
}

impl Telescope {
    pub fn new(name: &str, geo_location: (f64, f64, f64)) -> Self {
        let (geo_location_x, geo_location_y, geo_location_z) = geo_location;
        Telescope {
            name: name.to_owned(),
            geo_location_x,
            geo_location_y,
            geo_location_z,
        }
    }
}

/// Observing-program metadata attached to a record.
///
/// A proposal exists exactly when a valid project code was present in the
/// headers; title and PI are filled in only when a project-information
/// source supplied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(rename = "projectID")]
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pi: Option<String>,
}

impl Proposal {
    pub fn new(project_id: String) -> Self {
        Proposal {
            project_id,
            title: None,
            pi: None,
        }
    }
}

/// Instrument identity sub-structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
}

impl Instrument {
    pub fn new(name: &str) -> Self {
        Instrument {
            name: name.to_owned(),
        }
    }
}

/// Classification of an observation's purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationIntent {
    Science,
    Calibration,
}

/// Spatial coordinate descriptor: the reference position on the sky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialWcs {
    pub coordsys: String,
    #[serde(rename = "raDeg")]
    pub ra_deg: f64,
    #[serde(rename = "decDeg")]
    pub dec_deg: f64,
    pub equinox: f64,
}

/// Spectral coordinate descriptor: the reference wavelength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralWcs {
    pub ssyssrc: String,
    #[serde(rename = "wavelengthM")]
    pub wavelength_m: f64,
}

/// The canonical persisted observation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "observation")]
pub struct Observation {
    pub collection: String,
    #[serde(rename = "observationID")]
    pub observation_id: String,
    #[serde(rename = "sequenceNumber", skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<i64>,
    #[serde(rename = "artifactURI", skip_serializing_if = "Option::is_none")]
    pub artifact_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telescope: Option<Telescope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<Proposal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<Instrument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<ObservationIntent>,
    #[serde(rename = "spatialWCS", skip_serializing_if = "Option::is_none")]
    pub spatial_wcs: Option<SpatialWcs>,
    #[serde(rename = "spectralWCS", skip_serializing_if = "Option::is_none")]
    pub spectral_wcs: Option<SpectralWcs>,
}

impl Observation {
    /// A freshly constructed record with basic identity only.
    pub fn new(collection: &str, observation_id: &str) -> Self {
        Observation {
            collection: collection.to_owned(),
            observation_id: observation_id.to_owned(),
            sequence_number: None,
            artifact_uri: None,
            telescope: None,
            proposal: None,
            instrument: None,
            intent: None,
            spatial_wcs: None,
            spectral_wcs: None,
        }
    }
}
