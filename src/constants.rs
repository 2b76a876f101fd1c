//! # Constants and type definitions for ukirt2caom2
//!
//! This module centralizes the **archive identifiers**, **URI schemes**, and
//! **telescope site constants** used throughout the crate, together with a few
//! shared type aliases.
//!
//! These definitions are used by the ingestion orchestrator, the instrument
//! builders and the geolocation provider.

/// Angle expressed in degrees.
pub type Degree = f64;

// -------------------------------------------------------------------------------------------------
// Archive identifiers and URI schemes
// -------------------------------------------------------------------------------------------------

/// CAOM-2 collection name under which UKIRT observations are archived.
pub const COLLECTION: &str = "UKIRT";

/// Telescope name recorded on every observation.
pub const TELESCOPE_NAME: &str = "UKIRT";

/// URI prefix for raw data files in the archive (`ad:UKIRT/<filename>`).
pub const RAW_URI_PREFIX: &str = "ad:UKIRT/";

/// URI prefix for canonical observation records (`caom2:UKIRT/<id>`).
pub const CAOM_URI_PREFIX: &str = "caom2:UKIRT/";

// -------------------------------------------------------------------------------------------------
// UKIRT site (Mauna Kea) and reference ellipsoid
// -------------------------------------------------------------------------------------------------

/// Geodetic longitude of UKIRT in degrees, east positive.
pub const UKIRT_LONGITUDE_DEG: Degree = -155.4702;

/// Geodetic latitude of UKIRT in degrees.
pub const UKIRT_LATITUDE_DEG: Degree = 19.8225;

/// Elevation of UKIRT above the reference ellipsoid in meters.
pub const UKIRT_ALTITUDE_M: f64 = 4194.0;

/// Earth equatorial radius in meters (WGS84).
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (WGS84).
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;
