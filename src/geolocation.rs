//! Fixed UKIRT telescope geolocation.
//!
//! The telescope descriptor on every record carries the geocentric position
//! of UKIRT on Mauna Kea in meters. The conversion from geodetic site
//! constants uses the standard reference-ellipsoid formulation:
//!
//! ```text
//! u = atan( (sin φ * (b/a)) / cos φ )
//! ρ_sinφ = (b/a) * sin u + (h/a) * sin φ
//! ρ_cosφ = cos u + (h/a) * cos φ
//! ```
//!
//! where `a` and `b` are the Earth's semi-major and semi-minor axes and `h`
//! is the height above the ellipsoid.

use crate::constants::{
    EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, UKIRT_ALTITUDE_M, UKIRT_LATITUDE_DEG, UKIRT_LONGITUDE_DEG,
};

/// Geocentric coordinates of UKIRT in meters, `(x, y, z)`.
pub fn ukirt_geolocation() -> (f64, f64, f64) {
    geodetic_to_geocentric(UKIRT_LONGITUDE_DEG, UKIRT_LATITUDE_DEG, UKIRT_ALTITUDE_M)
}

/// Convert geodetic longitude/latitude (degrees) and height (meters) into
/// geocentric coordinates in meters.
fn geodetic_to_geocentric(lon_deg: f64, lat_deg: f64, height_m: f64) -> (f64, f64, f64) {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();

    // Ratio of the Earth's minor to major axis (flattening factor)
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

    // Parametric latitude, correcting for the Earth's oblateness.
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (height_m / EARTH_MAJOR_AXIS) * lat.sin();
    let rho_cos_phi = u.cos() + (height_m / EARTH_MAJOR_AXIS) * lat.cos();

    (
        EARTH_MAJOR_AXIS * rho_cos_phi * lon.cos(),
        EARTH_MAJOR_AXIS * rho_cos_phi * lon.sin(),
        EARTH_MAJOR_AXIS * rho_sin_phi,
    )
}

#[cfg(test)]
mod geolocation_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_ukirt_geolocation() {
        let (x, y, z) = ukirt_geolocation();

        // Mauna Kea is west of Greenwich and north of the equator.
        assert!(x < 0.0);
        assert!(y < 0.0);
        assert!(z > 0.0);

        // The site sits on the Earth's surface, a bit above the ellipsoid.
        let radius = (x * x + y * y + z * z).sqrt();
        assert!(radius > EARTH_MINOR_AXIS && radius < EARTH_MAJOR_AXIS + 10_000.0);

        // Geocentric latitude is slightly smaller than the geodetic one.
        let geocentric_lat = (z / (x * x + y * y).sqrt()).atan().to_degrees();
        assert!(geocentric_lat > 19.5 && geocentric_lat < UKIRT_LATITUDE_DEG);

        assert_relative_eq!(
            y.atan2(x).to_degrees(),
            UKIRT_LONGITUDE_DEG,
            epsilon = 1e-9
        );
    }
}
