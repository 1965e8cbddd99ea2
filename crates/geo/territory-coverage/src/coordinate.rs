//! Coordinates and great-circle distance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used for haversine distances, in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Conversion factor from meters to statute miles
pub const METERS_TO_MILES: f64 = 0.000_621_371;

/// A latitude/longitude pair outside the valid ranges
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinate {
    /// Offending latitude
    pub latitude: f64,
    /// Offending longitude
    pub longitude: f64,
}

/// A validated WGS84 point.
///
/// Latitude is within `[-90, 90]` and longitude within `[-180, 180]`; both are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if valid {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Builds a coordinate by clamping into the valid ranges.
    ///
    /// Only used for derived points (square corners) whose inputs are already valid.
    pub(crate) fn clamped(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        }
    }

    /// Latitude in degrees
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other`
    pub fn distance_to(&self, other: &Self) -> Distance {
        Distance::from_meters(haversine_meters(self, other))
    }
}

/// Haversine distance between two points in meters.
pub fn haversine_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

/// A distance reported in both meters and miles
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distance {
    /// Meters
    pub meters: f64,
    /// Statute miles
    pub miles: f64,
}

impl Distance {
    /// Wraps a distance in meters
    pub fn from_meters(meters: f64) -> Self {
        Self {
            meters,
            miles: meters * METERS_TO_MILES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.01).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = c(45.75, -108.5);
        assert!(haversine_meters(&p, &p).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let denver = c(39.7392, -104.9903);
        let billings = c(45.78, -108.50);
        let ab = haversine_meters(&denver, &billings);
        let ba = haversine_meters(&billings, &denver);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_meters(&c(0.0, 0.0), &c(1.0, 0.0));
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn miles_follow_meters() {
        let d = Distance::from_meters(1_000.0);
        assert!((d.miles - 0.621_371).abs() < 1e-9);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude":1.5,"longitude":2.5}"#).unwrap();
        assert!((ok.latitude() - 1.5).abs() < f64::EPSILON);
        assert!(serde_json::from_str::<Coordinate>(r#"{"latitude":91,"longitude":0}"#).is_err());
    }
}
