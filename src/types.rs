//! Core data structures for the map core.
//!
//! This module defines the fundamental types used throughout the library:
//!
//! - [`Coordinate`] - Simple coordinate pair with distance calculations
//! - [`Bounds`] - Rectangular region covering a set of coordinates
//! - [`RawCentre`] / [`Centre`] - Dataset rows before and after geocoding
//! - [`RouteSummary`] - Distance/duration/mode of the active route

#![warn(missing_docs)]

use std::fmt;

use serde::Deserialize;

/// Unique, immutable identifier of a centre record.
pub type CentreId = i64;

/// A coordinate pair with distance calculation capabilities.
///
/// Latitude and longitude are decimal degrees. Values outside the nominal
/// ranges are accepted as-is; no validation happens beyond numeric parse
/// success during geocoding.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub lng: f64,
}

impl Coordinate {
    /// Constructs a new coordinate from decimal degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use centremap::Coordinate;
    ///
    /// let loc = Coordinate::new(23.0150, 91.3967);
    /// assert_eq!(loc.lat, 23.0150);
    /// assert_eq!(loc.lng, 91.3967);
    /// ```
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Calculates the great-circle distance to another coordinate using the
    /// haversine formula.
    ///
    /// Returns the distance in kilometers. The calculation assumes a spherical
    /// Earth with radius 6371 km, which provides accuracy within 0.5% for most
    /// distances.
    ///
    /// # Examples
    ///
    /// ```
    /// use centremap::Coordinate;
    ///
    /// let nyc = Coordinate::new(40.7128, -74.0060);
    /// let la = Coordinate::new(34.0522, -118.2437);
    ///
    /// let distance = nyc.distance_to(&la);
    /// assert!(distance > 3900.0 && distance < 4000.0); // ~3944 km
    /// ```
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        6371.0 * c
    }
}

/// A rectangular region covering a set of coordinates, used for camera fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Southern latitude boundary.
    pub south: f64,
    /// Western longitude boundary.
    pub west: f64,
    /// Northern latitude boundary.
    pub north: f64,
    /// Eastern longitude boundary.
    pub east: f64,
}

impl Bounds {
    /// Computes the bounds covering all given coordinates, or `None` when the
    /// iterator is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use centremap::{Bounds, Coordinate};
    ///
    /// let pts = [Coordinate::new(23.0, 91.4), Coordinate::new(23.1, 91.5)];
    /// let bounds = Bounds::covering(pts.iter().copied()).unwrap();
    /// assert_eq!(bounds.south, 23.0);
    /// assert_eq!(bounds.east, 91.5);
    ///
    /// assert!(Bounds::covering(std::iter::empty()).is_none());
    /// ```
    pub fn covering(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for point in points {
            bounds = Some(match bounds {
                None => Bounds {
                    south: point.lat,
                    west: point.lng,
                    north: point.lat,
                    east: point.lng,
                },
                Some(b) => Bounds {
                    south: b.south.min(point.lat),
                    west: b.west.min(point.lng),
                    north: b.north.max(point.lat),
                    east: b.east.max(point.lng),
                },
            });
        }
        bounds
    }
}

/// One centre row as returned by the dataset provider, before geocoding.
///
/// The location may arrive in one of several formats: a combined decimal
/// `"lat,lng"` string, or an opaque map-provider URL embedding coordinates.
/// Rows whose location resolves to no coordinate are dropped from every
/// downstream view.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCentre {
    /// Unique record identifier.
    #[serde(rename = "vote_centre_iid")]
    pub id: CentreId,
    /// Short centre code, also the marker label.
    #[serde(rename = "vote_centre_code")]
    pub code: String,
    /// Human-readable centre name.
    #[serde(rename = "vote_centre_name")]
    pub name: String,
    /// Free-text area label; blank or absent maps to `"Unknown"`.
    #[serde(rename = "vote_centre_area", default)]
    pub area: Option<String>,
    /// Combined decimal `"lat,lng"` location field.
    #[serde(rename = "location_latitude_longitude", default)]
    pub latlng: Option<String>,
    /// Map-provider URL possibly embedding coordinates.
    #[serde(rename = "location_url", default)]
    pub location_url: Option<String>,
}

/// Sentinel area label for records with a blank or absent area.
pub const UNKNOWN_AREA: &str = "Unknown";

/// A geocoded centre record, the unit of everything downstream: list entries,
/// markers, nearest-neighbor search, and routing destinations.
#[derive(Debug, Clone)]
pub struct Centre {
    /// Unique record identifier.
    pub id: CentreId,
    /// Short centre code, also the marker label.
    pub code: String,
    /// Human-readable centre name.
    pub name: String,
    /// Raw area label as delivered by the provider.
    pub area: Option<String>,
    /// Resolved coordinate.
    pub coords: Coordinate,
}

impl Centre {
    /// The trimmed area label, or [`UNKNOWN_AREA`] when blank or absent.
    pub fn area_label(&self) -> &str {
        match self.area.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => UNKNOWN_AREA,
        }
    }
}

/// Travel mode of a route request or an active route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    /// Driving directions, always tried first.
    Driving,
    /// Walking directions, the fallback mode.
    Walking,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelMode::Driving => write!(f, "Driving"),
            TravelMode::Walking => write!(f, "Walking"),
        }
    }
}

/// Base map style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    /// Standard road map tiles.
    Roadmap,
    /// Satellite imagery.
    Satellite,
}

/// Status of the one-shot device location request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationStatus {
    /// No request has completed yet.
    NotDetected,
    /// A request is in flight.
    Locating,
    /// A position was obtained.
    Found,
    /// The request was denied or failed.
    DeniedOrError,
    /// The host exposes no geolocation capability.
    Unsupported,
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LocationStatus::NotDetected => "Location not detected",
            LocationStatus::Locating => "Locating...",
            LocationStatus::Found => "Location found",
            LocationStatus::DeniedOrError => "Denied/Error",
            LocationStatus::Unsupported => "Not supported",
        };
        write!(f, "{text}")
    }
}

/// The distance/duration leg of a successful directions response, as
/// formatted by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLeg {
    /// Human-readable distance, e.g. `"4.2 km"`.
    pub distance: String,
    /// Human-readable duration, e.g. `"12 mins"`.
    pub duration: String,
}

/// Summary of the single active route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    /// Human-readable distance of the rendered route.
    pub distance: String,
    /// Human-readable duration of the rendered route.
    pub duration: String,
    /// Travel mode that actually succeeded.
    pub mode: TravelMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distance_is_zero_for_identical_points() {
        let a = Coordinate::new(23.0, 91.4);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(23.0, 91.4);
        let b = Coordinate::new(23.1, 91.5);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
    }

    #[test]
    fn distance_grows_with_separation_for_nearby_points() {
        let origin = Coordinate::new(23.0, 91.4);
        let near = Coordinate::new(23.01, 91.41);
        let far = Coordinate::new(23.1, 91.5);
        assert!(origin.distance_to(&near) < origin.distance_to(&far));
    }

    #[test]
    fn area_label_trims_and_falls_back_to_unknown() {
        let mut centre = Centre {
            id: 1,
            code: "A1".into(),
            name: "North School".into(),
            area: Some("  North ".into()),
            coords: Coordinate::new(23.0, 91.4),
        };
        assert_eq!(centre.area_label(), "North");

        centre.area = Some("   ".into());
        assert_eq!(centre.area_label(), UNKNOWN_AREA);

        centre.area = None;
        assert_eq!(centre.area_label(), UNKNOWN_AREA);
    }

    #[test]
    fn raw_centre_deserializes_provider_columns() {
        let row: RawCentre = serde_json::from_str(
            r#"{
                "vote_centre_iid": 7,
                "vote_centre_code": "C7",
                "vote_centre_name": "City Hall",
                "vote_centre_area": "Central",
                "location_latitude_longitude": "23.0,91.4"
            }"#,
        )
        .unwrap();
        assert_eq!(row.id, 7);
        assert_eq!(row.code, "C7");
        assert_eq!(row.latlng.as_deref(), Some("23.0,91.4"));
        assert_eq!(row.location_url, None);
    }
}
