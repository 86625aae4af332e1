//! Coordinate extraction from heterogeneous raw location fields.
//!
//! Dataset rows carry their location either as a combined decimal `"lat,lng"`
//! string or as an opaque map-provider URL with coordinates embedded in one of
//! two shapes (`!3d<lat>!4d<lng>` path segments or a `q=<lat>,<lng>` query
//! parameter). [`extract`] tries these sources in priority order and returns
//! `None` when none of them yields a coordinate.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Coordinate, RawCentre};

static URL_PATH_COORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!3d(-?\d+\.\d+).*!4d(-?\d+\.\d+)").unwrap());

static URL_QUERY_COORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"q=(-?\d+\.\d+),(-?\d+\.\d+)").unwrap());

/// Derives a coordinate from a raw centre row, or `None` when no source field
/// resolves.
///
/// Priority order:
///
/// 1. The combined `"lat,lng"` field: split on the comma and parse both
///    halves with JS `Number` coercion (blank halves become 0). A pair is
///    accepted when exactly two parts exist and the first is numeric; an
///    unparseable second half is carried through as NaN rather than
///    rejected. Whether such half-valid pairs should be
///    rejected outright is an open product question; the current behavior
///    mirrors the deployed one.
/// 2. The location URL's `!3d<lat>!4d<lng>` pattern.
/// 3. The location URL's `q=<lat>,<lng>` query parameter.
///
/// # Examples
///
/// ```
/// use centremap::geocode;
/// # fn row(latlng: Option<&str>, url: Option<&str>) -> centremap::RawCentre {
/// #     serde_json::from_value(serde_json::json!({
/// #         "vote_centre_iid": 1,
/// #         "vote_centre_code": "A1",
/// #         "vote_centre_name": "School",
/// #         "location_latitude_longitude": latlng,
/// #         "location_url": url,
/// #     })).unwrap()
/// # }
///
/// let direct = row(Some("23.0,91.4"), None);
/// assert_eq!(geocode::extract(&direct).unwrap().lat, 23.0);
///
/// let url = row(None, Some("https://maps.example/place/!3d12.34!4d56.78"));
/// let coords = geocode::extract(&url).unwrap();
/// assert_eq!((coords.lat, coords.lng), (12.34, 56.78));
///
/// let bare = row(None, None);
/// assert!(geocode::extract(&bare).is_none());
/// ```
pub fn extract(row: &RawCentre) -> Option<Coordinate> {
    if let Some(latlng) = row.latlng.as_deref() {
        if let Some(coords) = parse_latlng_pair(latlng) {
            return Some(coords);
        }
    }
    if let Some(url) = row.location_url.as_deref() {
        if let Some(caps) = URL_PATH_COORDS.captures(url) {
            return pair_from_captures(&caps);
        }
        if let Some(caps) = URL_QUERY_COORDS.captures(url) {
            return pair_from_captures(&caps);
        }
    }
    None
}

// Mirrors JS `split(',').map(Number)`: a blank half coerces to 0, an
// unparseable one becomes NaN, and only the first half is checked for
// validity.
fn parse_latlng_pair(field: &str) -> Option<Coordinate> {
    let parts: Vec<f64> = field.split(',').map(js_number).collect();
    match parts.as_slice() {
        [lat, lng] if !lat.is_nan() => Some(Coordinate::new(*lat, *lng)),
        _ => None,
    }
}

fn js_number(part: &str) -> f64 {
    let trimmed = part.trim();
    if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse().unwrap_or(f64::NAN)
    }
}

fn pair_from_captures(caps: &regex::Captures<'_>) -> Option<Coordinate> {
    let lat = caps.get(1)?.as_str().parse().ok()?;
    let lng = caps.get(2)?.as_str().parse().ok()?;
    Some(Coordinate::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(latlng: Option<&str>, url: Option<&str>) -> RawCentre {
        RawCentre {
            id: 1,
            code: "A1".into(),
            name: "School".into(),
            area: None,
            latlng: latlng.map(String::from),
            location_url: url.map(String::from),
        }
    }

    #[test]
    fn combined_field_parses_exactly() {
        let coords = extract(&row(Some("23.0,91.4"), None)).unwrap();
        assert_eq!((coords.lat, coords.lng), (23.0, 91.4));
    }

    #[test]
    fn combined_field_takes_priority_over_url() {
        let coords = extract(&row(
            Some("1.5,2.5"),
            Some("https://maps.example/!3d9.9!4d8.8"),
        ))
        .unwrap();
        assert_eq!((coords.lat, coords.lng), (1.5, 2.5));
    }

    #[test]
    fn url_path_pattern_resolves() {
        let coords = extract(&row(
            None,
            Some("https://maps.example/place/Foo/@/data=!3d12.34!4d56.78"),
        ))
        .unwrap();
        assert_eq!((coords.lat, coords.lng), (12.34, 56.78));
    }

    #[test]
    fn url_query_pattern_resolves_with_negatives() {
        let coords = extract(&row(None, Some("https://maps.example/?q=-23.5,-46.6"))).unwrap();
        assert_eq!((coords.lat, coords.lng), (-23.5, -46.6));
    }

    #[test]
    fn unresolvable_rows_yield_none() {
        assert!(extract(&row(None, None)).is_none());
        assert!(extract(&row(Some("not,numbers,at,all"), None)).is_none());
        assert!(extract(&row(None, Some("https://maps.example/plain"))).is_none());
    }

    #[test]
    fn half_valid_pair_passes_with_nan_longitude() {
        // Deployed behavior: only the first half is validated.
        let coords = extract(&row(Some("23.0,abc"), None)).unwrap();
        assert_eq!(coords.lat, 23.0);
        assert!(coords.lng.is_nan());
    }

    #[test]
    fn unparseable_first_half_rejects_pair() {
        assert!(extract(&row(Some("abc,91.4"), None)).is_none());
    }

    #[test]
    fn blank_halves_coerce_to_zero() {
        // `Number("")` is 0 in the deployed app, not NaN.
        let coords = extract(&row(Some("23.0,"), None)).unwrap();
        assert_eq!((coords.lat, coords.lng), (23.0, 0.0));

        let coords = extract(&row(Some(" ,91.4"), None)).unwrap();
        assert_eq!((coords.lat, coords.lng), (0.0, 91.4));
    }
}
