//! Typed configuration for the map core.
//!
//! Hosts usually deserialize this from an embedded JSON blob or just take
//! [`MapConfig::default`], which centers on Feni with the zoom levels the
//! deployed map uses.

use serde::Deserialize;

use crate::types::Coordinate;

/// Camera and navigation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial camera center.
    pub center: Coordinate,
    /// Initial camera zoom.
    pub zoom: u8,
    /// Zoom applied when a centre is selected.
    pub select_zoom: u8,
    /// Zoom applied after a locate with recenter.
    pub locate_zoom: u8,
    /// Base URL for the external navigation deep link; the destination is
    /// appended as `&destination=<lat>,<lng>`.
    pub external_nav_base: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinate::new(23.0150, 91.3967),
            zoom: 12,
            select_zoom: 15,
            locate_zoom: 14,
            external_nav_base: "https://www.google.com/maps/dir/?api=1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: MapConfig = serde_json::from_str(r#"{"zoom": 10}"#).unwrap();
        assert_eq!(config.zoom, 10);
        assert_eq!(config.select_zoom, 15);
        assert_eq!(config.center, Coordinate::new(23.0150, 91.3967));
    }
}
