//! Host-environment seams.
//!
//! Everything the core cannot do itself — moving the map camera, creating
//! overlay markers, asking for directions, reading the device position,
//! prompting the user — is expressed as a trait here. The host implements
//! these once, bundles them into a [`Providers`] context at startup, and
//! passes that context to [`MapController::new`](crate::MapController::new);
//! no ambient globals are consulted.
//!
//! All traits are single-threaded: the core runs on the host's event loop and
//! providers are only ever called from there, so no `Send`/`Sync` bounds are
//! imposed.

use thiserror::Error;

use crate::marker::MarkerFactory;
use crate::routing::{DirectionsService, RouteOverlay};
use crate::types::{Bounds, CentreId, Coordinate, MapKind};

/// Camera operations on the host map widget.
pub trait MapCamera {
    /// Pans the camera to the given coordinate.
    fn pan_to(&mut self, target: Coordinate);
    /// Sets the camera zoom level.
    fn set_zoom(&mut self, zoom: u8);
    /// Fits the camera so the whole region is visible.
    fn fit_bounds(&mut self, bounds: Bounds);
    /// Switches the base map style.
    fn set_map_kind(&mut self, kind: MapKind);
}

/// One-shot device location source.
///
/// A call to [`request_position`](Geolocator::request_position) must
/// eventually be answered by the host through
/// [`MapController::finish_locate`](crate::MapController::finish_locate);
/// the core never subscribes to continuous updates.
pub trait Geolocator {
    /// Whether the host exposes a location capability at all.
    fn supported(&self) -> bool;
    /// Starts a single position request.
    fn request_position(&mut self);
}

/// Failure modes of a device location request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The user denied the permission prompt.
    #[error("permission denied")]
    PermissionDenied,
    /// The device could not produce a position fix.
    #[error("position unavailable")]
    PositionUnavailable,
    /// The request timed out on the host side.
    #[error("request timed out")]
    Timeout,
}

/// User-facing shell operations: prompts, external links, list scrolling.
pub trait HostShell {
    /// Shows a passive message to the user.
    fn alert(&mut self, message: &str);
    /// Asks the user a yes/no question and returns their answer.
    fn confirm(&mut self, message: &str) -> bool;
    /// Opens a URL in an external application or tab.
    fn open_external(&mut self, url: &str);
    /// Scrolls the list entry for the given centre into view.
    fn scroll_to(&mut self, id: CentreId);
}

/// The provider context handed to the controller at startup.
pub struct Providers {
    /// Map camera control.
    pub camera: Box<dyn MapCamera>,
    /// Marker construction.
    pub markers: Box<dyn MarkerFactory>,
    /// Directions lookups.
    pub directions: Box<dyn DirectionsService>,
    /// The single route overlay.
    pub overlay: Box<dyn RouteOverlay>,
    /// Device location.
    pub geolocator: Box<dyn Geolocator>,
    /// Prompts and navigation.
    pub shell: Box<dyn HostShell>,
}
