//! On-map markers and the teardown-and-rebuild reconciler.

use tracing::debug;

use crate::providers::MapCamera;
use crate::types::{Bounds, Centre, CentreId, Coordinate};

/// A rendered overlay marker.
///
/// Attachment to the map happens when the factory constructs the marker;
/// [`detach`](Marker::detach) removes it again. The user-location variant
/// ignores [`set_highlight`](Marker::set_highlight).
pub trait Marker {
    /// Moves the marker to a new coordinate.
    fn update_position(&mut self, at: Coordinate);
    /// Toggles the highlighted visual state.
    fn set_highlight(&mut self, highlighted: bool);
    /// Removes the marker from the map.
    fn detach(&mut self);
}

/// Constructs attached markers on the host map.
pub trait MarkerFactory {
    /// Creates a numbered centre marker. Clicks on it must be forwarded by
    /// the host to [`MapController::select`](crate::MapController::select)
    /// with the bound id.
    fn centre_marker(&mut self, at: Coordinate, label: &str, id: CentreId) -> Box<dyn Marker>;

    /// Creates the visually distinct, non-interactive user-location marker.
    fn user_marker(&mut self, at: Coordinate) -> Box<dyn Marker>;
}

struct BoundMarker {
    id: CentreId,
    handle: Box<dyn Marker>,
}

/// The reconciled collection of centre markers.
///
/// Reconciliation is a full rebuild: every visible-set change detaches all
/// existing markers and creates one fresh marker per visible centre, then
/// fits the camera over the new collection. Selection changes only flip
/// highlight flags on the existing markers.
#[derive(Default)]
pub struct MarkerSet {
    bound: Vec<BoundMarker>,
}

impl MarkerSet {
    /// Tears down the current markers and creates one per visible centre,
    /// then fits the camera over them (no-op when the set is empty).
    pub fn rebuild(
        &mut self,
        visible: &[&Centre],
        factory: &mut dyn MarkerFactory,
        camera: &mut dyn MapCamera,
    ) {
        for mut marker in self.bound.drain(..) {
            marker.handle.detach();
        }

        for centre in visible {
            let handle = factory.centre_marker(centre.coords, &centre.code, centre.id);
            self.bound.push(BoundMarker {
                id: centre.id,
                handle,
            });
        }
        debug!(markers = self.bound.len(), "rebuilt marker collection");

        if let Some(bounds) = Bounds::covering(visible.iter().map(|centre| centre.coords)) {
            camera.fit_bounds(bounds);
        }
    }

    /// Highlights the marker for `selected` and clears every other highlight.
    pub fn highlight(&mut self, selected: Option<CentreId>) {
        for marker in &mut self.bound {
            marker.handle.set_highlight(Some(marker.id) == selected);
        }
    }

    /// Number of rendered centre markers.
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    /// Whether no centre markers are rendered.
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}
