//! The controller owning all shared map state.
//!
//! [`MapController`] is the single owner of the dataset, the active filters,
//! the selected centre, the user location, the marker collection, and the
//! route planner. The host forwards user input (search text, filter choice,
//! marker/list clicks, locate and route actions) into it and feeds provider
//! completions back through the `finish_*` methods; the controller pushes
//! effects out through the [`Providers`] context. All of it runs on the
//! host's event loop, one callback at a time.

use tracing::{debug, info, warn};

use crate::config::MapConfig;
use crate::dataset::{Dataset, DatasetProvider};
use crate::error::Error;
use crate::filter;
use crate::marker::{Marker, MarkerSet};
use crate::providers::{GeolocationError, Providers};
use crate::routing::{self, RouteOutcome, RoutePlanner, RouteTicket};
use crate::types::{Centre, CentreId, Coordinate, LocationStatus, MapKind, RouteSummary};

/// Coordinates selection, location, filtering, markers, and routing.
pub struct MapController {
    config: MapConfig,
    providers: Providers,
    dataset: Dataset,
    loading: bool,
    query: String,
    area_filter: Option<String>,
    selected: Option<CentreId>,
    user_location: Option<Coordinate>,
    location_status: LocationStatus,
    pending_recenter: bool,
    markers: MarkerSet,
    user_marker: Option<Box<dyn Marker>>,
    planner: RoutePlanner,
    map_kind: MapKind,
}

impl MapController {
    /// Creates a controller around the given provider context.
    pub fn new(config: MapConfig, providers: Providers) -> Self {
        Self {
            config,
            providers,
            dataset: Dataset::default(),
            loading: true,
            query: String::new(),
            area_filter: None,
            selected: None,
            user_location: None,
            location_status: LocationStatus::NotDetected,
            pending_recenter: false,
            markers: MarkerSet::default(),
            user_marker: None,
            planner: RoutePlanner::default(),
            map_kind: MapKind::Roadmap,
        }
    }

    /// Pulls all rows from the dataset backend and rebuilds the map state.
    ///
    /// On failure the error is logged and the view is left empty and
    /// non-loading; there is no automatic retry.
    pub fn load_from(&mut self, provider: &mut dyn DatasetProvider) {
        match provider.list_records() {
            Ok(rows) => {
                self.dataset = Dataset::from_rows(rows);
                self.loading = false;
                self.rebuild_markers();
            }
            Err(err) => {
                warn!(%err, "failed to load centre dataset");
                self.loading = false;
            }
        }
    }

    /// Updates the search text and reconciles the markers.
    pub fn set_query(&mut self, query: &str) {
        if self.query == query {
            return;
        }
        self.query = query.to_string();
        self.rebuild_markers();
    }

    /// Updates the area filter (`None` shows all areas) and reconciles the
    /// markers.
    pub fn set_area_filter(&mut self, area: Option<&str>) {
        if self.area_filter.as_deref() == area {
            return;
        }
        self.area_filter = area.map(String::from);
        self.rebuild_markers();
    }

    /// The centres passing the current query and area filter, in dataset
    /// order.
    pub fn visible(&self) -> Vec<&Centre> {
        filter::visible(self.dataset.centres(), &self.query, self.area_filter.as_deref())
    }

    /// Distinct area labels across the geocoded dataset, sorted ascending.
    pub fn areas(&self) -> &[String] {
        self.dataset.areas()
    }

    /// Marks a centre as selected: moves the marker highlight, pans and zooms
    /// the camera to it, and asks the host to scroll its list entry into
    /// view. The marker collection is not rebuilt.
    pub fn select(&mut self, id: CentreId) {
        self.selected = Some(id);
        self.markers.highlight(Some(id));
        if let Some(coords) = self.dataset.get(id).map(|centre| centre.coords) {
            self.providers.camera.pan_to(coords);
            self.providers.camera.set_zoom(self.config.select_zoom);
        }
        self.providers.shell.scroll_to(id);
    }

    /// Starts a one-shot device location request.
    ///
    /// When the host exposes no geolocation capability the status becomes
    /// [`LocationStatus::Unsupported`] and no request is issued. The camera
    /// recenters on the fix only when `recenter` is set.
    pub fn locate(&mut self, recenter: bool) {
        if !self.providers.geolocator.supported() {
            self.location_status = LocationStatus::Unsupported;
            return;
        }
        self.location_status = LocationStatus::Locating;
        self.pending_recenter = recenter;
        self.providers.geolocator.request_position();
    }

    /// Delivers the result of the outstanding location request.
    ///
    /// A fix replaces the previous user-location marker with a fresh one.
    /// Denial or failure only updates the status; nothing is retried.
    pub fn finish_locate(&mut self, result: Result<Coordinate, GeolocationError>) {
        match result {
            Ok(position) => {
                self.user_location = Some(position);
                self.location_status = LocationStatus::Found;
                if let Some(mut old) = self.user_marker.take() {
                    old.detach();
                }
                self.user_marker = Some(self.providers.markers.user_marker(position));
                if self.pending_recenter {
                    self.providers.camera.pan_to(position);
                    self.providers.camera.set_zoom(self.config.locate_zoom);
                }
                self.pending_recenter = false;
                info!(lat = position.lat, lng = position.lng, "device position acquired");
            }
            Err(err) => {
                warn!(%err, "geolocation request failed");
                self.location_status = LocationStatus::DeniedOrError;
                self.pending_recenter = false;
            }
        }
    }

    /// Requests a route from the user's location to the given centre.
    ///
    /// Without a known user location this prompts the user, starts a locate,
    /// and returns without issuing a route request. Otherwise the centre is
    /// selected and a driving-mode lookup is started; any previously
    /// outstanding request is superseded.
    pub fn route_to(&mut self, id: CentreId) -> Result<(), Error> {
        let Some(destination) = self.dataset.get(id).map(|centre| centre.coords) else {
            return Err(Error::UnknownCentre(id));
        };
        let Some(origin) = self.user_location else {
            self.providers.shell.alert("Please find your location first.");
            self.locate(true);
            return Ok(());
        };

        self.select(id);
        let request = self.planner.begin(origin, destination);
        debug!(centre = id, "requesting driving route");
        self.providers.directions.request(request);
        Ok(())
    }

    /// Delivers the result of a provider route attempt.
    ///
    /// Stale completions (superseded generation) are discarded. A failed
    /// driving attempt retries once in walking mode with the same origin and
    /// destination; a failed walking attempt asks for confirmation before
    /// opening the external navigation deep link, and does nothing further on
    /// decline.
    pub fn finish_route(&mut self, ticket: RouteTicket, outcome: RouteOutcome) {
        if !self.planner.is_current(ticket) {
            debug!(mode = %ticket.mode, "discarding stale route completion");
            return;
        }
        match outcome {
            RouteOutcome::Success(leg) => {
                self.providers.overlay.render(ticket);
                self.planner.complete(ticket.mode, leg);
                info!(mode = %ticket.mode, "route rendered");
            }
            RouteOutcome::Failed(status) => match self.planner.fall_back(ticket) {
                Some(request) => {
                    info!(%status, "driving route not found, trying walking");
                    self.providers.directions.request(request);
                }
                None => {
                    warn!(%status, "no route found in any mode");
                    if self
                        .providers
                        .shell
                        .confirm("Route not found on map. Open external maps app?")
                    {
                        if let Some(url) = self.planner.external_link(&self.config) {
                            self.providers.shell.open_external(&url);
                        }
                    }
                }
            },
        }
    }

    /// Routes to the centre nearest the user's location.
    ///
    /// The nearest search covers the entire dataset, ignoring active filters.
    /// Without a known user location this prompts and starts a locate
    /// instead.
    pub fn find_nearest_and_route(&mut self) {
        let Some(origin) = self.user_location else {
            self.providers.shell.alert("Please locate yourself first!");
            self.locate(true);
            return;
        };
        if let Some(id) = self.dataset.nearest(origin).map(|centre| centre.id) {
            // The id just came out of the dataset, so this cannot fail.
            let _ = self.route_to(id);
        }
    }

    /// Removes the rendered route overlay and clears the active route
    /// summary, unconditionally. In-flight completions are invalidated.
    pub fn clear_route(&mut self) {
        self.providers.overlay.clear();
        self.planner.clear();
    }

    /// Opens the external navigation app for the selected centre, if any.
    pub fn open_external_map(&mut self) {
        let Some(coords) = self
            .selected
            .and_then(|id| self.dataset.get(id))
            .map(|centre| centre.coords)
        else {
            return;
        };
        let url = routing::external_link(&self.config.external_nav_base, coords);
        self.providers.shell.open_external(&url);
    }

    /// Switches the base map style.
    pub fn set_map_kind(&mut self, kind: MapKind) {
        self.map_kind = kind;
        self.providers.camera.set_map_kind(kind);
    }

    /// The currently selected centre id, if any.
    pub fn selected(&self) -> Option<CentreId> {
        self.selected
    }

    /// The last known user location, if any.
    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    /// Status of the device location request.
    pub fn location_status(&self) -> LocationStatus {
        self.location_status
    }

    /// Summary of the active route, if one is rendered.
    pub fn route_summary(&self) -> Option<&RouteSummary> {
        self.planner.active()
    }

    /// Whether the initial dataset load is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current base map style.
    pub fn map_kind(&self) -> MapKind {
        self.map_kind
    }

    /// Number of rendered centre markers.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    // Full teardown-and-rebuild of the marker collection against the current
    // visible set, then a camera fit and a highlight pass for the selection.
    fn rebuild_markers(&mut self) {
        let visible = filter::visible(
            self.dataset.centres(),
            &self.query,
            self.area_filter.as_deref(),
        );
        self.markers.rebuild(
            &visible,
            self.providers.markers.as_mut(),
            self.providers.camera.as_mut(),
        );
        self.markers.highlight(self.selected);
    }
}
