//! Map-state reconciliation and geospatial interaction core for an
//! interactive centre map.
//!
//! `centremap` keeps an external map widget's rendered markers, camera, and
//! route overlay consistent with an in-memory, filtered list of geocoded
//! centre records. It owns the business logic of a map front-end — geocode
//! extraction, distance and nearest-neighbor search, text/area filtering,
//! marker reconciliation, routing with a driving→walking→external-app
//! fallback chain, selection and locate coordination, and a session guard —
//! while everything host-specific (rendering, directions computation, device
//! location, prompts, identity) stays behind provider traits.
//!
//! # Features
//!
//! - **Geocode extraction** - Resolves coordinates from decimal `"lat,lng"`
//!   fields or map-provider URLs; unresolvable records are dropped everywhere
//! - **Filtering** - Case-insensitive text search plus an exact area filter,
//!   recomputed in O(n) on every keystroke
//! - **Marker reconciliation** - Full teardown-and-rebuild of the marker
//!   collection on every visible-set change, camera bounds-fit included
//! - **Routing** - Driving first, walking on failure, external deep link as
//!   the terminal escape hatch; stale completions are discarded by a
//!   generation counter
//! - **Nearest centre** - Haversine distance (R = 6371 km) over the whole
//!   dataset
//! - **Session guard** - Public-page allowlist, inactivity deadline,
//!   fail-open sign-out
//!
//! # Quick Start
//!
//! The host implements the provider traits in [`providers`], [`marker`], and
//! [`routing`], bundles them into a [`Providers`] context once at startup,
//! and drives the controller from its event loop:
//!
//! ```no_run
//! # fn demo(providers: centremap::Providers,
//! #         backend: &mut dyn centremap::DatasetProvider) {
//! use centremap::{MapConfig, MapController};
//!
//! let mut map = MapController::new(MapConfig::default(), providers);
//!
//! // Map is ready: pull the dataset, then silently try to locate the user.
//! map.load_from(backend);
//! map.locate(false);
//!
//! // User input flows in as plain method calls.
//! map.set_query("school");
//! map.set_area_filter(Some("North"));
//! if let Some(first) = map.visible().first().map(|centre| centre.id) {
//!     map.select(first);
//! }
//! # }
//! ```
//!
//! Long-latency operations are request/complete pairs: the controller issues
//! a request through a provider trait, and the host later reports the result
//! back (for example [`MapController::finish_locate`] for geolocation, or
//! [`MapController::finish_route`] with the echoed [`RouteTicket`] for a
//! directions lookup). Completions arrive in whatever order the providers
//! produce them; a route completion whose ticket generation has been
//! superseded is discarded rather than applied.
//!
//! # Concurrency
//!
//! The core is single-threaded and event-driven: all state lives in
//! [`MapController`] and is only touched from the host's event loop, one
//! callback at a time. Provider traits carry no `Send`/`Sync` bounds.
//!
//! # Modules
//!
//! - [`types`] - Core data structures ([`Coordinate`], [`Centre`], [`Bounds`])
//! - [`geocode`] - Coordinate extraction from raw location fields
//! - [`dataset`] - Geocoded dataset, area index, nearest-neighbor search
//! - [`filter`] - The visible-set computation
//! - [`marker`] - Marker traits and the reconciler
//! - [`routing`] - Directions traits and the fallback state machine
//! - [`controller`] - The state-owning [`MapController`]
//! - [`providers`] - Host seams and the [`Providers`] context
//! - [`guard`] - Session guard with inactivity sign-out
//! - [`config`] - Typed camera/navigation settings

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod dataset;
mod error;
pub mod filter;
pub mod geocode;
pub mod guard;
pub mod marker;
pub mod providers;
pub mod routing;
pub mod types;

pub use config::MapConfig;
pub use controller::MapController;
pub use dataset::{Dataset, DatasetProvider};
pub use error::Error;
pub use guard::{GuardAction, SessionGuard, SessionProvider};
pub use providers::{GeolocationError, Providers};
pub use routing::{RouteOutcome, RouteRequest, RouteTicket};
pub use types::{
    Bounds, Centre, CentreId, Coordinate, LocationStatus, MapKind, RawCentre, RouteLeg,
    RouteSummary, TravelMode,
};
