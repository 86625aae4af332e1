//! Directions lookups and the single active route.
//!
//! The host performs the actual route computation; the core owns the
//! orchestration: a strict driving→walking fallback chain (never more than
//! two provider attempts per request), a terminal external-app escape hatch,
//! and a generation counter that discards completions belonging to a
//! superseded request.

use tracing::debug;

use crate::config::MapConfig;
use crate::types::{Coordinate, RouteLeg, RouteSummary, TravelMode};

/// Identifies one provider route attempt.
///
/// The generation increases with every new route request (and on
/// [`clear`](crate::MapController::clear_route)); a completion whose
/// generation no longer matches the latest request is stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTicket {
    pub(crate) generation: u64,
    /// Travel mode of this attempt.
    pub mode: TravelMode,
}

/// One route lookup handed to the directions provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    /// Ticket to echo back through
    /// [`MapController::finish_route`](crate::MapController::finish_route).
    pub ticket: RouteTicket,
    /// The user's position.
    pub origin: Coordinate,
    /// The target centre's coordinate.
    pub destination: Coordinate,
}

/// Result of one provider route attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The provider found a route; the leg carries its formatted summary.
    Success(RouteLeg),
    /// The provider reported a non-success status.
    Failed(String),
}

/// Asynchronous directions lookup on the host side.
///
/// The host computes (and keeps) the route for the given request and reports
/// back by calling
/// [`MapController::finish_route`](crate::MapController::finish_route) with
/// the echoed ticket.
pub trait DirectionsService {
    /// Starts a route lookup.
    fn request(&mut self, request: RouteRequest);
}

/// The single rendered route path.
///
/// Path geometry stays on the host (the provider's own renderer draws it);
/// the core only says which attempt's result to show and when to clear it.
pub trait RouteOverlay {
    /// Displays the route the host computed for this ticket.
    fn render(&mut self, ticket: RouteTicket);
    /// Removes the rendered route, if any.
    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    origin: Coordinate,
    destination: Coordinate,
}

/// Generation-guarded state machine behind the routing flow.
#[derive(Debug, Default)]
pub(crate) struct RoutePlanner {
    generation: u64,
    pending: Option<Pending>,
    active: Option<RouteSummary>,
}

impl RoutePlanner {
    /// Supersedes any outstanding request and returns the driving attempt.
    pub(crate) fn begin(&mut self, origin: Coordinate, destination: Coordinate) -> RouteRequest {
        self.generation += 1;
        self.pending = Some(Pending {
            origin,
            destination,
        });
        RouteRequest {
            ticket: RouteTicket {
                generation: self.generation,
                mode: TravelMode::Driving,
            },
            origin,
            destination,
        }
    }

    /// Whether a completion for this ticket still applies.
    pub(crate) fn is_current(&self, ticket: RouteTicket) -> bool {
        ticket.generation == self.generation && self.pending.is_some()
    }

    /// Records a successful attempt as the active route.
    pub(crate) fn complete(&mut self, mode: TravelMode, leg: RouteLeg) {
        self.active = Some(RouteSummary {
            distance: leg.distance,
            duration: leg.duration,
            mode,
        });
    }

    /// Produces the walking retry for a failed driving attempt, or `None`
    /// when the chain is exhausted.
    pub(crate) fn fall_back(&mut self, ticket: RouteTicket) -> Option<RouteRequest> {
        if ticket.mode != TravelMode::Driving {
            return None;
        }
        let pending = self.pending?;
        Some(RouteRequest {
            ticket: RouteTicket {
                generation: ticket.generation,
                mode: TravelMode::Walking,
            },
            origin: pending.origin,
            destination: pending.destination,
        })
    }

    /// Deep link to an external navigation app for the pending destination.
    pub(crate) fn external_link(&self, config: &MapConfig) -> Option<String> {
        self.pending.map(|pending| {
            external_link(&config.external_nav_base, pending.destination)
        })
    }

    /// Drops the active route and invalidates any in-flight completion.
    pub(crate) fn clear(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.active = None;
        debug!("route state cleared");
    }

    pub(crate) fn active(&self) -> Option<&RouteSummary> {
        self.active.as_ref()
    }
}

/// Builds the external navigation deep link for a destination.
pub(crate) fn external_link(base: &str, destination: Coordinate) -> String {
    format!("{base}&destination={},{}", destination.lat, destination.lng)
}
