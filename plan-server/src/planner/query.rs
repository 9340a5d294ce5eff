//! One-call planning: build the graph, search it, convert the route.

use tracing::debug;

use super::graph::FlightGraph;
use super::solver::solve;
use crate::domain::{City, Itinerary, Leg, Timestamp};

/// A validated planning request.
///
/// Equal content means equal value and equal hash, so a query can be used
/// directly as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanQuery {
    /// The schedule snapshot to plan over.
    pub legs: Vec<Leg>,

    /// Where the trip starts.
    pub start: City,

    /// Where the trip ends.
    pub end: City,

    /// Only legs departing strictly after this time are considered.
    pub preferred_time: Timestamp,
}

impl PlanQuery {
    /// Create a new query.
    pub fn new(legs: Vec<Leg>, start: City, end: City, preferred_time: Timestamp) -> Self {
        Self {
            legs,
            start,
            end,
            preferred_time,
        }
    }
}

/// Plan the shortest-duration itinerary for a query.
///
/// Returns an empty itinerary when there is no route, when the start or
/// end city never appears in a usable leg, and when start and end are the
/// same city.
///
/// # Examples
///
/// ```
/// use plan_server::domain::{City, Leg, Timestamp};
/// use plan_server::planner::{PlanQuery, plan};
///
/// let city = |s| City::parse(s).unwrap();
/// let ts = Timestamp::from_millis;
///
/// let query = PlanQuery::new(
///     vec![
///         Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(200)).unwrap(),
///         Leg::new(city("Singapore"), ts(250), city("Sydney"), ts(400)).unwrap(),
///     ],
///     city("Mumbai"),
///     city("Sydney"),
///     ts(50),
/// );
///
/// let stops: Vec<_> = plan(&query)
///     .into_stops()
///     .into_iter()
///     .map(|s| (s.city.to_string(), s.timestamp.as_millis()))
///     .collect();
///
/// assert_eq!(
///     stops,
///     [
///         ("Mumbai".to_string(), 100),
///         ("Singapore".to_string(), 250),
///         ("Sydney".to_string(), 400),
///     ]
/// );
/// ```
pub fn plan(query: &PlanQuery) -> Itinerary {
    let graph = FlightGraph::build(&query.legs, query.preferred_time);
    let legs = solve(&graph, &query.start, &query.end);
    let itinerary = Itinerary::from_legs(legs);

    debug!(
        start = %query.start,
        end = %query.end,
        preferred_time = %query.preferred_time,
        legs_in = query.legs.len(),
        legs_usable = graph.included_legs(),
        stops = itinerary.len(),
        "planned itinerary"
    );

    itinerary
}
