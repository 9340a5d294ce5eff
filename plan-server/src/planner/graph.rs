//! Flight graph construction.
//!
//! Turns a leg list into the two structures the solver reads: an adjacency
//! map from each city to its outgoing edges, and a duration table holding
//! the shortest observed flight time for each (origin, destination) pair.
//!
//! Only legs departing strictly after the preferred time are ingested.
//! There is one edge per (origin, destination) pair. Every ingested leg on
//! the pair is kept as a candidate, and the shortest one is picked when the
//! edge is read, so its weight always agrees with the duration table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::Duration;
use tracing::{debug, trace};

use crate::domain::{City, Leg, Timestamp};

/// Shortest observed flight time per (origin, destination) pair.
#[derive(Debug, Clone, Default)]
pub struct DurationTable<'a> {
    entries: HashMap<&'a City, HashMap<&'a City, Duration>>,
    len: usize,
}

impl<'a> DurationTable<'a> {
    /// Record a leg's duration, keeping the minimum per pair.
    ///
    /// Returns true if the leg set a new minimum (or was the first on its pair).
    fn record(&mut self, leg: &'a Leg) -> bool {
        let duration = leg.duration();
        let row = self.entries.entry(leg.origin()).or_default();

        match row.entry(leg.destination()) {
            Entry::Occupied(mut slot) => {
                if duration < *slot.get() {
                    slot.insert(duration);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(duration);
                self.len += 1;
                true
            }
        }
    }

    /// Shortest flight time from `origin` to `destination`, if any leg flies it.
    pub fn get(&self, origin: &City, destination: &City) -> Option<Duration> {
        self.entries.get(origin)?.get(destination).copied()
    }

    /// Number of (origin, destination) pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no legs were ingested.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over all `(origin, destination, duration)` entries, in no
    /// particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a City, &'a City, Duration)> + '_ {
        self.entries.iter().flat_map(|(origin, row)| {
            row.iter()
                .map(move |(destination, duration)| (*origin, *destination, *duration))
        })
    }
}

/// The flights from one city to another.
#[derive(Debug, Clone)]
pub struct Edge<'a> {
    first: &'a Leg,
    others: Vec<&'a Leg>,
}

impl<'a> Edge<'a> {
    fn new(leg: &'a Leg) -> Self {
        Self {
            first: leg,
            others: Vec::new(),
        }
    }

    /// Returns the city this edge flies to.
    pub fn destination(&self) -> &'a City {
        self.first.destination()
    }

    /// The shortest flight on this edge. The earliest ingested leg wins ties.
    pub fn best_leg(&self) -> &'a Leg {
        self.others.iter().copied().fold(self.first, |best, leg| {
            if leg.duration() < best.duration() {
                leg
            } else {
                best
            }
        })
    }

    /// Every ingested leg on this edge, in ingestion order.
    pub fn candidates(&self) -> impl Iterator<Item = &'a Leg> + '_ {
        std::iter::once(self.first).chain(self.others.iter().copied())
    }
}

/// Directed graph of cities connected by flights.
///
/// Borrows the legs it was built from; nothing is copied.
#[derive(Debug, Clone, Default)]
pub struct FlightGraph<'a> {
    /// Outgoing edges per city, in the order each pair was first ingested.
    adjacency: HashMap<&'a City, Vec<Edge<'a>>>,

    durations: DurationTable<'a>,

    /// Legs departing after the preferred time.
    included: usize,

    /// Legs dropped for departing at or before the preferred time.
    dropped: usize,
}

impl<'a> FlightGraph<'a> {
    /// Build a graph from the legs departing strictly after `preferred_time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_server::domain::{City, Leg, Timestamp};
    /// use plan_server::planner::FlightGraph;
    ///
    /// let city = |s| City::parse(s).unwrap();
    /// let ts = Timestamp::from_millis;
    ///
    /// let legs = vec![
    ///     Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(200)).unwrap(),
    ///     Leg::new(city("Mumbai"), ts(300), city("Singapore"), ts(380)).unwrap(),
    /// ];
    ///
    /// let graph = FlightGraph::build(&legs, ts(50));
    /// let duration = graph.duration(&city("Mumbai"), &city("Singapore")).unwrap();
    /// assert_eq!(duration.num_milliseconds(), 80);
    ///
    /// // Only the shortest flight on the pair is offered.
    /// let departures: Vec<_> = graph.departures_from(&city("Mumbai")).collect();
    /// assert_eq!(departures, [&legs[1]]);
    /// ```
    pub fn build(legs: &'a [Leg], preferred_time: Timestamp) -> Self {
        let mut graph = FlightGraph::default();
        // Position of each pair's edge within its origin's adjacency list.
        let mut slots: HashMap<(&'a City, &'a City), usize> = HashMap::new();

        for leg in legs {
            if !leg.departs_after(preferred_time) {
                trace!(
                    origin = %leg.origin(),
                    departure = %leg.departure(),
                    "dropping leg departing before preferred time"
                );
                graph.dropped += 1;
                continue;
            }
            graph.included += 1;

            let improved = graph.durations.record(leg);
            let edges = graph.adjacency.entry(leg.origin()).or_default();

            match slots.entry((leg.origin(), leg.destination())) {
                Entry::Occupied(slot) => {
                    edges[*slot.get()].others.push(leg);
                }
                Entry::Vacant(slot) => {
                    slot.insert(edges.len());
                    edges.push(Edge::new(leg));
                }
            }

            if improved {
                trace!(
                    origin = %leg.origin(),
                    destination = %leg.destination(),
                    duration_ms = leg.duration().num_milliseconds(),
                    "new shortest flight for pair"
                );
            }
        }

        debug!(
            included = graph.included,
            dropped = graph.dropped,
            pairs = graph.durations.len(),
            "flight graph built"
        );

        graph
    }

    /// Outgoing edges from `origin`, in first-ingested order.
    ///
    /// Empty if no ingested leg departs from `origin`.
    pub fn edges_from(&self, origin: &City) -> &[Edge<'a>] {
        self.adjacency
            .get(origin)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The shortest flight to each destination reachable from `origin`.
    pub fn departures_from(&self, origin: &City) -> impl Iterator<Item = &'a Leg> + '_ {
        self.edges_from(origin).iter().map(Edge::best_leg)
    }

    /// The duration table.
    pub fn durations(&self) -> &DurationTable<'a> {
        &self.durations
    }

    /// Shortest flight time from `origin` to `destination`.
    pub fn duration(&self, origin: &City, destination: &City) -> Option<Duration> {
        self.durations.get(origin, destination)
    }

    /// Number of legs ingested.
    pub fn included_legs(&self) -> usize {
        self.included
    }

    /// Number of legs dropped by the preferred-time filter.
    pub fn dropped_legs(&self) -> usize {
        self.dropped
    }
}
