//! Shortest-duration route search.
//!
//! Dijkstra's algorithm over a [`FlightGraph`], minimising the sum of
//! flight durations from a start city to an end city. Time spent waiting
//! between flights is not counted and connections are not checked for
//! feasibility.
//!
//! Cumulative durations are carried as `i128` milliseconds, so no sum of
//! valid legs can overflow.
//!
//! The frontier is a binary heap ordered by `(cumulative duration, entry
//! index)`, where the entry index is the order in which a city was first
//! reached. Among equally short candidates, the city reached first is
//! expanded first, which keeps results deterministic.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use super::graph::FlightGraph;
use crate::domain::{City, Leg};

/// Best known way to reach one city.
#[derive(Debug, Clone)]
struct Reached<'a> {
    city: &'a City,
    /// Entry index of the city this one was reached from.
    predecessor: Option<usize>,
    /// Total flight time from the start, in milliseconds.
    cost: i128,
    /// The leg flown from the predecessor.
    leg: Option<&'a Leg>,
    visited: bool,
}

/// Per-search state: every city reached so far, in first-reached order.
#[derive(Debug)]
struct SearchState<'a> {
    entries: Vec<Reached<'a>>,
    index: HashMap<&'a City, usize>,
}

impl<'a> SearchState<'a> {
    fn new(start: &'a City) -> Self {
        let mut index = HashMap::new();
        index.insert(start, 0);

        Self {
            entries: vec![Reached {
                city: start,
                predecessor: None,
                cost: 0,
                leg: None,
                visited: false,
            }],
            index,
        }
    }

    /// Offer a route to `city` via `leg`.
    ///
    /// Returns the city's entry index if the offer was an improvement.
    fn relax(
        &mut self,
        city: &'a City,
        from: usize,
        cost: i128,
        leg: &'a Leg,
    ) -> Option<usize> {
        match self.index.get(city) {
            Some(&idx) => {
                let entry = &mut self.entries[idx];
                if cost < entry.cost {
                    entry.predecessor = Some(from);
                    entry.cost = cost;
                    entry.leg = Some(leg);
                    Some(idx)
                } else {
                    None
                }
            }
            None => {
                let idx = self.entries.len();
                self.entries.push(Reached {
                    city,
                    predecessor: Some(from),
                    cost,
                    leg: Some(leg),
                    visited: false,
                });
                self.index.insert(city, idx);
                Some(idx)
            }
        }
    }

    /// Walk predecessors back from `idx` to the start, returning legs in
    /// travel order.
    fn reconstruct(&self, mut idx: usize) -> Vec<&'a Leg> {
        let mut legs = Vec::new();

        while let Some(leg) = self.entries[idx].leg {
            legs.push(leg);
            match self.entries[idx].predecessor {
                Some(prev) => idx = prev,
                None => break,
            }
        }

        legs.reverse();
        legs
    }
}

/// Find the legs of the shortest-duration route from `start` to `end`.
///
/// Returns an empty sequence when no route exists, when either city is
/// unknown to the graph, or when `start == end`.
///
/// # Examples
///
/// ```
/// use plan_server::domain::{City, Leg, Timestamp};
/// use plan_server::planner::{FlightGraph, solve};
///
/// let city = |s| City::parse(s).unwrap();
/// let ts = Timestamp::from_millis;
///
/// let legs = vec![
///     Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(200)).unwrap(),
///     Leg::new(city("Singapore"), ts(250), city("Sydney"), ts(400)).unwrap(),
///     Leg::new(city("Mumbai"), ts(100), city("Sydney"), ts(500)).unwrap(),
/// ];
/// let graph = FlightGraph::build(&legs, ts(50));
/// let start = city("Mumbai");
///
/// let route = solve(&graph, &start, &city("Sydney"));
/// assert_eq!(route, [&legs[0], &legs[1]]);
///
/// assert!(solve(&graph, &start, &city("Tokyo")).is_empty());
/// ```
pub fn solve<'a>(graph: &FlightGraph<'a>, start: &'a City, end: &City) -> Vec<&'a Leg> {
    let mut state = SearchState::new(start);
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((0i128, 0usize)));

    let mut expanded = 0usize;

    while let Some(Reverse((cost, idx))) = frontier.pop() {
        let entry = &state.entries[idx];
        // Stale heap entry: either already settled or since improved.
        if entry.visited || cost != entry.cost {
            continue;
        }

        let city = entry.city;
        if city == end {
            let legs = state.reconstruct(idx);
            debug!(
                start = %start,
                end = %end,
                legs = legs.len(),
                duration_ms = %cost,
                expanded,
                "route found"
            );
            return legs;
        }

        state.entries[idx].visited = true;
        expanded += 1;

        for edge in graph.edges_from(city) {
            let destination = edge.destination();
            let Some(weight) = graph.duration(city, destination) else {
                continue;
            };
            let candidate = cost + i128::from(weight.num_milliseconds());

            if let Some(next) = state.relax(destination, idx, candidate, edge.best_leg()) {
                frontier.push(Reverse((candidate, next)));
            }
        }
    }

    debug!(start = %start, end = %end, expanded, "no route");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    fn city(s: &str) -> City {
        City::parse(s).unwrap()
    }

    fn leg(from: &str, dep: i64, to: &str, arr: i64) -> Leg {
        Leg::new(
            city(from),
            Timestamp::from_millis(dep),
            city(to),
            Timestamp::from_millis(arr),
        )
        .unwrap()
    }

    #[test]
    fn reconstruct_start_only() {
        let start = city("Mumbai");
        let state = SearchState::new(&start);
        assert!(state.reconstruct(0).is_empty());
    }

    #[test]
    fn relax_only_accepts_strict_improvement() {
        let start = city("Mumbai");
        let singapore = city("Singapore");
        let slow = leg("Mumbai", 100, "Singapore", 300);
        let fast = leg("Mumbai", 100, "Singapore", 200);

        let mut state = SearchState::new(&start);
        assert_eq!(state.relax(&singapore, 0, 200, &slow), Some(1));
        assert_eq!(state.relax(&singapore, 0, 200, &fast), None);
        assert_eq!(state.relax(&singapore, 0, 100, &fast), Some(1));
        assert_eq!(state.entries.len(), 2);
        assert_eq!(state.entries[1].leg, Some(&fast));
    }

    #[test]
    fn reconstruct_follows_predecessors() {
        let start = city("Mumbai");
        let singapore = city("Singapore");
        let sydney = city("Sydney");
        let first = leg("Mumbai", 100, "Singapore", 200);
        let second = leg("Singapore", 250, "Sydney", 400);

        let mut state = SearchState::new(&start);
        state.relax(&singapore, 0, 100, &first);
        state.relax(&sydney, 1, 250, &second);

        assert_eq!(state.reconstruct(2), vec![&first, &second]);
    }
}
