//! Itinerary types.
//!
//! An `Itinerary` is the externally returned shape of a planned route:
//! the cities visited, each with the time the route is there.

use chrono::Duration;

use super::{City, Leg, Timestamp};

/// A city on the route and the time the route is there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stop {
    /// The city
    pub city: City,
    /// Departure time, or arrival time for the final stop
    pub timestamp: Timestamp,
}

impl Stop {
    /// Creates a new stop.
    pub fn new(city: City, timestamp: Timestamp) -> Self {
        Self { city, timestamp }
    }
}

/// An ordered sequence of stops from origin to destination.
///
/// Either empty (no route) or at least two stops: one per leg origin, plus
/// the final leg's destination. Stop times come from each leg's own
/// timestamps, so the gap between arriving somewhere and the next
/// departure is not represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Itinerary {
    stops: Vec<Stop>,
}

impl Itinerary {
    /// An itinerary with no stops.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Converts a leg sequence into stops.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_server::domain::{City, Itinerary, Leg, Timestamp};
    ///
    /// let city = |s| City::parse(s).unwrap();
    /// let ts = Timestamp::from_millis;
    ///
    /// let legs = [
    ///     Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(200)).unwrap(),
    ///     Leg::new(city("Singapore"), ts(250), city("Sydney"), ts(400)).unwrap(),
    /// ];
    ///
    /// let itinerary = Itinerary::from_legs(&legs);
    /// let cities: Vec<_> = itinerary.stops().iter().map(|s| s.city.as_str()).collect();
    /// assert_eq!(cities, ["Mumbai", "Singapore", "Sydney"]);
    ///
    /// assert!(Itinerary::from_legs(&[]).is_empty());
    /// ```
    pub fn from_legs<'a, I>(legs: I) -> Self
    where
        I: IntoIterator<Item = &'a Leg>,
    {
        let mut stops = Vec::new();
        let mut last = None;

        for leg in legs {
            stops.push(Stop::new(leg.origin().clone(), leg.departure()));
            last = Some(leg);
        }

        if let Some(leg) = last {
            stops.push(Stop::new(leg.destination().clone(), leg.arrival()));
        }

        Self { stops }
    }

    /// Returns the stops in travel order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Consumes the itinerary, returning its stops.
    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if no route was found.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns the first stop, if any.
    pub fn departure(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// Returns the final stop, if any.
    pub fn arrival(&self) -> Option<&Stop> {
        self.stops.last()
    }

    /// Elapsed time from first departure to final arrival.
    pub fn total_duration(&self) -> Option<Duration> {
        let dep = self.departure()?;
        let arr = self.arrival()?;
        dep.timestamp.duration_until(arr.timestamp)
    }
}
