//! Flight leg type.
//!
//! A `Leg` is one scheduled point-to-point flight: a departure city and
//! time, and an arrival city and time.

use chrono::Duration;

use super::{City, DomainError, Timestamp};

/// One scheduled flight between two cities.
///
/// Timestamps are validated at construction, so `duration()` is always
/// strictly positive and never overflows.
///
/// # Invariants
///
/// - `arrival > departure`
/// - `arrival - departure` fits in an `i64` of milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leg {
    origin: City,
    departure: Timestamp,
    destination: City,
    arrival: Timestamp,
}

impl Leg {
    /// Construct a leg, validating its timestamps.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedLeg` if the arrival is not strictly
    /// after the departure, or the gap between them overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_server::domain::{City, Leg, Timestamp};
    ///
    /// let mumbai = City::parse("Mumbai").unwrap();
    /// let singapore = City::parse("Singapore").unwrap();
    ///
    /// let leg = Leg::new(
    ///     mumbai.clone(),
    ///     Timestamp::from_millis(100),
    ///     singapore.clone(),
    ///     Timestamp::from_millis(200),
    /// )
    /// .unwrap();
    /// assert_eq!(leg.duration().num_milliseconds(), 100);
    ///
    /// // Arriving before departing is rejected
    /// assert!(Leg::new(
    ///     mumbai,
    ///     Timestamp::from_millis(200),
    ///     singapore,
    ///     Timestamp::from_millis(100),
    /// )
    /// .is_err());
    /// ```
    pub fn new(
        origin: City,
        departure: Timestamp,
        destination: City,
        arrival: Timestamp,
    ) -> Result<Self, DomainError> {
        if arrival <= departure {
            return Err(DomainError::MalformedLeg(
                "arrival must be after departure",
            ));
        }

        if departure.duration_until(arrival).is_none() {
            return Err(DomainError::MalformedLeg("timestamps out of range"));
        }

        Ok(Leg {
            origin,
            departure,
            destination,
            arrival,
        })
    }

    /// Returns the departure city.
    pub fn origin(&self) -> &City {
        &self.origin
    }

    /// Returns the departure time.
    pub fn departure(&self) -> Timestamp {
        self.departure
    }

    /// Returns the arrival city.
    pub fn destination(&self) -> &City {
        &self.destination
    }

    /// Returns the arrival time.
    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    /// Returns the flight duration.
    pub fn duration(&self) -> Duration {
        // Checked at construction
        Duration::milliseconds(self.arrival.as_millis() - self.departure.as_millis())
    }

    /// Returns true if this leg departs strictly after `time`.
    pub fn departs_after(&self, time: Timestamp) -> bool {
        self.departure > time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(s: &str) -> City {
        City::parse(s).unwrap()
    }

    fn ts(ms: i64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn valid_leg() {
        let leg = Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(200)).unwrap();

        assert_eq!(leg.origin(), &city("Mumbai"));
        assert_eq!(leg.destination(), &city("Singapore"));
        assert_eq!(leg.departure(), ts(100));
        assert_eq!(leg.arrival(), ts(200));
        assert_eq!(leg.duration(), Duration::milliseconds(100));
    }

    #[test]
    fn zero_duration_rejected() {
        let err = Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(100)).unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedLeg("arrival must be after departure")
        );
    }

    #[test]
    fn negative_duration_rejected() {
        assert!(Leg::new(city("Mumbai"), ts(300), city("Singapore"), ts(200)).is_err());
    }

    #[test]
    fn overflowing_duration_rejected() {
        let err =
            Leg::new(city("Mumbai"), ts(i64::MIN), city("Singapore"), ts(i64::MAX)).unwrap_err();
        assert_eq!(err, DomainError::MalformedLeg("timestamps out of range"));
    }

    #[test]
    fn same_city_allowed() {
        // A round trip is odd but well-formed.
        let leg = Leg::new(city("Mumbai"), ts(100), city("Mumbai"), ts(150)).unwrap();
        assert_eq!(leg.duration(), Duration::milliseconds(50));
    }

    #[test]
    fn departs_after_is_strict() {
        let leg = Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(200)).unwrap();
        assert!(leg.departs_after(ts(99)));
        assert!(!leg.departs_after(ts(100)));
        assert!(!leg.departs_after(ts(150)));
    }

    #[test]
    fn equality_is_by_value() {
        let a = Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(200)).unwrap();
        let b = Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(200)).unwrap();
        let c = Leg::new(city("Mumbai"), ts(100), city("Singapore"), ts(201)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
