//! Data transfer objects for web requests and responses.
//!
//! The wire format is the one existing clients already send:
//!
//! ```json
//! {
//!   "schedules": [
//!     {
//!       "departure": { "city": "Mumbai", "timestamp": 1564561265346 },
//!       "arrival": { "city": "Singapore", "timestamp": 1564583044545 }
//!     }
//!   ],
//!   "trip_plan": { "start_city": "Mumbai", "end_city": "Singapore" },
//!   "prefered_time": 1564561200000
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{City, DomainError, InvalidCity, Itinerary, Leg, Stop, Timestamp};
use crate::planner::PlanQuery;

/// Request to plan a trip.
///
/// Top-level fields are required; a request missing any of them is
/// rejected by deserialization. Fields inside each schedule are optional
/// here so a bad schedule can be reported by position.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Available flights
    pub schedules: Vec<ScheduleDto>,

    /// Where the trip starts and ends
    pub trip_plan: TripPlanDto,

    /// Only flights departing after this time (epoch ms) are used
    #[serde(alias = "preferred_time")]
    pub prefered_time: i64,
}

/// One flight as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleDto {
    pub departure: Option<EndpointDto>,
    pub arrival: Option<EndpointDto>,
}

/// One end of a flight.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointDto {
    pub city: Option<String>,
    pub timestamp: Option<i64>,
}

/// Start and end of the trip.
#[derive(Debug, Deserialize)]
pub struct TripPlanDto {
    pub start_city: String,
    pub end_city: String,
}

/// A stop in the returned flight plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopResult {
    /// City name
    pub city: String,

    /// Epoch milliseconds
    pub timestamp: i64,
}

/// Response for trip planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Stops in travel order; empty when no route exists
    pub flight_plan: Vec<StopResult>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub message: String,
}

/// A request that parsed as JSON but doesn't describe a valid query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// One of the schedules is malformed
    #[error("schedule {index}: {source}")]
    Schedule {
        index: usize,
        #[source]
        source: DomainError,
    },

    /// The start or end city is invalid
    #[error("trip plan: {0}")]
    TripPlan(#[from] InvalidCity),
}

// Conversion implementations

impl ScheduleDto {
    /// Validate into a domain Leg.
    pub fn to_leg(&self) -> Result<Leg, DomainError> {
        let departure = self
            .departure
            .as_ref()
            .ok_or(DomainError::MalformedLeg("missing departure"))?;
        let arrival = self
            .arrival
            .as_ref()
            .ok_or(DomainError::MalformedLeg("missing arrival"))?;

        let (origin, dep_time) =
            departure.to_parts("missing departure city", "missing departure timestamp")?;
        let (destination, arr_time) =
            arrival.to_parts("missing arrival city", "missing arrival timestamp")?;

        Leg::new(origin, dep_time, destination, arr_time)
    }
}

impl EndpointDto {
    fn to_parts(
        &self,
        missing_city: &'static str,
        missing_timestamp: &'static str,
    ) -> Result<(City, Timestamp), DomainError> {
        let city = self
            .city
            .as_deref()
            .ok_or(DomainError::MalformedLeg(missing_city))?;
        let timestamp = self
            .timestamp
            .ok_or(DomainError::MalformedLeg(missing_timestamp))?;

        Ok((City::parse(city)?, Timestamp::from_millis(timestamp)))
    }
}

impl PlanRequest {
    /// Validate into a planner query.
    ///
    /// Fails on the first malformed schedule, even one the preferred-time
    /// filter would have dropped.
    pub fn into_query(self) -> Result<PlanQuery, RequestError> {
        let legs = self
            .schedules
            .iter()
            .enumerate()
            .map(|(index, schedule)| {
                schedule
                    .to_leg()
                    .map_err(|source| RequestError::Schedule { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let start = City::parse(&self.trip_plan.start_city)?;
        let end = City::parse(&self.trip_plan.end_city)?;

        Ok(PlanQuery::new(
            legs,
            start,
            end,
            Timestamp::from_millis(self.prefered_time),
        ))
    }
}

impl StopResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            city: stop.city.as_str().to_string(),
            timestamp: stop.timestamp.as_millis(),
        }
    }
}

impl PlanResponse {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            flight_plan: itinerary.stops().iter().map(StopResult::from_stop).collect(),
        }
    }
}
