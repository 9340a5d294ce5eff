//! City identifier type.

use std::fmt;
use std::sync::Arc;

/// Error returned when parsing an invalid city name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid city: {reason}")]
pub struct InvalidCity {
    reason: &'static str,
}

/// A city name, used as a location identifier.
///
/// Names are compared exactly as given: no case folding and no trimming.
/// A `City` is never empty or whitespace-only. The name is reference
/// counted so legs can be cloned cheaply.
///
/// # Examples
///
/// ```
/// use plan_server::domain::City;
///
/// let mumbai = City::parse("Mumbai").unwrap();
/// assert_eq!(mumbai.as_str(), "Mumbai");
///
/// // Case matters
/// assert_ne!(mumbai, City::parse("mumbai").unwrap());
///
/// // Blank names are rejected
/// assert!(City::parse("").is_err());
/// assert!(City::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct City(Arc<str>);

impl City {
    /// Parse a city name.
    pub fn parse(s: &str) -> Result<Self, InvalidCity> {
        if s.is_empty() {
            return Err(InvalidCity {
                reason: "name must not be empty",
            });
        }

        if s.chars().all(char::is_whitespace) {
            return Err(InvalidCity {
                reason: "name must not be blank",
            });
        }

        Ok(City(Arc::from(s)))
    }

    /// Returns the city name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City({})", self.as_str())
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
