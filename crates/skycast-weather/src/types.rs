use serde::{Deserialize, Serialize};
use std::fmt;

/// A point reported by the device's positioning capability.
///
/// Used once for the reverse postcode lookup and then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Forecast query key: a validated UK postcode or a place name echoed back by
/// the weather service (e.g. "London, United Kingdom").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationIdentifier(String);

impl LocationIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_displays_raw_value() {
        let id = LocationIdentifier::from("EC2V 8AF");
        assert_eq!(id.to_string(), "EC2V 8AF");
        assert_eq!(id.as_str(), "EC2V 8AF");
    }

    #[test]
    fn test_identifier_serializes_as_string() {
        let id = LocationIdentifier::new("London, UK");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""London, UK""#);
    }
}
