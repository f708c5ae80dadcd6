//! Weather pipeline for Skycast
//!
//! Resolves a UK postcode (typed, or derived from the device position via
//! postcodes.io), fetches current conditions and a 5-day forecast from
//! weatherapi.com, and projects the response into display fields.

pub mod dashboard;
pub mod geocode;
pub mod location;
pub mod postcode;
pub mod provider;
pub mod types;
pub mod view;

pub use dashboard::{Dashboard, DashboardState, FetchTicket, Notice, DEFAULT_LOCATION};
pub use geocode::PostcodeLookup;
pub use location::{
    resolve_from_input, FixedPosition, LocationResolver, NoPositioning, PositionSource,
};
pub use postcode::is_valid_uk_postcode;
pub use provider::{ForecastResponse, WeatherProvider, FORECAST_DAYS};
pub use types::*;
pub use view::{BackgroundMode, CurrentConditions, ForecastDay, ViewModel};
