//! Turning device position or typed input into a `LocationIdentifier`.

use async_trait::async_trait;
use skycast_core::{LocationError, PositionConfig};

use crate::geocode::PostcodeLookup;
use crate::postcode::is_valid_uk_postcode;
use crate::types::{Coordinates, LocationIdentifier};

/// One-shot device positioning.
///
/// Implementations may wait indefinitely (e.g. on a permission prompt).
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// A position fixed ahead of time, from configuration or the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl From<PositionConfig> for FixedPosition {
    fn from(config: PositionConfig) -> Self {
        Self(Coordinates::new(config.latitude, config.longitude))
    }
}

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Platform without any positioning capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPositioning;

#[async_trait]
impl PositionSource for NoPositioning {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PositioningUnavailable)
    }
}

/// Validate a typed postcode.
///
/// Empty input means the user cancelled the edit and yields `Ok(None)`.
/// Anything else must be a UK postcode once surrounding whitespace is removed.
pub fn resolve_from_input(raw: &str) -> Result<Option<LocationIdentifier>, LocationError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let trimmed = raw.trim();
    if !is_valid_uk_postcode(trimmed) {
        tracing::debug!("Rejected postcode input {:?}", raw);
        return Err(LocationError::InvalidPostcode(raw.to_string()));
    }

    Ok(Some(LocationIdentifier::new(trimmed)))
}

pub struct LocationResolver {
    lookup: PostcodeLookup,
    positions: Box<dyn PositionSource>,
}

impl LocationResolver {
    pub fn new(lookup: PostcodeLookup, positions: Box<dyn PositionSource>) -> Self {
        Self { lookup, positions }
    }

    /// Ask the device where it is, then reverse geocode that to a postcode.
    pub async fn resolve_from_device(&self) -> Result<LocationIdentifier, LocationError> {
        let coords = self.positions.current_position().await?;
        tracing::info!("Got location: {}, {}", coords.latitude, coords.longitude);
        self.lookup.postcode_for(coords).await
    }

    pub fn resolve_from_input(
        &self,
        raw: &str,
    ) -> Result<Option<LocationIdentifier>, LocationError> {
        resolve_from_input(raw)
    }
}
