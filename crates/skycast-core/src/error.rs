//! Centralized error types for Skycast.
//!
//! This module provides a typed error hierarchy that:
//! - Separates failures the user can act on from ones that are only logged
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Location(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
        }
    }
}

/// Failures while turning device position or typed input into a location.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    #[error("Positioning is not available on this device")]
    PositioningUnavailable,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Postcode not found")]
    PostcodeNotFound,

    #[error("Invalid UK postcode: {0:?}")]
    InvalidPostcode(String),

    #[error("Postcode lookup failed: {0}")]
    Network(#[from] NetworkError),
}

impl LocationError {
    /// True when the user should see a notice straight away.
    ///
    /// Everything else is logged and the previous display is kept.
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            LocationError::PositioningUnavailable
                | LocationError::PermissionDenied
                | LocationError::InvalidPostcode(_)
        )
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PositioningUnavailable => {
                "Geolocation is not supported on this device."
            }
            LocationError::PermissionDenied => {
                "Location access was denied. Enter a postcode instead."
            }
            LocationError::PostcodeNotFound => "No postcode was found for your position.",
            LocationError::InvalidPostcode(_) => "Please input a valid UK postcode.",
            LocationError::Network(e) => e.user_message(),
        }
    }
}

/// Weather service errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WeatherError {
    #[error("Weather request failed: {0}")]
    Network(#[from] NetworkError),

    #[error("Unexpected weather response: {0}")]
    Parse(String),

    #[error("Weather API key is not configured")]
    MissingApiKey,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Network(e) => e.user_message(),
            WeatherError::Parse(_) => "Weather service returned unexpected data.",
            WeatherError::MissingApiKey => "Weather API key is missing. Check settings.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
