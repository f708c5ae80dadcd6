//! Dashboard state and the flow that drives it.
//!
//! `DashboardState` is a plain value changed only through the transition
//! methods below; `Dashboard` owns one behind a mutex and runs the network
//! calls between transitions. Every fetch carries a `FetchTicket`, and only
//! the ticket for the most recent location change may update the view.

use parking_lot::Mutex;
use skycast_core::{LocationError, WeatherError};

use crate::location::LocationResolver;
use crate::provider::WeatherProvider;
use crate::types::LocationIdentifier;
use crate::view::{BackgroundMode, ViewModel};

/// Location shown before the user picks one.
pub const DEFAULT_LOCATION: &str = "EC2V 8AF";

/// Handle for one in-flight forecast fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    location: LocationIdentifier,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn location(&self) -> &LocationIdentifier {
        &self.location
    }
}

/// A failure the user has to hear about now.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: &'static str,
    pub error: LocationError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    location: LocationIdentifier,
    editing: bool,
    resolving: bool,
    fetching: bool,
    view: Option<ViewModel>,
    generation: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(LocationIdentifier::from(DEFAULT_LOCATION))
    }
}

impl DashboardState {
    pub fn new(location: LocationIdentifier) -> Self {
        Self {
            location,
            editing: false,
            resolving: false,
            fetching: false,
            view: None,
            generation: 0,
        }
    }

    pub fn location(&self) -> &LocationIdentifier {
        &self.location
    }

    /// True while a device lookup or the current fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.resolving || self.fetching
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn view(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }

    pub fn background(&self) -> BackgroundMode {
        self.view
            .as_ref()
            .map(|v| v.background)
            .unwrap_or_default()
    }

    pub fn begin_edit(mut self) -> Self {
        self.editing = true;
        self
    }

    pub fn cancel_edit(mut self) -> Self {
        self.editing = false;
        self
    }

    pub fn begin_device_lookup(mut self) -> Self {
        self.resolving = true;
        self
    }

    /// Record a new location and issue the ticket for its fetch.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn location_changed(mut self, location: LocationIdentifier) -> (Self, FetchTicket) {
        self.generation += 1;
        self.location = location.clone();
        self.editing = false;
        self.resolving = false;
        self.fetching = true;

        let ticket = FetchTicket {
            generation: self.generation,
            location,
        };
        (self, ticket)
    }

    /// Location resolution failed; the stored location is kept.
    pub fn resolution_failed(mut self, error: LocationError) -> (Self, Option<Notice>) {
        self.resolving = false;

        if error.is_user_actionable() {
            self.editing = false;
            let notice = Notice {
                message: error.user_message(),
                error,
            };
            return (self, Some(notice));
        }

        tracing::error!("Location lookup failed: {}", error);
        (self, None)
    }

    /// Apply a fetch result if `ticket` is still the latest one.
    ///
    /// Success replaces the view wholesale and adopts the service's place
    /// label as the location. Failure keeps the previous view.
    pub fn fetch_completed(
        mut self,
        ticket: &FetchTicket,
        result: Result<ViewModel, WeatherError>,
    ) -> Self {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale forecast for {} (generation {}, current {})",
                ticket.location,
                ticket.generation,
                self.generation
            );
            return self;
        }

        self.fetching = false;
        match result {
            Ok(view) => {
                self.location = LocationIdentifier::new(view.location_label.clone());
                self.view = Some(view);
            }
            Err(e) => {
                tracing::error!("Forecast fetch for {} failed: {}", ticket.location, e);
            }
        }
        self
    }
}

pub struct Dashboard {
    state: Mutex<DashboardState>,
    resolver: LocationResolver,
    provider: WeatherProvider,
}

impl Dashboard {
    pub fn new(
        initial: LocationIdentifier,
        resolver: LocationResolver,
        provider: WeatherProvider,
    ) -> Self {
        Self {
            state: Mutex::new(DashboardState::new(initial)),
            resolver,
            provider,
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.lock().clone()
    }

    fn apply<R>(&self, transition: impl FnOnce(DashboardState) -> (DashboardState, R)) -> R {
        let mut guard = self.state.lock();
        let (next, out) = transition(std::mem::take(&mut *guard));
        *guard = next;
        out
    }

    /// Fetch the forecast for the initial location.
    pub async fn start(&self) {
        let location = self.state.lock().location.clone();
        self.on_location_changed(location).await;
    }

    pub fn begin_edit(&self) {
        self.apply(|s| (s.begin_edit(), ()));
    }

    /// Fetch once for `location`. Errors are logged, never returned.
    pub async fn on_location_changed(&self, location: LocationIdentifier) {
        let ticket = self.apply(|s| s.location_changed(location));
        let result = self.provider.fetch(ticket.location()).await;
        self.apply(|s| (s.fetch_completed(&ticket, result), ()));
    }

    /// Handle a submitted postcode. Empty input just leaves edit mode.
    pub async fn submit_postcode(&self, raw: &str) -> Option<Notice> {
        match self.resolver.resolve_from_input(raw) {
            Ok(None) => {
                self.apply(|s| (s.cancel_edit(), ()));
                None
            }
            Ok(Some(location)) => {
                self.on_location_changed(location).await;
                None
            }
            Err(e) => self.apply(|s| s.resolution_failed(e)),
        }
    }

    /// Resolve the device's position to a postcode and fetch for it.
    pub async fn use_device_location(&self) -> Option<Notice> {
        self.apply(|s| (s.begin_device_lookup(), ()));
        match self.resolver.resolve_from_device().await {
            Ok(location) => {
                self.on_location_changed(location).await;
                None
            }
            Err(e) => self.apply(|s| s.resolution_failed(e)),
        }
    }
}
