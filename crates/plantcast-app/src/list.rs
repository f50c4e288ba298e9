//! List screen orchestration: permission → coordinates → weather → plants.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use plantcast_location::LocationProvider;
use plantcast_plants::{HumidityWindow, PlantsClient};
use plantcast_weather::WeatherClient;

use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::state::ScreenState;

/// The only user-visible failure message on this screen.
pub const PERMISSION_DENIED_MESSAGE: &str = "Permiso de ubicación denegado";

/// Drives the list screen's single fetch sequence and owns its state.
///
/// Each screen activation constructs a fresh controller and runs
/// [`initialize`](Self::initialize) once; there is no re-fetch, no retry
/// and no caching between activations.
pub struct ListController<L> {
    location: L,
    weather: WeatherClient,
    plants: PlantsClient,
    diagnostics: Arc<dyn DiagnosticsSink>,
    cancel: CancellationToken,
    state: ScreenState,
}

impl<L: LocationProvider> ListController<L> {
    pub fn new(location: L, weather: WeatherClient, plants: PlantsClient) -> Self {
        Self::with_diagnostics(location, weather, plants, Arc::new(TracingSink))
    }

    pub fn with_diagnostics(
        location: L,
        weather: WeatherClient,
        plants: PlantsClient,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            location,
            weather,
            plants,
            diagnostics,
            cancel: CancellationToken::new(),
            state: ScreenState::Loading,
        }
    }

    /// Current screen state.
    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Cancel the in-flight fetch sequence; late results are discarded
    /// instead of written to a dead screen.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// Run the fetch sequence once.
    ///
    /// - Permission denied: terminal `PermissionDenied`, zero network calls.
    /// - No location fix: sequence ends, state stays `Loading`.
    /// - Weather failed: `Loaded { weather: None, plants: [] }`; the plant
    ///   search is gated on a successful weather fetch and never runs with
    ///   a default humidity.
    /// - Plant search failed: degrades to an empty list (reported through
    ///   the diagnostics sink), same `Loaded` shape as a zero-result search.
    pub async fn initialize(&mut self) {
        let cancel = self.cancel.clone();
        let next = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("List screen torn down mid-fetch; discarding result");
                None
            }
            next = self.run_sequence() => next,
        };

        if let Some(next) = next {
            self.state.advance(next);
        }
    }

    async fn run_sequence(&self) -> Option<ScreenState> {
        if !self.location.request_permission().await.is_granted() {
            tracing::info!("Location permission denied");
            return Some(ScreenState::PermissionDenied(
                PERMISSION_DENIED_MESSAGE.to_string(),
            ));
        }

        let coords = match self.location.current_coordinates().await {
            Ok(coords) => coords,
            Err(e) => {
                // Terminal for this sequence; the screen keeps loading.
                tracing::warn!("No location fix: {}", e);
                return None;
            }
        };

        let weather = match self
            .weather
            .fetch_current(coords.latitude, coords.longitude)
            .await
        {
            Ok(weather) => weather,
            Err(e) => {
                tracing::warn!("Weather fetch failed, skipping plant search: {}", e);
                return Some(ScreenState::Loaded {
                    weather: None,
                    plants: Vec::new(),
                });
            }
        };

        let window = HumidityWindow::around(i32::from(weather.humidity));
        let plants = match self.plants.search_by_humidity_range(&window).await {
            Ok(plants) => plants,
            Err(e) => {
                self.diagnostics.plant_search_failed(&e);
                Vec::new()
            }
        };

        Some(ScreenState::Loaded {
            weather: Some(weather),
            plants,
        })
    }
}

impl<L> Drop for ListController<L> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// One rendered row of the plant list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    /// Plant id when present, else the row's position in the result list.
    pub key: String,
    pub label: String,
    pub image_url: Option<String>,
}

/// Rows for the current state: one per search result, in order.
pub fn list_rows(state: &ScreenState) -> Vec<ListRow> {
    match state {
        ScreenState::Loaded { plants, .. } => plants
            .iter()
            .enumerate()
            .map(|(index, plant)| ListRow {
                key: plant.key(index),
                label: plant.display_name().to_string(),
                image_url: plant.image_url.clone(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Text rendering of the list screen.
pub fn render(state: &ScreenState) -> String {
    let mut out = String::from("Clima y Plantas\n");

    match state {
        ScreenState::PermissionDenied(message) => {
            out.push_str(message);
            out.push('\n');
        }
        ScreenState::Loaded {
            weather: Some(weather),
            ..
        } => {
            out.push_str(&format!(
                "Temperatura: {}°C, Humedad: {}%\n",
                weather.temperature, weather.humidity
            ));
        }
        // Still loading, or loaded with no usable weather
        _ => out.push_str("Cargando clima...\n"),
    }

    for row in list_rows(state) {
        out.push_str(&format!("- {}\n", row.label));
    }

    out
}
