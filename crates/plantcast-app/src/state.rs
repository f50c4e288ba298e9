//! List screen state machine.
//!
//! One variant active at a time; transitions are one-directional within a
//! screen lifetime (Loading → PermissionDenied or Loaded, never back).

use plantcast_plants::PlantSummary;
use plantcast_weather::WeatherReport;

/// Observable state of the list screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenState {
    /// Fetch sequence not yet finished.
    #[default]
    Loading,
    /// Foreground location permission was denied; carries the user-visible
    /// message. Terminal: no network call happens after this.
    PermissionDenied(String),
    /// Fetch sequence finished. `weather` is `None` when the weather call
    /// failed, in which case `plants` is always empty (the search is gated
    /// on a successful weather fetch). An empty `plants` with weather
    /// present is either a zero-result search or a failed one; the state
    /// does not distinguish them.
    Loaded {
        weather: Option<WeatherReport>,
        plants: Vec<PlantSummary>,
    },
}

impl ScreenState {
    /// True once the screen has left `Loading`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ScreenState::Loading)
    }

    /// Apply a transition, enforcing one-directional movement: terminal
    /// states never change again, and nothing moves back to `Loading`.
    pub fn advance(&mut self, next: ScreenState) {
        if self.is_terminal() {
            tracing::warn!("Ignoring state transition after terminal state");
            return;
        }
        if matches!(next, ScreenState::Loading) {
            return;
        }
        *self = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_empty() -> ScreenState {
        ScreenState::Loaded {
            weather: None,
            plants: Vec::new(),
        }
    }

    #[test]
    fn starts_loading() {
        assert_eq!(ScreenState::default(), ScreenState::Loading);
        assert!(!ScreenState::default().is_terminal());
    }

    #[test]
    fn loading_advances_to_permission_denied() {
        let mut state = ScreenState::Loading;
        state.advance(ScreenState::PermissionDenied("denegado".into()));
        assert!(matches!(state, ScreenState::PermissionDenied(_)));
        assert!(state.is_terminal());
    }

    #[test]
    fn loading_advances_to_loaded() {
        let mut state = ScreenState::Loading;
        state.advance(loaded_empty());
        assert!(matches!(state, ScreenState::Loaded { .. }));
    }

    #[test]
    fn terminal_state_never_changes() {
        let mut state = ScreenState::PermissionDenied("denegado".into());
        state.advance(loaded_empty());
        assert!(matches!(state, ScreenState::PermissionDenied(_)));

        let mut state = loaded_empty();
        state.advance(ScreenState::PermissionDenied("denegado".into()));
        assert!(matches!(state, ScreenState::Loaded { .. }));
    }

    #[test]
    fn never_transitions_back_to_loading() {
        let mut state = ScreenState::Loading;
        state.advance(ScreenState::Loading);
        assert_eq!(state, ScreenState::Loading); // no-op, still the start

        let mut state = loaded_empty();
        state.advance(ScreenState::Loading);
        assert!(matches!(state, ScreenState::Loaded { .. }));
    }
}
