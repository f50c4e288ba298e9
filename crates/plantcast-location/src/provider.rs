//! Location provider trait and the config-backed implementation.
//!
//! A real device would answer the permission prompt and GPS fix from the
//! platform; a headless build answers both from configuration. Screens only
//! see the trait.

use crate::types::{Coordinates, LocationError, PermissionState};

/// Foreground location access as the screens consume it: a permission
/// request followed by a coordinates fetch.
///
/// The coordinates call may take as long as the underlying fix does; no
/// timeout is imposed here.
#[allow(async_fn_in_trait)]
pub trait LocationProvider {
    /// Request foreground location permission.
    async fn request_permission(&self) -> PermissionState;

    /// Fetch the current device coordinates.
    ///
    /// Fails with [`LocationError::NoFix`] when no position is available;
    /// the caller treats that as terminal for its fetch sequence.
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError>;
}

/// Provider that answers from fixed values (configuration or tests).
#[derive(Debug, Clone)]
pub struct ConfiguredProvider {
    permission: PermissionState,
    fix: Option<Coordinates>,
}

impl ConfiguredProvider {
    /// Provider with permission granted and a fix at the given position.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            permission: PermissionState::Granted,
            fix: Some(Coordinates {
                latitude,
                longitude,
            }),
        }
    }

    /// Provider that denies the foreground permission request.
    pub fn denied() -> Self {
        Self {
            permission: PermissionState::Denied,
            fix: None,
        }
    }

    /// Provider with permission granted but no position available.
    pub fn without_fix() -> Self {
        Self {
            permission: PermissionState::Granted,
            fix: None,
        }
    }
}

impl LocationProvider for ConfiguredProvider {
    async fn request_permission(&self) -> PermissionState {
        self.permission
    }

    async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        match self.fix {
            Some(coords) => {
                tracing::debug!(
                    "Location fix: {}, {}",
                    coords.latitude,
                    coords.longitude
                );
                Ok(coords)
            }
            None => Err(LocationError::NoFix),
        }
    }
}
