//! Device location access for Plantcast.
//!
//! Exposes the foreground-permission check and the current-coordinates
//! fetch behind a trait so screens can be driven by any provider.

pub mod provider;
pub mod types;

pub use provider::{ConfiguredProvider, LocationProvider};
pub use types::{Coordinates, LocationError, PermissionState};
