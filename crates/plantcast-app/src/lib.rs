//! Screen orchestration for Plantcast.
//!
//! Two screens, one controller each: the list screen runs the
//! permission → location → weather → plant-search sequence and exposes a
//! [`state::ScreenState`]; the detail screen runs its detail fetch and a
//! location re-fetch concurrently and renders field-level fallbacks.

pub mod detail;
pub mod diagnostics;
pub mod list;
pub mod nav;
pub mod state;

pub use detail::{DetailController, DetailScreen, Section};
pub use diagnostics::{DiagnosticsSink, TracingSink};
pub use list::{list_rows, ListController, ListRow, PERMISSION_DENIED_MESSAGE};
pub use nav::{Navigator, Route};
pub use state::ScreenState;
