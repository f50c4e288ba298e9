//! Internal failure signals for the silently-degraded paths.
//!
//! A failed plant search renders as an empty list and a failed detail fetch
//! as an all-fallback record; the user never sees the difference. This hook
//! carries the distinction for observability without changing what renders.

use plantcast_plants::PlantsError;

/// Receives the error behind each silently-degraded render.
pub trait DiagnosticsSink: Send + Sync {
    /// The humidity search failed; the screen shows an empty list.
    fn plant_search_failed(&self, error: &PlantsError);

    /// The detail fetch failed; the screen shows all fallback fields.
    fn plant_detail_failed(&self, plant_id: Option<i64>, error: &PlantsError);
}

/// Default sink: emits tracing warnings and nothing else.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn plant_search_failed(&self, error: &PlantsError) {
        tracing::warn!("Plant search failed, rendering empty list: {}", error);
    }

    fn plant_detail_failed(&self, plant_id: Option<i64>, error: &PlantsError) {
        tracing::warn!(
            "Plant detail fetch failed for {:?}, rendering fallbacks: {}",
            plant_id,
            error
        );
    }
}
