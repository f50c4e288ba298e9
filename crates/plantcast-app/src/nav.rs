//! Explicit navigation state machine.
//!
//! Named routes with typed parameters, owned by a single navigator instead
//! of ambient framework state. The list route is the stack root and is
//! never popped.

use plantcast_plants::PlantSummary;

/// A screen plus the parameters it was pushed with.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    PlantList,
    PlantDetail { plant: PlantSummary },
}

/// Screen stack. Starts at [`Route::PlantList`].
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::PlantList],
        }
    }

    /// The route on top of the stack.
    #[allow(clippy::expect_used)]
    pub fn current(&self) -> &Route {
        // Invariant: the constructor seeds the root and pop() never removes it
        self.stack.last().expect("stack holds at least the root route")
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push a new screen with its parameters.
    pub fn push(&mut self, route: Route) {
        tracing::debug!("Navigating to {:?}", route);
        self.stack.push(route);
    }

    /// Pop the current screen, returning it. The root stays put.
    pub fn pop(&mut self) -> Option<Route> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
