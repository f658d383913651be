//! Request cancellation tied to view lifetime.

use leptos::prelude::on_cleanup;
use web_sys::{AbortController, AbortSignal};

/// AbortController hooked into the current reactive scope: disposing the
/// owning view aborts every in-flight request carrying its handle.
#[derive(Clone)]
pub struct ScopeAbort {
    controller: Option<AbortController>,
}

impl ScopeAbort {
    /// Creates the controller and registers its abort with scope cleanup.
    /// Call once from a component body.
    pub fn register() -> Self {
        let controller = AbortController::new().ok();
        if let Some(active) = controller.clone() {
            on_cleanup(move || active.abort());
        }
        Self { controller }
    }

    /// Handle passed to requests issued from this scope.
    pub fn handle(&self) -> AbortHandle {
        AbortHandle {
            signal: self.controller.as_ref().map(|c| c.signal()),
        }
    }
}

/// Cloneable view onto the scope's abort state.
#[derive(Clone, Default)]
pub struct AbortHandle {
    signal: Option<AbortSignal>,
}

impl AbortHandle {
    /// Wire-level signal for the request builder.
    pub fn signal(&self) -> Option<&AbortSignal> {
        self.signal.as_ref()
    }

    /// True once the owning scope is gone. Async continuations check this
    /// after every await, before touching view state.
    pub fn aborted(&self) -> bool {
        self.signal.as_ref().is_some_and(|s| s.aborted())
    }
}
