//! Application state shared by every request

use std::sync::Arc;

use crate::domain::EngineFactory;

/// Immutable per-process state. Engines are built from it per request.
#[derive(Clone)]
pub struct AppState {
    pub engine_factory: Arc<dyn EngineFactory>,
}

impl AppState {
    pub fn new(engine_factory: Arc<dyn EngineFactory>) -> Self {
        Self { engine_factory }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine_factory", &self.engine_factory.backend_name())
            .finish()
    }
}
