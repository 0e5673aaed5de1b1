use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::profile::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup. `None` when no API key was configured, in which
    /// case analysis requests answer 503.
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub store: Arc<dyn RecordStore>,
}
