/**
 * Application State Management
 *
 * Central state container shared across all route handlers. Holds the
 * loaded settings plus the two service seams: the document store and
 * the AI adapter. Both are trait-object / struct services behind `Arc`
 * so tests can inject an in-memory store and an unconfigured adapter.
 *
 * The `FromRef` implementations let handlers and extractors take only
 * the slice of state they need, per Axum's recommended pattern.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::ai::AiService;
use crate::server::config::Settings;
use crate::store::DocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<dyn DocumentStore>,
    pub ai: Arc<AiService>,
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}

impl FromRef<AppState> for Arc<dyn DocumentStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<AiService> {
    fn from_ref(state: &AppState) -> Self {
        state.ai.clone()
    }
}
