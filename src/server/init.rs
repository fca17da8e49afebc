/**
 * Server Initialization
 *
 * Builds the Axum application: loads the document store, constructs
 * the AI adapter, assembles the shared state, and wires the router.
 *
 * # Resilience
 *
 * Initialization never fails on missing external services. An absent
 * Firestore configuration selects the in-memory store and a missing
 * Gemini key leaves the generative adapter in its degraded mode, so a
 * bare environment still yields a working server.
 */

use std::sync::Arc;

use axum::Router;

use crate::ai::AiService;
use crate::routes::router::create_router;
use crate::server::config::{load_store, Settings};
use crate::server::state::AppState;
use crate::store::DocumentStore;

/// Create and configure the Axum application from settings
///
/// # Initialization Steps
///
/// 1. Select the document store (Firestore or in-memory)
/// 2. Build the AI adapter from the configured models and endpoints
/// 3. Assemble the shared application state
/// 4. Create the router with all routes and middleware
pub async fn create_app(settings: Settings) -> Router {
    tracing::info!("Initializing {} backend", settings.app_name);

    let store = load_store(&settings);
    tracing::info!("Document store ready: {}", store.backend_tag());

    let ai = Arc::new(AiService::new(&settings));

    create_app_with(settings, store, ai)
}

/// Assemble the application around pre-built services
///
/// Integration tests use this to inject an in-memory store and an
/// unconfigured AI adapter.
pub fn create_app_with(
    settings: Settings,
    store: Arc<dyn DocumentStore>,
    ai: Arc<AiService>,
) -> Router {
    let state = AppState {
        settings: Arc::new(settings),
        store,
        ai,
    };

    create_router(state)
}
