use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionProvider;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Credential store. Default: PgStore.
    pub store: Arc<dyn Store>,
    /// Completion provider. Default: LlmClient.
    pub completion: Arc<dyn CompletionProvider>,
    pub config: Config,
}
