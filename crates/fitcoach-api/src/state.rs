use std::sync::Arc;

use fitcoach_auth::IdTokenVerifier;
use fitcoach_llm::CoachClient;
use fitcoach_persist::PersistenceClient;

use crate::config::Config;

/// Shared application state passed to all handlers.
///
/// Collaborators are trait objects behind Arc so tests can substitute
/// in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub persist: Arc<dyn PersistenceClient>,
    pub google_verifier: Arc<dyn IdTokenVerifier>,
    pub coach: Arc<dyn CoachClient>,
}

impl AppState {
    pub fn new(
        config: Config,
        persist: Arc<dyn PersistenceClient>,
        google_verifier: Arc<dyn IdTokenVerifier>,
        coach: Arc<dyn CoachClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            persist,
            google_verifier,
            coach,
        }
    }
}
