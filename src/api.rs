//! HTTP API for the sales trainer

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::llm::LlmService;
use crate::runtime::ConversationManager;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<ConversationManager>,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmService>, conclusion_delay: Duration, idle_timeout: Duration) -> Self {
        Self {
            manager: Arc::new(ConversationManager::new(llm, conclusion_delay, idle_timeout)),
        }
    }
}
