use std::sync::Arc;

use parrot_bot::ReplyGenerator;
use parrot_persist::PersistenceClient;

use crate::config::Config;
use crate::service::ChatService;

/// Shared application state passed to all handlers
/// 
/// Holds no mutable data of its own; every request goes through the
/// connection pool behind `ChatService`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(
        config: Config,
        persist: Arc<dyn PersistenceClient>,
        replies: Arc<dyn ReplyGenerator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            chat: Arc::new(ChatService::new(persist, replies)),
        }
    }
}
