use crate::ai::Dispatcher;
use crate::core::AppConfig;
use crate::session::Session;

/// Everything the handlers share. The server holds a single session;
/// every browser tab talking to it sees the same attachment and log.
pub struct AppState {
    pub session: Session,
    pub dispatcher: Dispatcher,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, config: AppConfig) -> Self {
        Self {
            session: Session::new(),
            dispatcher,
            config,
        }
    }
}
