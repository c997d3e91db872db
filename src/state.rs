use std::sync::Arc;

use crate::logs::LogStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: LogStore,
}
