use gsender_macros::{EventService, MacroService};
use gsender_shortcuts::ShortcutBook;
use gsender_store::ConfigStore;
use std::sync::Arc;

/// Shared state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: every service is a view over the same `Arc<ConfigStore>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<ConfigStore>,
    pub macros: MacroService,
    pub events: EventService,
    pub shortcuts: ShortcutBook,
}

impl AppState {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self {
            macros: MacroService::new(store.clone()),
            events: EventService::new(store.clone()),
            shortcuts: ShortcutBook::new(store.clone()),
            store,
        }
    }
}
