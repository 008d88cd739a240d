//! # gSender
//!
//! Macro, program-event and keyboard-shortcut registry for a CNC G-code
//! sender, served over a small HTTP API.
//!
//! ## Architecture
//!
//! The workspace is split into crates:
//!
//! 1. **gsender-core** - Actions, controller seam, errors, event bus
//! 2. **gsender-store** - JSON-file key/value store and record collections
//! 3. **gsender-macros** - Macro and program-event services, action dispatch
//! 4. **gsender-shortcuts** - Key combos, shortcut registry, capture flow
//! 5. **gsender-server** - axum routes over the store
//! 6. **gsender** - Main binary that wires the crates together

pub use gsender_core::{
    Action, AppEvent, Controller, ControllerCommand, ControllerError, Error, EventBus,
    EventFilter, MacroContext, QueuedAction, Result,
};

pub use gsender_store::{ConfigStore, RecordCollection, StoreError};

pub use gsender_macros::{
    ActionDispatcher, EventRecord, EventService, EventTrigger, MacroRecord, MacroService,
};

pub use gsender_shortcuts::{
    ActionQueue, KeyCombo, KeyEvent, ShortcutBook, ShortcutCategory, ShortcutRecord,
    ShortcutRegistry,
};

pub use gsender_server::{build_router, serve, AppState, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
