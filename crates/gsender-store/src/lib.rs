//! gSender Store Crate
//!
//! Persistent record store: one JSON config document with dotted-path
//! access, plus typed array collections over its top-level keys.

pub mod collection;
pub mod error;
pub mod paths;
pub mod store;

pub use collection::RecordCollection;
pub use error::{StoreError, StoreResult};
pub use paths::{config_dir, default_store_path};
pub use store::ConfigStore;

/// Top-level keys of the config document
pub mod keys {
    /// Macro records
    pub const MACROS: &str = "macros";
    /// Program-event hooks
    pub const EVENTS: &str = "events";
    /// Keyboard shortcut records
    pub const SHORTCUTS: &str = "shortcuts";
    /// Job run statistics
    pub const JOB_STATS: &str = "jobStats";
    /// Workspace preferences
    pub const PREFERENCES: &str = "preferences";
    /// Remote-mode settings
    pub const REMOTE_SETTINGS: &str = "remoteSettings";
    /// Maintenance tasks
    pub const MAINTENANCE: &str = "maintenance";
    /// Alarm and error history
    pub const ALARM_LIST: &str = "alarmList";
    /// Usage metrics consent and state
    pub const METRICS: &str = "metrics";
}
