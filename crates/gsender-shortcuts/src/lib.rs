//! # gSender Shortcuts
//!
//! Keyboard shortcut registry for the sender: key normalization, the
//! registry with its capture/edit flow and conflict checks, built-in
//! shortcuts, and persistence of the shortcut set.

pub mod catalog;
pub mod category;
pub mod error;
pub mod keys;
pub mod persistence;
pub mod queue;
pub mod record;
pub mod registry;

pub use catalog::{builtin_records, builtin_shortcuts, register_builtins};
pub use category::ShortcutCategory;
pub use error::{ShortcutError, ShortcutResult};
pub use keys::{canonical_key, is_modifier, KeyCombo, KeyEvent, IGNORED_KEYS};
pub use persistence::ShortcutBook;
pub use queue::ActionQueue;
pub use record::{ShortcutRecord, ShortcutSpec};
pub use registry::{
    active_collisions, Binding, Capture, Collision, Handler, KeyPhase, RegistryState, ShortcutRegistry,
};
