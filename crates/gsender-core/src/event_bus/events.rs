//! Event type definitions for the event bus.
//!
//! Events announce record changes so other components (remote clients,
//! the shortcut registry, the dispatcher's local list) can refresh.

use serde::{Deserialize, Serialize};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Config store key changes
    Config(ConfigEvent),
    /// Macro record changes
    Macro(MacroEvent),
    /// Program-event hook changes
    ProgramEvent(ProgramEventChange),
    /// Shortcut changes
    Shortcut(ShortcutEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Config(_) => EventCategory::Config,
            AppEvent::Macro(_) => EventCategory::Macro,
            AppEvent::ProgramEvent(_) => EventCategory::ProgramEvent,
            AppEvent::Shortcut(_) => EventCategory::Shortcut,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Config(e) => e.description(),
            AppEvent::Macro(e) => e.description(),
            AppEvent::ProgramEvent(e) => e.description(),
            AppEvent::Shortcut(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Config store events.
    Config,
    /// Macro events.
    Macro,
    /// Program-event hook events.
    ProgramEvent,
    /// Shortcut events.
    Shortcut,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Config => write!(f, "Config"),
            EventCategory::Macro => write!(f, "Macro"),
            EventCategory::ProgramEvent => write!(f, "ProgramEvent"),
            EventCategory::Shortcut => write!(f, "Shortcut"),
        }
    }
}

/// Config store events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigEvent {
    /// A key was written or removed.
    Changed {
        /// Dotted path of the changed key.
        key: String,
    },
}

impl ConfigEvent {
    /// Get a short description
    pub fn description(&self) -> String {
        match self {
            ConfigEvent::Changed { key } => format!("Config changed: {}", key),
        }
    }
}

/// Macro record events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MacroEvent {
    /// A macro was created.
    Created {
        /// Macro id.
        id: String,
    },
    /// A macro was updated.
    Updated {
        /// Macro id.
        id: String,
    },
    /// A macro was deleted.
    Deleted {
        /// Macro id.
        id: String,
    },
    /// Macro placement changed.
    Reordered,
}

impl MacroEvent {
    /// Get a short description
    pub fn description(&self) -> String {
        match self {
            MacroEvent::Created { id } => format!("Macro created: {}", id),
            MacroEvent::Updated { id } => format!("Macro updated: {}", id),
            MacroEvent::Deleted { id } => format!("Macro deleted: {}", id),
            MacroEvent::Reordered => "Macros reordered".to_string(),
        }
    }
}

/// Program-event hook changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgramEventChange {
    /// A hook was created.
    Created {
        /// Hook id.
        id: String,
    },
    /// A hook was updated.
    Updated {
        /// Hook id.
        id: String,
    },
    /// A hook was deleted.
    Deleted {
        /// Hook id.
        id: String,
    },
}

impl ProgramEventChange {
    /// Get a short description
    pub fn description(&self) -> String {
        match self {
            ProgramEventChange::Created { id } => format!("Event hook created: {}", id),
            ProgramEventChange::Updated { id } => format!("Event hook updated: {}", id),
            ProgramEventChange::Deleted { id } => format!("Event hook deleted: {}", id),
        }
    }
}

/// Shortcut events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShortcutEvent {
    /// The stored shortcut set was replaced.
    Saved {
        /// Number of records saved.
        count: usize,
    },
}

impl ShortcutEvent {
    /// Get a short description
    pub fn description(&self) -> String {
        match self {
            ShortcutEvent::Saved { count } => format!("Shortcuts saved: {}", count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_category() {
        let event = AppEvent::Macro(MacroEvent::Created {
            id: "m1".to_string(),
        });
        assert_eq!(event.category(), EventCategory::Macro);
        assert_eq!(event.description(), "Macro created: m1");

        let event = AppEvent::Config(ConfigEvent::Changed {
            key: "macros".to_string(),
        });
        assert_eq!(event.category(), EventCategory::Config);
    }
}
