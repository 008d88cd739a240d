//! Shortcut categories

use serde::{Deserialize, Serialize};

/// Fixed grouping of shortcuts; declaration order is display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutCategory {
    #[default]
    General,
    Jogging,
    Probing,
    Carving,
    Overrides,
    Visualizer,
    Location,
    SpindleLaser,
    Coolant,
    Toolbar,
    Macro,
}

impl ShortcutCategory {
    /// Every category in display order
    pub const ALL: [ShortcutCategory; 11] = [
        Self::General,
        Self::Jogging,
        Self::Probing,
        Self::Carving,
        Self::Overrides,
        Self::Visualizer,
        Self::Location,
        Self::SpindleLaser,
        Self::Coolant,
        Self::Toolbar,
        Self::Macro,
    ];

    /// Serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Jogging => "jogging",
            Self::Probing => "probing",
            Self::Carving => "carving",
            Self::Overrides => "overrides",
            Self::Visualizer => "visualizer",
            Self::Location => "location",
            Self::SpindleLaser => "spindle_laser",
            Self::Coolant => "coolant",
            Self::Toolbar => "toolbar",
            Self::Macro => "macro",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Jogging => "Jogging",
            Self::Probing => "Probing",
            Self::Carving => "Carving",
            Self::Overrides => "Overrides",
            Self::Visualizer => "Visualizer",
            Self::Location => "Location",
            Self::SpindleLaser => "Spindle/Laser",
            Self::Coolant => "Coolant",
            Self::Toolbar => "Toolbar",
            Self::Macro => "Macros",
        }
    }
}

impl std::fmt::Display for ShortcutCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
