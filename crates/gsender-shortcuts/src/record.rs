//! Shortcut records and registration specs

use crate::category::ShortcutCategory;
use crate::keys::KeyCombo;
use serde::{Deserialize, Serialize};

/// Persisted state of one shortcut
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub default_keys: String,
    /// Empty when unbound
    #[serde(default)]
    pub current_keys: String,
    #[serde(default)]
    pub category: ShortcutCategory,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ShortcutRecord {
    /// Normalized current binding
    pub fn combo(&self) -> KeyCombo {
        KeyCombo::parse(&self.current_keys)
    }

    /// Normalized default binding
    pub fn default_combo(&self) -> KeyCombo {
        KeyCombo::parse(&self.default_keys)
    }

    /// Whether the current keys differ from the defaults
    pub fn is_customized(&self) -> bool {
        self.combo() != self.default_combo()
    }
}

/// What a component declares when it registers a shortcut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutSpec {
    pub id: String,
    pub title: String,
    pub description: String,
    pub default_keys: String,
    pub category: ShortcutCategory,
}

impl ShortcutSpec {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        default_keys: impl Into<String>,
        category: ShortcutCategory,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            default_keys: default_keys.into(),
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Fresh record bound to the defaults
    pub fn into_record(self) -> ShortcutRecord {
        ShortcutRecord {
            current_keys: self.default_keys.clone(),
            id: self.id,
            title: self.title,
            description: self.description,
            default_keys: self.default_keys,
            category: self.category,
            is_active: true,
        }
    }
}
