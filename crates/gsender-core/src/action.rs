//! Actions bound to shortcuts
//!
//! An [`Action`] is the data half of a shortcut: what should happen when it
//! fires. Shortcut handlers queue actions; the dispatcher executes them off
//! the input path.

use crate::controller::ControllerCommand;
use serde::{Deserialize, Serialize};

/// What a shortcut does when it fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Action {
    /// Run a stored macro
    RunMacro {
        /// Macro id.
        macro_id: String,
    },
    /// Issue a named controller command
    Command {
        /// Command name (`cyclestart`, `feedhold`, `unlock`, ...).
        name: String,
    },
    /// Send raw G-code
    Gcode {
        /// G-code text.
        code: String,
    },
}

impl Action {
    /// Controller command for actions that map onto one directly
    ///
    /// Macro runs need the macro record first and return `None`.
    pub fn controller_command(&self) -> Option<ControllerCommand> {
        match self {
            Action::RunMacro { .. } => None,
            Action::Command { name } => Some(ControllerCommand::Named { name: name.clone() }),
            Action::Gcode { code } => Some(ControllerCommand::Gcode { code: code.clone() }),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::RunMacro { macro_id } => write!(f, "run macro {}", macro_id),
            Action::Command { name } => write!(f, "command {}", name),
            Action::Gcode { code } => write!(f, "gcode {}", code.trim()),
        }
    }
}

/// An action queued by a shortcut, waiting for the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedAction {
    /// Shortcut that fired.
    pub shortcut_id: String,
    /// What to do.
    pub action: Action,
}
