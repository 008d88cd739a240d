//! Controller collaborator interface
//!
//! The serial/network transport to the CNC controller lives outside this
//! workspace. Everything that needs to reach the machine goes through the
//! [`Controller`] trait with a [`ControllerCommand`].

use crate::error::ControllerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variables made available to a macro when it runs (positions, limits, ...)
pub type MacroContext = BTreeMap<String, serde_json::Value>;

/// Commands the registry and dispatcher send to the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControllerCommand {
    /// Run a stored macro by id
    MacroRun {
        /// Macro id.
        id: String,
        /// Variables for macro expansion.
        context: MacroContext,
    },
    /// Load a stored macro into the sender without running it
    MacroLoad {
        /// Macro id.
        id: String,
        /// Variables for macro expansion.
        context: MacroContext,
    },
    /// Send raw G-code
    Gcode {
        /// G-code text, possibly multi-line.
        code: String,
    },
    /// A named controller command (`cyclestart`, `feedhold`, `homing`, ...)
    Named {
        /// Command name.
        name: String,
    },
}

impl std::fmt::Display for ControllerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerCommand::MacroRun { id, .. } => write!(f, "macro:run {}", id),
            ControllerCommand::MacroLoad { id, .. } => write!(f, "macro:load {}", id),
            ControllerCommand::Gcode { code } => write!(f, "gcode {}", code.trim()),
            ControllerCommand::Named { name } => write!(f, "{}", name),
        }
    }
}

/// Controller trait
///
/// Implementations forward commands to the machine asynchronously; callers
/// never block the event loop waiting on the transport.
#[async_trait]
pub trait Controller: Send + Sync {
    /// Deliver a command to the controller
    async fn command(&self, command: ControllerCommand) -> Result<(), ControllerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let cmd = ControllerCommand::MacroRun {
            id: "m1".to_string(),
            context: MacroContext::new(),
        };
        assert_eq!(cmd.to_string(), "macro:run m1");

        let cmd = ControllerCommand::Gcode {
            code: "G0 X0\n".to_string(),
        };
        assert_eq!(cmd.to_string(), "gcode G0 X0");
    }

    #[test]
    fn test_command_serialization() {
        let cmd = ControllerCommand::Named {
            name: "feedhold".to_string(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "named");
        assert_eq!(json["name"], "feedhold");
    }
}
