//! Action dispatcher
//!
//! Bridges shortcut actions and the macro list to the controller. The
//! dispatcher keeps a local copy of the macros so a run does not need a
//! round trip through the backend.

use crate::record::{MacroPatch, MacroRecord};
use crate::service::MacroService;
use async_trait::async_trait;
use gsender_core::{Action, Controller, ControllerCommand, Error, MacroContext, QueuedAction, Result};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Source of truth for macros
#[async_trait]
pub trait MacroBackend: Send + Sync {
    async fn fetch_macros(&self) -> Result<Vec<MacroRecord>>;
    async fn fetch_macro(&self, id: &str) -> Result<MacroRecord>;
    async fn update_macro(&self, id: &str, patch: MacroPatch) -> Result<MacroRecord>;
    async fn delete_macro(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl MacroBackend for MacroService {
    async fn fetch_macros(&self) -> Result<Vec<MacroRecord>> {
        Ok(self.list(None)?.records)
    }

    async fn fetch_macro(&self, id: &str) -> Result<MacroRecord> {
        self.read(id)
    }

    async fn update_macro(&self, id: &str, patch: MacroPatch) -> Result<MacroRecord> {
        self.update(id, patch)
    }

    async fn delete_macro(&self, id: &str) -> Result<()> {
        self.delete(id)
    }
}

#[derive(Debug, Clone, Copy)]
enum MacroDelivery {
    Run,
    Load,
}

/// Sends macros and actions to the controller
pub struct ActionDispatcher {
    controller: Arc<dyn Controller>,
    backend: Arc<dyn MacroBackend>,
    macros: Vec<MacroRecord>,
}

impl ActionDispatcher {
    pub fn new(controller: Arc<dyn Controller>, backend: Arc<dyn MacroBackend>) -> Self {
        Self {
            controller,
            backend,
            macros: Vec::new(),
        }
    }

    /// Local macro list
    pub fn macros(&self) -> &[MacroRecord] {
        &self.macros
    }

    /// Refresh the local list; left unchanged on failure
    pub async fn load_macros(&mut self) -> Result<usize> {
        match self.backend.fetch_macros().await {
            Ok(macros) => {
                self.macros = macros;
                tracing::debug!(count = self.macros.len(), "Macros loaded");
                Ok(self.macros.len())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load macros");
                Err(e)
            }
        }
    }

    /// Ask the controller to run a macro
    pub async fn run_macro(&mut self, id: &str, context: MacroContext) -> Result<()> {
        self.deliver(id, context, MacroDelivery::Run).await
    }

    /// Ask the controller to load a macro into the editor
    pub async fn load_macro(&mut self, id: &str, context: MacroContext) -> Result<()> {
        self.deliver(id, context, MacroDelivery::Load).await
    }

    /// Update through the backend, then mirror the result locally
    pub async fn update_macro(&mut self, id: &str, patch: MacroPatch) -> Result<MacroRecord> {
        let updated = self.backend.update_macro(id, patch).await.map_err(|e| {
            tracing::error!(macro_id = %id, error = %e, "Failed to update macro");
            e
        })?;

        match self.macros.iter_mut().find(|m| m.id == updated.id) {
            Some(local) => *local = updated.clone(),
            None => self.macros.push(updated.clone()),
        }
        Ok(updated)
    }

    /// Delete through the backend, then drop the local copy
    pub async fn delete_macro(&mut self, id: &str) -> Result<()> {
        self.backend.delete_macro(id).await.map_err(|e| {
            tracing::error!(macro_id = %id, error = %e, "Failed to delete macro");
            e
        })?;
        self.macros.retain(|m| m.id != id);
        Ok(())
    }

    /// Run one action
    pub async fn execute(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::RunMacro { macro_id } => self.run_macro(macro_id, MacroContext::new()).await,
            other => match other.controller_command() {
                Some(command) => self.send(command).await,
                None => Ok(()),
            },
        }
    }

    /// Execute queued actions until every sender is gone.
    ///
    /// Returns how many actions succeeded.
    pub async fn drain(&mut self, mut receiver: UnboundedReceiver<QueuedAction>) -> usize {
        let mut succeeded = 0;
        while let Some(queued) = receiver.recv().await {
            match self.execute(&queued.action).await {
                Ok(()) => succeeded += 1,
                Err(e) => {
                    tracing::error!(
                        shortcut_id = %queued.shortcut_id,
                        action = %queued.action,
                        error = %e,
                        "Shortcut action failed"
                    );
                }
            }
        }
        tracing::debug!(succeeded, "Action queue closed");
        succeeded
    }

    async fn deliver(&mut self, id: &str, context: MacroContext, delivery: MacroDelivery) -> Result<()> {
        let name = self.resolve_name(id).await;
        let command = match delivery {
            MacroDelivery::Run => ControllerCommand::MacroRun {
                id: id.to_string(),
                context,
            },
            MacroDelivery::Load => ControllerCommand::MacroLoad {
                id: id.to_string(),
                context,
            },
        };

        match self.controller.command(command).await {
            Ok(()) => {
                tracing::info!(macro_id = %id, macro_name = %name, ?delivery, "Macro sent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    macro_id = %id,
                    macro_name = %name,
                    ?delivery,
                    error = %e,
                    "Failed to send macro"
                );
                Err(Error::from(e))
            }
        }
    }

    /// Name used for logging; empty when the macro is unknown everywhere
    async fn resolve_name(&self, id: &str) -> String {
        if let Some(local) = self.macros.iter().find(|m| m.id == id) {
            return local.name.clone();
        }
        match self.backend.fetch_macro(id).await {
            Ok(record) => record.name,
            Err(e) => {
                tracing::warn!(macro_id = %id, error = %e, "Macro not found locally or in backend");
                String::new()
            }
        }
    }

    async fn send(&self, command: ControllerCommand) -> Result<()> {
        let label = command.to_string();
        self.controller.command(command).await.map_err(|e| {
            tracing::error!(command = %label, error = %e, "Controller command failed");
            Error::from(e)
        })
    }
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("macros", &self.macros.len())
            .finish_non_exhaustive()
    }
}
