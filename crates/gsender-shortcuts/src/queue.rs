//! Action queue between shortcut handlers and the dispatcher
//!
//! Handlers must not block, so a matched shortcut only enqueues its action;
//! the dispatcher drains the receiving end on the async side.

use crate::registry::Binding;
use gsender_core::{Action, QueuedAction};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Sending half of the action channel
#[derive(Debug, Clone)]
pub struct ActionQueue {
    sender: UnboundedSender<QueuedAction>,
}

impl ActionQueue {
    /// Create a queue and the receiver the dispatcher drains
    pub fn channel() -> (Self, UnboundedReceiver<QueuedAction>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Enqueue an action. Returns false once the receiver is gone.
    pub fn push(&self, shortcut_id: &str, action: Action) -> bool {
        let queued = QueuedAction {
            shortcut_id: shortcut_id.to_string(),
            action,
        };
        match self.sender.send(queued) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(shortcut_id, action = %e.0.action, "Action queue closed");
                false
            }
        }
    }

    /// A binding whose keydown enqueues `action` for `shortcut_id`
    pub fn binding(&self, shortcut_id: impl Into<String>, action: Action) -> Binding {
        let queue = self.clone();
        let shortcut_id = shortcut_id.into();
        Binding::on_keydown(move |_| {
            queue.push(&shortcut_id, action.clone());
        })
    }
}
