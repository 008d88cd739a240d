//! # gSender Core
//!
//! Core types shared by every gSender crate:
//! - the error taxonomy used by the record APIs
//! - the controller collaborator trait and its commands
//! - the actions shortcuts queue for the dispatcher
//! - the event bus used to announce record changes
//! - clock helpers for record modification times

pub mod action;
pub mod clock;
pub mod controller;
pub mod error;
pub mod event_bus;

pub use action::{Action, QueuedAction};

pub use controller::{Controller, ControllerCommand, MacroContext};

pub use error::{ControllerError, Error, Result};

pub use event_bus::{
    AppEvent, ConfigEvent, EventBus, EventCategory, EventFilter, MacroEvent, ProgramEventChange,
    ShortcutEvent,
};
