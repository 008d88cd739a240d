//! # Event Bus Module
//!
//! Publish/subscribe channel for record change notifications.
//!
//! Stores and services publish typed change events. Handlers pick the
//! categories they care about; tokio tasks poll a broadcast receiver.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gsender_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, MacroEvent};
//!
//! let bus = EventBus::new();
//! bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Macro]),
//!     |event| tracing::debug!("{}", event.description()),
//! );
//!
//! bus.publish(AppEvent::Macro(MacroEvent::Created { id: "m1".into() }));
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
