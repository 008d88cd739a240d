//! # gSender Macros
//!
//! Macro and program-event records with their CRUD services, the two-column
//! macro layout, list paging, and the dispatcher that sends macros and
//! shortcut actions to the controller.

pub mod dispatcher;
pub mod events;
pub mod layout;
pub mod paging;
pub mod record;
pub mod service;
mod stored;

pub use dispatcher::{ActionDispatcher, MacroBackend};
pub use events::{EventPatch, EventRecord, EventService, EventTrigger, NewEvent};
pub use layout::{column_sizes, next_placement, reorder, MacroMove};
pub use paging::{paginate, Listing, Pagination, Paging, DEFAULT_PAGE_LENGTH};
pub use record::{Column, MacroPatch, MacroRecord, NewMacro};
pub use service::MacroService;
