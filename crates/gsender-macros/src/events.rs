//! Program event records
//!
//! An event record binds command text to a controller program event
//! (`gcode:start`, `feedhold`, ...). The service mirrors [`MacroService`]
//! without the layout fields.
//!
//! [`MacroService`]: crate::MacroService

use crate::paging::{paginate, Listing, Paging};
use crate::stored::{self, Loaded};
use gsender_core::clock::{self, next_mtime};
use gsender_core::{AppEvent, Error, ProgramEventChange, Result};
use gsender_store::{keys, ConfigStore, RecordCollection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const ENTITY: &str = "event";

/// Where a program event originates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTrigger {
    Gcode,
    System,
}

impl EventTrigger {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "gcode" => Some(Self::Gcode),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gcode => write!(f, "gcode"),
            Self::System => write!(f, "system"),
        }
    }
}

/// A stored program event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub mtime: i64,
    /// Program event name
    pub event: String,
    pub trigger: EventTrigger,
    /// Command text run when the event fires
    pub commands: String,
    pub enabled: bool,
}

/// Fields accepted when creating an event
///
/// `trigger` arrives as free text so an empty value is reported as a
/// missing field rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewEvent {
    pub event: String,
    pub trigger: String,
    pub commands: String,
    pub enabled: Option<bool>,
}

impl NewEvent {
    pub fn new(event: impl Into<String>, trigger: EventTrigger, commands: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            trigger: trigger.to_string(),
            commands: commands.into(),
            enabled: None,
        }
    }
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPatch {
    pub event: Option<String>,
    pub trigger: Option<EventTrigger>,
    pub commands: Option<String>,
    pub enabled: Option<bool>,
}

impl EventPatch {
    pub fn apply(self, record: &mut EventRecord) {
        if let Some(event) = self.event {
            record.event = event;
        }
        if let Some(trigger) = self.trigger {
            record.trigger = trigger;
        }
        if let Some(commands) = self.commands {
            record.commands = commands;
        }
        if let Some(enabled) = self.enabled {
            record.enabled = enabled;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct StoredEvent {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    mtime: Option<i64>,
    #[serde(default)]
    event: String,
    #[serde(default)]
    trigger: Option<EventTrigger>,
    #[serde(default)]
    commands: String,
    #[serde(default)]
    enabled: Option<bool>,
}

fn normalize_event(stored: StoredEvent, now: i64) -> (EventRecord, bool) {
    let mut changed = false;
    let id = match stored.id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            changed = true;
            Uuid::new_v4().to_string()
        }
    };
    let enabled = stored.enabled.unwrap_or_else(|| {
        changed = true;
        true
    });
    let mtime = stored.mtime.unwrap_or_else(|| {
        changed = true;
        now
    });
    let trigger = stored.trigger.unwrap_or_else(|| {
        changed = true;
        EventTrigger::Gcode
    });

    let record = EventRecord {
        id,
        mtime,
        event: stored.event,
        trigger,
        commands: stored.commands,
        enabled,
    };
    (record, changed)
}

/// CRUD operations over the `events` collection
#[derive(Debug, Clone)]
pub struct EventService {
    events: RecordCollection<EventRecord>,
}

impl EventService {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self {
            events: RecordCollection::new(store, keys::EVENTS),
        }
    }

    pub fn list(&self, paging: Option<Paging>) -> Result<Listing<EventRecord>> {
        let _guard = self.events.lock();
        Ok(paginate(self.load()?.records, paging))
    }

    /// Create an event; `event` then `trigger` must be non-empty
    pub fn create(&self, new: NewEvent) -> Result<EventRecord> {
        if new.event.trim().is_empty() {
            return Err(Error::empty_field("event"));
        }
        if new.trigger.trim().is_empty() {
            return Err(Error::empty_field("trigger"));
        }
        let trigger = EventTrigger::parse(&new.trigger).ok_or_else(|| {
            Error::BadRequest(format!("Unknown trigger \"{}\"", new.trigger.trim()))
        })?;

        let guard = self.events.lock();
        let Loaded {
            mut records,
            unreadable,
        } = self.load()?;
        let record = EventRecord {
            id: Uuid::new_v4().to_string(),
            mtime: clock::now_millis(),
            event: new.event,
            trigger,
            commands: new.commands,
            enabled: new.enabled.unwrap_or(true),
        };
        records.push(record.clone());

        stored::persist(&self.events, &records, &unreadable, "Failed to save event")?;
        drop(guard);
        tracing::info!(event_id = %record.id, event = %record.event, %trigger, "Event created");
        self.announce(ProgramEventChange::Created {
            id: record.id.clone(),
        });
        Ok(record)
    }

    pub fn read(&self, id: &str) -> Result<EventRecord> {
        let _guard = self.events.lock();
        self.load()?
            .records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found(ENTITY, id))
    }

    pub fn update(&self, id: &str, patch: EventPatch) -> Result<EventRecord> {
        let guard = self.events.lock();
        let Loaded {
            mut records,
            unreadable,
        } = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found(ENTITY, id))?;

        patch.apply(record);
        record.mtime = next_mtime(record.mtime);
        let updated = record.clone();

        stored::persist(&self.events, &records, &unreadable, "Failed to update event")?;
        drop(guard);
        tracing::info!(event_id = %id, "Event updated");
        self.announce(ProgramEventChange::Updated { id: id.to_string() });
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let guard = self.events.lock();
        let Loaded {
            mut records,
            unreadable,
        } = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(Error::not_found(ENTITY, id));
        }

        stored::persist(&self.events, &records, &unreadable, "Failed to delete event")?;
        drop(guard);
        tracing::info!(event_id = %id, "Event deleted");
        self.announce(ProgramEventChange::Deleted { id: id.to_string() });
        Ok(())
    }

    fn load(&self) -> Result<Loaded<EventRecord>> {
        let now = clock::now_millis();
        stored::load(&self.events, |stored: StoredEvent, _| normalize_event(stored, now))
    }

    fn announce(&self, change: ProgramEventChange) {
        self.events
            .store()
            .events()
            .publish(AppEvent::ProgramEvent(change));
    }
}
