//! Shortcut registry
//!
//! Records live in a `Vec` (registration order) with an id index for
//! lookup. Handlers are kept apart from records so persisted records can be
//! loaded before, or without, the component that handles them.
//!
//! The registry is single-threaded: handlers are plain `FnMut` closures and
//! every key event runs against the current state before the next one.

use crate::error::{ShortcutError, ShortcutResult};
use crate::keys::{KeyCombo, KeyEvent};
use crate::record::{ShortcutRecord, ShortcutSpec};
use serde::Serialize;
use std::collections::HashMap;

/// Which edge of a key press is being dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Down,
    Up,
}

/// Handler invoked on a match; `None` when triggered by id
pub type Handler = Box<dyn FnMut(Option<&KeyEvent>)>;

/// Keydown/keyup handlers for one shortcut
#[derive(Default)]
pub struct Binding {
    keydown: Option<Handler>,
    keyup: Option<Handler>,
}

impl Binding {
    /// A binding with no handlers
    pub fn none() -> Self {
        Self::default()
    }

    /// A binding that only reacts to key presses
    pub fn on_keydown<F>(handler: F) -> Self
    where
        F: FnMut(Option<&KeyEvent>) + 'static,
    {
        Self {
            keydown: Some(Box::new(handler)),
            keyup: None,
        }
    }

    pub fn with_keyup<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Option<&KeyEvent>) + 'static,
    {
        self.keyup = Some(Box::new(handler));
        self
    }

    fn handler(&mut self, phase: KeyPhase) -> Option<&mut Handler> {
        match phase {
            KeyPhase::Down => self.keydown.as_mut(),
            KeyPhase::Up => self.keyup.as_mut(),
        }
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("keydown", &self.keydown.is_some())
            .field("keyup", &self.keyup.is_some())
            .finish()
    }
}

/// An in-progress key capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Shortcut being edited
    pub target: String,
    /// Combination captured so far, if any
    pub combo: Option<KeyCombo>,
    /// Other shortcuts already holding `combo`
    pub conflicts: Vec<String>,
}

/// Edit-mode state shared by every shortcut
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryState {
    /// While set, nothing dispatches
    pub editing: bool,
    pub capture: Option<Capture>,
}

/// Which shortcuts a conflict check considers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConflictScope {
    All,
    Active,
}

/// Registered shortcuts and their handlers
#[derive(Default)]
pub struct ShortcutRegistry {
    records: Vec<ShortcutRecord>,
    index: HashMap<String, usize>,
    bindings: HashMap<String, Binding>,
    state: RegistryState,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or refresh a shortcut.
    ///
    /// Metadata and handlers are replaced. An existing record keeps its
    /// `currentKeys` and `isActive`. A new shortcut whose default keys are
    /// held by another active shortcut is registered unbound; the holders
    /// are returned.
    pub fn register(&mut self, spec: ShortcutSpec, binding: Binding) -> Vec<String> {
        let id = spec.id.clone();
        let mut holders = Vec::new();
        match self.index.get(&id) {
            Some(&i) => {
                let record = &mut self.records[i];
                record.title = spec.title;
                record.description = spec.description;
                record.default_keys = spec.default_keys;
                record.category = spec.category;
                tracing::debug!(shortcut_id = %id, "Shortcut re-registered");
            }
            None => {
                let mut record = spec.into_record();
                holders = self.conflicts(&id, &record.combo(), ConflictScope::Active);
                if !holders.is_empty() {
                    tracing::warn!(shortcut_id = %id, keys = %record.current_keys, ?holders, "Default keys taken, registering unbound");
                    record.current_keys.clear();
                }
                self.insert(record);
                tracing::debug!(shortcut_id = %id, "Shortcut registered");
            }
        }
        self.bindings.insert(id, binding);
        holders
    }

    /// Seed records from persistence.
    ///
    /// Already registered shortcuts take the stored `currentKeys` and
    /// `isActive`; unknown ones are added without handlers. Where several
    /// active shortcuts end up on one combination the first in registration
    /// order keeps it and the rest are unbound. Returns the number of
    /// records loaded.
    pub fn load(&mut self, records: Vec<ShortcutRecord>) -> usize {
        let count = records.len();
        for stored in records {
            match self.index.get(&stored.id) {
                Some(&i) => {
                    let record = &mut self.records[i];
                    record.current_keys = stored.current_keys;
                    record.is_active = stored.is_active;
                }
                None => self.insert(stored),
            }
        }

        for collision in active_collisions(&self.records) {
            for id in collision.ids.iter().skip(1) {
                if let Some(&i) = self.index.get(id) {
                    self.records[i].current_keys.clear();
                }
            }
            tracing::warn!(keys = %collision.keys, owner = %collision.ids[0], unbound = ?&collision.ids[1..], "Stored shortcuts share keys");
        }
        tracing::debug!(count, "Shortcut records loaded");
        count
    }

    pub fn get(&self, id: &str) -> Option<&ShortcutRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot sorted by category, then title
    pub fn records(&self) -> Vec<ShortcutRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.title.cmp(&b.title)));
        records
    }

    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state.editing
    }

    /// Run the handlers of every active shortcut bound to `event`.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&mut self, event: &KeyEvent, phase: KeyPhase) -> usize {
        if self.state.editing {
            return 0;
        }
        let combo = KeyCombo::from_event(event);
        if combo.is_unbound() {
            return 0;
        }

        let mut invoked = 0;
        for record in self.records.iter().filter(|r| r.is_active) {
            if record.combo() != combo {
                continue;
            }
            if let Some(handler) = self.bindings.get_mut(&record.id).and_then(|b| b.handler(phase)) {
                tracing::trace!(shortcut_id = %record.id, %combo, ?phase, "Shortcut matched");
                handler(Some(event));
                invoked += 1;
            }
        }
        invoked
    }

    /// Invoke a shortcut's handler by id. Returns whether a handler ran.
    ///
    /// Inactive and unbound shortcuts do not run, matching [`dispatch`](Self::dispatch).
    pub fn trigger(&mut self, id: &str, phase: KeyPhase) -> bool {
        if self.state.editing {
            return false;
        }
        let runnable = self.get(id).is_some_and(|r| r.is_active && !r.combo().is_unbound());
        if !runnable {
            tracing::debug!(shortcut_id = %id, "Shortcut inactive or unbound, not triggered");
            return false;
        }
        match self.bindings.get_mut(id).and_then(|b| b.handler(phase)) {
            Some(handler) => {
                handler(None);
                true
            }
            None => false,
        }
    }

    /// Enter edit mode for `id`; all dispatch is suspended
    pub fn start_capturing(&mut self, id: &str) -> ShortcutResult<()> {
        if !self.contains(id) {
            return Err(ShortcutError::Unknown(id.to_string()));
        }
        self.state = RegistryState {
            editing: true,
            capture: Some(Capture {
                target: id.to_string(),
                combo: None,
                conflicts: Vec::new(),
            }),
        };
        tracing::debug!(shortcut_id = %id, "Capturing shortcut");
        Ok(())
    }

    /// Offer a key event to the capture.
    ///
    /// Modifier-only and ignored keys are skipped, as is anything after the
    /// first captured combination. Returns the combination when one is
    /// captured by this call.
    pub fn capture_key(&mut self, event: &KeyEvent) -> ShortcutResult<Option<KeyCombo>> {
        let target = match &self.state.capture {
            Some(capture) if self.state.editing => {
                if capture.combo.is_some() {
                    return Ok(None);
                }
                capture.target.clone()
            }
            _ => return Err(ShortcutError::NotCapturing),
        };
        if event.is_modifier() || event.is_ignored() {
            return Ok(None);
        }

        let combo = KeyCombo::from_event(event);
        if combo.is_unbound() {
            return Ok(None);
        }
        let conflicts = self.conflicts(&target, &combo, ConflictScope::All);
        if let Some(capture) = self.state.capture.as_mut() {
            capture.combo = Some(combo.clone());
            capture.conflicts = conflicts;
        }
        Ok(Some(combo))
    }

    /// Leave edit mode without changing anything
    pub fn cancel_capturing(&mut self) {
        self.state = RegistryState::default();
    }

    /// Save the captured combination and leave edit mode.
    ///
    /// With conflicts nothing changes and edit mode stays on.
    pub fn commit_captured(&mut self) -> ShortcutResult<KeyCombo> {
        let capture = match &self.state.capture {
            Some(capture) if self.state.editing => capture,
            _ => return Err(ShortcutError::NotCapturing),
        };
        let combo = capture.combo.clone().ok_or(ShortcutError::NothingCaptured)?;
        if !capture.conflicts.is_empty() {
            return Err(ShortcutError::Conflict {
                ids: capture.conflicts.clone(),
            });
        }

        let target = capture.target.clone();
        self.record_mut(&target)?.current_keys = combo.to_string();
        self.state = RegistryState::default();
        tracing::info!(shortcut_id = %target, %combo, "Shortcut keys saved");
        Ok(combo)
    }

    /// Bind `id` to `keys` directly; an empty string unbinds it
    pub fn update_keys(&mut self, id: &str, keys: &str) -> ShortcutResult<KeyCombo> {
        if !self.contains(id) {
            return Err(ShortcutError::Unknown(id.to_string()));
        }
        let combo = KeyCombo::parse(keys);
        let conflicts = self.conflicts(id, &combo, ConflictScope::All);
        if !conflicts.is_empty() {
            tracing::debug!(shortcut_id = %id, %combo, ?conflicts, "Shortcut keys conflict");
            return Err(ShortcutError::Conflict { ids: conflicts });
        }

        self.record_mut(id)?.current_keys = combo.to_string();
        tracing::info!(shortcut_id = %id, %combo, "Shortcut keys saved");
        Ok(combo)
    }

    /// Enable or disable a shortcut
    ///
    /// Enabling fails if another active shortcut holds the same keys.
    pub fn set_active(&mut self, id: &str, active: bool) -> ShortcutResult<()> {
        let combo = self
            .get(id)
            .map(ShortcutRecord::combo)
            .ok_or_else(|| ShortcutError::Unknown(id.to_string()))?;
        if active {
            let conflicts = self.conflicts(id, &combo, ConflictScope::Active);
            if !conflicts.is_empty() {
                return Err(ShortcutError::Conflict { ids: conflicts });
            }
        }
        self.record_mut(id)?.is_active = active;
        tracing::info!(shortcut_id = %id, active, "Shortcut activation changed");
        Ok(())
    }

    /// Restore the default keys of `id`.
    ///
    /// Other shortcuts holding the default combination are unbound; their
    /// ids are returned.
    pub fn reset(&mut self, id: &str) -> ShortcutResult<Vec<String>> {
        let default_combo = self
            .get(id)
            .map(ShortcutRecord::default_combo)
            .ok_or_else(|| ShortcutError::Unknown(id.to_string()))?;

        let displaced = self.conflicts(id, &default_combo, ConflictScope::All);
        for other in &displaced {
            self.record_mut(other)?.current_keys.clear();
        }

        let record = self.record_mut(id)?;
        record.current_keys = record.default_keys.clone();
        if self.state.capture.as_ref().is_some_and(|c| c.target == id) {
            self.state = RegistryState::default();
        }

        tracing::info!(shortcut_id = %id, ?displaced, "Shortcut reset");
        Ok(displaced)
    }

    /// Restore the default keys of every shortcut and leave edit mode
    pub fn reset_all(&mut self) {
        for record in &mut self.records {
            record.current_keys = record.default_keys.clone();
        }
        self.state = RegistryState::default();
        tracing::info!(count = self.records.len(), "All shortcuts reset");
    }

    /// Ids of other shortcuts bound to `keys`
    pub fn find_conflicts(&self, id: &str, keys: &str) -> Vec<String> {
        self.conflicts(id, &KeyCombo::parse(keys), ConflictScope::All)
    }

    fn conflicts(&self, id: &str, combo: &KeyCombo, scope: ConflictScope) -> Vec<String> {
        if combo.is_unbound() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.id != id)
            .filter(|r| scope == ConflictScope::All || r.is_active)
            .filter(|r| r.combo() == *combo)
            .map(|r| r.id.clone())
            .collect()
    }

    fn insert(&mut self, record: ShortcutRecord) {
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
    }

    fn record_mut(&mut self, id: &str) -> ShortcutResult<&mut ShortcutRecord> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| ShortcutError::Unknown(id.to_string()))?;
        Ok(&mut self.records[i])
    }
}

/// Active shortcuts sharing one combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    /// The shared normalized combination
    pub keys: KeyCombo,
    /// Holders in record order
    pub ids: Vec<String>,
}

/// Combinations held by more than one active shortcut in `records`, in
/// order of first appearance
pub fn active_collisions(records: &[ShortcutRecord]) -> Vec<Collision> {
    let mut holders: Vec<Collision> = Vec::new();
    for record in records.iter().filter(|r| r.is_active) {
        let combo = record.combo();
        if combo.is_unbound() {
            continue;
        }
        match holders.iter_mut().find(|c| c.keys == combo) {
            Some(existing) => existing.ids.push(record.id.clone()),
            None => holders.push(Collision {
                keys: combo,
                ids: vec![record.id.clone()],
            }),
        }
    }
    holders.retain(|c| c.ids.len() > 1);
    holders
}

impl std::fmt::Debug for ShortcutRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutRegistry")
            .field("records", &self.records.len())
            .field("bindings", &self.bindings.len())
            .field("state", &self.state)
            .finish()
    }
}
