//! The event store: the authoritative in-memory event list, mirrored to a slot.
//!
//! A store can only be obtained through [`EventStore::load`], so the initial
//! read always happens before the first write. A save of an empty default
//! list can therefore never clobber events that were already persisted.

use std::collections::HashSet;

use tracing::{debug, error, warn};

use crate::error::{ElderEaseError, ElderEaseResult};
use crate::event::{EventPatch, EventRecord};
use crate::slot::Slot;

pub struct EventStore<S: Slot> {
    slot: S,
    events: Vec<EventRecord>,
    save_retries: u32,
}

impl<S: Slot> EventStore<S> {
    /// Read the slot once. Missing, unreadable or unparsable contents all
    /// load as an empty collection; the failure is logged, never returned.
    pub fn load(slot: S) -> Self {
        let events = match slot.read() {
            Ok(Some(contents)) => parse_events(&contents).unwrap_or_else(|e| {
                warn!("Ignoring stored events: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load events: {e}");
                Vec::new()
            }
        };

        debug!(count = events.len(), "Loaded events");

        EventStore {
            slot,
            events,
            save_retries: 0,
        }
    }

    /// Retry a failed save this many extra times before giving up.
    pub fn with_save_retries(mut self, retries: u32) -> Self {
        self.save_retries = retries;
        self
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Adopt `events` as the collection and write all of it to the slot.
    ///
    /// A list with a repeated id is refused before anything changes. On a
    /// write failure the in-memory list is still replaced; memory and
    /// storage stay out of step until the next successful save.
    pub fn replace_all(&mut self, events: Vec<EventRecord>) -> ElderEaseResult<()> {
        if let Some(id) = first_duplicate_id(&events) {
            return Err(ElderEaseError::DuplicateId(id.to_string()));
        }

        self.commit(events)
    }

    /// Fails with `DuplicateId` (and writes nothing) if the id is taken.
    pub fn append(&mut self, record: EventRecord) -> ElderEaseResult<()> {
        if self.contains(&record.id) {
            return Err(ElderEaseError::DuplicateId(record.id));
        }

        let events = appended(&self.events, record);
        self.commit(events)
    }

    /// Returns `false` (and writes nothing) if no event has this id.
    pub fn update_by_id(&mut self, id: &str, patch: EventPatch) -> ElderEaseResult<bool> {
        if !self.contains(id) {
            debug!(id, "Update target not found");
            return Ok(false);
        }

        let events = updated(&self.events, id, patch);
        self.commit(events)?;
        Ok(true)
    }

    /// Returns `false` (and writes nothing) if no event has this id.
    pub fn remove_by_id(&mut self, id: &str) -> ElderEaseResult<bool> {
        if !self.contains(id) {
            debug!(id, "Delete target not found");
            return Ok(false);
        }

        let events = removed(&self.events, id);
        self.commit(events)?;
        Ok(true)
    }

    // Ids arriving through `load` are taken as stored, so only new ids are
    // checked on the way in.
    fn commit(&mut self, events: Vec<EventRecord>) -> ElderEaseResult<()> {
        self.events = events;
        self.save()
    }

    fn save(&self) -> ElderEaseResult<()> {
        let contents = serde_json::to_string_pretty(&self.events)
            .map_err(|e| ElderEaseError::Serialization(e.to_string()))?;

        let mut attempt = 0;
        loop {
            match self.slot.write(&contents) {
                Ok(()) => {
                    debug!(count = self.events.len(), "Saved events");
                    return Ok(());
                }
                Err(e) if attempt < self.save_retries => {
                    attempt += 1;
                    warn!(attempt, "Retrying event save: {e}");
                }
                Err(e) => {
                    error!("Failed to save events: {e}");
                    return Err(e);
                }
            }
        }
    }
}

fn first_duplicate_id(events: &[EventRecord]) -> Option<&str> {
    let mut seen = HashSet::new();
    events
        .iter()
        .map(|e| e.id.as_str())
        .find(|id| !seen.insert(*id))
}

/// Decode the slot's JSON array.
pub fn parse_events(contents: &str) -> ElderEaseResult<Vec<EventRecord>> {
    serde_json::from_str(contents).map_err(|e| ElderEaseError::PersistenceRead(e.to_string()))
}

// =============================================================================
// Pure list transformations
// =============================================================================

pub fn appended(events: &[EventRecord], record: EventRecord) -> Vec<EventRecord> {
    let mut next = events.to_vec();
    next.push(record);
    next
}

pub fn updated(events: &[EventRecord], id: &str, patch: EventPatch) -> Vec<EventRecord> {
    events
        .iter()
        .cloned()
        .map(|mut e| {
            if e.id == id {
                e.apply(patch.clone());
            }
            e
        })
        .collect()
}

pub fn removed(events: &[EventRecord], id: &str) -> Vec<EventRecord> {
    events.iter().filter(|e| e.id != id).cloned().collect()
}
