//! Action handlers for the events screen.
//!
//! `EventBoard` ties the store, the form and the host capabilities together.
//! Every submit or delete ends in exactly one notice (or none, when the user
//! backs out of a delete); errors stop here and are never returned.

use tracing::{info, warn};

use crate::capability::{Confirmer, LocationPicker, LocationSelection, Notice, Notifier};
use crate::error::{ElderEaseError, ElderEaseResult};
use crate::form::{EventForm, SubmitContext, SubmitOutcome};
use crate::slot::Slot;
use crate::store::EventStore;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this event?";

pub struct EventBoard<S: Slot> {
    store: EventStore<S>,
    form: EventForm,
    ctx: SubmitContext,
}

impl<S: Slot> EventBoard<S> {
    pub fn new(store: EventStore<S>, ctx: SubmitContext) -> Self {
        EventBoard {
            store,
            form: EventForm::new(),
            ctx,
        }
    }

    pub fn store(&self) -> &EventStore<S> {
        &self.store
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    pub fn open_create(&mut self) -> ElderEaseResult<()> {
        self.form.open_create()
    }

    /// Open the edit dialog for `id`. Returns `false` if there is no such event.
    pub fn open_edit(&mut self, id: &str) -> ElderEaseResult<bool> {
        let Some(record) = self.store.get(id) else {
            return Ok(false);
        };
        self.form.open_edit(record)?;
        Ok(true)
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    /// Run the location picker against the open form.
    /// Returns `false` if the picker was dismissed.
    pub fn pick_location(&mut self, picker: &mut dyn LocationPicker) -> ElderEaseResult<bool> {
        let fields = self.form.fields().ok_or(ElderEaseError::NoOpenForm)?;
        let initial = (!fields.location.trim().is_empty()).then(|| LocationSelection {
            address: fields.location.clone(),
            coordinates: fields.coordinates,
        });

        match picker.pick(initial.as_ref()) {
            Some(selection) => {
                self.form.select_location(selection)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Submit the open form and report the result.
    pub fn submit(&mut self, notifier: &mut dyn Notifier) -> Option<SubmitOutcome> {
        let editing = self.form.editing_id().is_some();

        match self.form.submit(&mut self.store, &mut self.ctx) {
            Ok(outcome) => {
                let message = match &outcome {
                    SubmitOutcome::Created(id) => {
                        info!(id = %id, "Event created");
                        "Event created successfully"
                    }
                    SubmitOutcome::Updated { id, .. } => {
                        info!(id = %id, "Event updated");
                        "Event updated successfully"
                    }
                };
                notifier.notify(Notice::success(message));
                Some(outcome)
            }
            Err(e) => {
                let fallback = if editing {
                    "Could not update event"
                } else {
                    "Could not create event"
                };
                notifier.notify(failure_notice(&e, fallback));
                None
            }
        }
    }

    /// Delete `id` once the user confirms. Returns whether an event was removed.
    pub fn delete(
        &mut self,
        id: &str,
        confirmer: &mut dyn Confirmer,
        notifier: &mut dyn Notifier,
    ) -> bool {
        if !confirmer.confirm(DELETE_PROMPT) {
            return false;
        }

        match self.store.remove_by_id(id) {
            Ok(removed) => {
                if removed {
                    info!(id, "Event deleted");
                }
                notifier.notify(Notice::success("Event deleted successfully"));
                removed
            }
            Err(e) => {
                notifier.notify(failure_notice(&e, "Could not delete event"));
                false
            }
        }
    }
}

fn failure_notice(error: &ElderEaseError, fallback: &str) -> Notice {
    match error {
        ElderEaseError::Validation(_) => Notice::error("Please fill in all required fields"),
        ElderEaseError::PersistenceWrite(_) | ElderEaseError::Serialization(_) => {
            warn!("{fallback}: {error}");
            Notice::error(fallback)
        }
        other => Notice::error(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{FixedConfirmer, RecordingNotifier, Severity};
    use crate::event::Coordinates;
    use crate::slot::MemorySlot;

    struct ScriptedPicker {
        answer: Option<LocationSelection>,
        seen: Option<LocationSelection>,
    }

    impl LocationPicker for ScriptedPicker {
        fn pick(&mut self, initial: Option<&LocationSelection>) -> Option<LocationSelection> {
            self.seen = initial.cloned();
            self.answer.clone()
        }
    }

    fn board(slot: &MemorySlot) -> EventBoard<&MemorySlot> {
        EventBoard::new(EventStore::load(slot), SubmitContext::new("current-user"))
    }

    fn fill_bingo(board: &mut EventBoard<&MemorySlot>) {
        let fields = board.form_mut().fields_mut().unwrap();
        fields.title = "Bingo Night".to_string();
        fields.description = "Weekly bingo".to_string();
        fields.date = "2025-06-01".to_string();
        fields.time = "18:00".to_string();
        fields.location = "Community Hall".to_string();
    }

    fn create_bingo(board: &mut EventBoard<&MemorySlot>) -> String {
        let mut notifier = RecordingNotifier::default();
        board.open_create().unwrap();
        fill_bingo(board);
        match board.submit(&mut notifier) {
            Some(SubmitOutcome::Created(id)) => id,
            other => panic!("expected a created event, got {other:?}"),
        }
    }

    #[test]
    fn bingo_night_lifecycle() {
        let slot = MemorySlot::new();
        let mut board = board(&slot);
        let mut notifier = RecordingNotifier::default();

        board.open_create().unwrap();
        fill_bingo(&mut board);
        let Some(SubmitOutcome::Created(id)) = board.submit(&mut notifier) else {
            panic!("create failed");
        };
        assert_eq!(board.store().len(), 1);
        let created = board.store().events()[0].clone();
        assert!(created.attendees.is_empty());
        assert!(created.join_requests.is_empty());
        assert_eq!(created.max_attendees, 50);

        assert!(board.open_edit(&id).unwrap());
        board
            .form_mut()
            .fields_mut()
            .unwrap()
            .set_max_attendees(30);
        board.submit(&mut notifier).unwrap();

        assert_eq!(board.store().len(), 1);
        let mut expected = created.clone();
        expected.max_attendees = 30;
        assert_eq!(board.store().events()[0], expected);

        assert!(board.delete(&id, &mut FixedConfirmer(true), &mut notifier));
        assert!(board.store().is_empty());
        assert!(EventStore::load(&slot).is_empty());

        let messages: Vec<_> = notifier.notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Event created successfully",
                "Event updated successfully",
                "Event deleted successfully",
            ]
        );
    }

    #[test]
    fn incomplete_form_shows_required_fields_notice() {
        let slot = MemorySlot::new();
        let mut board = board(&slot);
        let mut notifier = RecordingNotifier::default();

        board.open_create().unwrap();
        board.form_mut().fields_mut().unwrap().title = "Bingo Night".to_string();

        assert!(board.submit(&mut notifier).is_none());
        assert_eq!(
            notifier.notices,
            vec![Notice::error("Please fill in all required fields")]
        );
        assert!(board.store().is_empty());
        assert!(board.form().is_open());
    }

    #[test]
    fn write_failure_shows_generic_notice() {
        let slot = MemorySlot::new();
        let mut board = board(&slot);
        let mut notifier = RecordingNotifier::default();
        slot.set_fail_writes(true);

        board.open_create().unwrap();
        fill_bingo(&mut board);
        assert!(board.submit(&mut notifier).is_none());

        assert_eq!(notifier.notices, vec![Notice::error("Could not create event")]);
        assert_eq!(notifier.notices[0].severity, Severity::Destructive);
        assert_eq!(board.store().len(), 1);
        assert!(slot.contents().is_none());
    }

    #[test]
    fn failed_update_names_the_update() {
        let slot = MemorySlot::new();
        let mut board = board(&slot);
        let mut notifier = RecordingNotifier::default();
        let id = create_bingo(&mut board);

        slot.set_fail_writes(true);
        board.open_edit(&id).unwrap();
        board.submit(&mut notifier);

        assert_eq!(notifier.notices, vec![Notice::error("Could not update event")]);
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let slot = MemorySlot::new();
        let mut board = board(&slot);
        let mut notifier = RecordingNotifier::default();
        let id = create_bingo(&mut board);
        let writes = slot.write_count();

        assert!(!board.delete(&id, &mut FixedConfirmer(false), &mut notifier));

        assert_eq!(board.store().len(), 1);
        assert!(notifier.notices.is_empty());
        assert_eq!(slot.write_count(), writes);
    }

    #[test]
    fn deleting_unknown_id_leaves_collection() {
        let slot = MemorySlot::new();
        let mut board = board(&slot);
        let mut notifier = RecordingNotifier::default();
        create_bingo(&mut board);

        assert!(!board.delete("nope", &mut FixedConfirmer(true), &mut notifier));
        assert_eq!(board.store().len(), 1);
    }

    #[test]
    fn open_edit_unknown_id() {
        let slot = MemorySlot::new();
        let mut board = board(&slot);

        assert!(!board.open_edit("nope").unwrap());
        assert!(!board.form().is_open());
    }

    #[test]
    fn picker_starts_from_current_location() {
        let slot = MemorySlot::new();
        let mut board = board(&slot);
        let id = create_bingo(&mut board);
        board.open_edit(&id).unwrap();

        let mut picker = ScriptedPicker {
            answer: Some(LocationSelection::with_coordinates(
                "Lake Street Garden",
                Coordinates::new(44.9483, -93.2624),
            )),
            seen: None,
        };
        assert!(board.pick_location(&mut picker).unwrap());

        assert_eq!(picker.seen, Some(LocationSelection::address("Community Hall")));
        let fields = board.form().fields().unwrap();
        assert_eq!(fields.location, "Lake Street Garden");
        assert_eq!(fields.coordinates, Some(Coordinates::new(44.9483, -93.2624)));
    }

    #[test]
    fn dismissed_picker_keeps_location() {
        let slot = MemorySlot::new();
        let mut board = board(&slot);
        board.open_create().unwrap();

        let mut picker = ScriptedPicker {
            answer: None,
            seen: None,
        };
        assert!(!board.pick_location(&mut picker).unwrap());
        assert_eq!(picker.seen, None);
        assert_eq!(board.form().fields().unwrap().location, "");
    }
}
