//! The create/edit event form.
//!
//! One set of fields, two workflows. The state is a tagged variant so the
//! fields of an edit can never leak into a create (or the other way round):
//! every transition back to `Idle` drops the field bundle.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::capability::LocationSelection;
use crate::error::{ElderEaseError, ElderEaseResult, RequiredField};
use crate::event::{Coordinates, DEFAULT_MAX_ATTENDEES, EventPatch, EventRecord};
use crate::slot::Slot;
use crate::store::EventStore;

/// Values currently typed into the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    max_attendees: u32,
}

impl Default for FormFields {
    fn default() -> Self {
        FormFields {
            title: String::new(),
            description: String::new(),
            date: String::new(),
            time: String::new(),
            location: String::new(),
            coordinates: None,
            max_attendees: DEFAULT_MAX_ATTENDEES,
        }
    }
}

impl FormFields {
    pub fn from_record(record: &EventRecord) -> Self {
        FormFields {
            title: record.title.clone(),
            description: record.description.clone(),
            date: record.date.clone(),
            time: record.time.clone(),
            location: record.location.clone(),
            coordinates: record.coordinates,
            max_attendees: record.max_attendees.max(1),
        }
    }

    pub fn max_attendees(&self) -> u32 {
        self.max_attendees
    }

    /// Capacity is at least one; zero is raised to one.
    pub fn set_max_attendees(&mut self, max: u32) {
        self.max_attendees = max.max(1);
    }

    /// Required fields that are blank after trimming, in form order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        [
            (RequiredField::Title, &self.title),
            (RequiredField::Description, &self.description),
            (RequiredField::Date, &self.date),
            (RequiredField::Time, &self.time),
            (RequiredField::Location, &self.location),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn validate(&self) -> ElderEaseResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ElderEaseError::Validation(missing))
        }
    }

    pub fn to_patch(&self) -> EventPatch {
        EventPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            location: self.location.clone(),
            coordinates: self.coordinates,
            max_attendees: self.max_attendees,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Creating(FormFields),
    Editing {
        target_id: String,
        fields: FormFields,
    },
}

/// What a successful submit did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(String),
    /// `false` when the edited event had disappeared from the store.
    Updated { id: String, found: bool },
}

const MAX_ID_ATTEMPTS: u32 = 100;

/// Who is creating events and how ids and timestamps are produced.
pub struct SubmitContext {
    pub created_by: String,
    id_source: Box<dyn FnMut() -> String>,
    clock: Box<dyn FnMut() -> DateTime<Utc>>,
}

impl SubmitContext {
    /// Time-ordered UUIDs and the system clock.
    pub fn new(created_by: &str) -> Self {
        SubmitContext {
            created_by: created_by.to_string(),
            id_source: Box::new(|| Uuid::now_v7().to_string()),
            clock: Box::new(Utc::now),
        }
    }

    pub fn with_id_source(mut self, ids: impl FnMut() -> String + 'static) -> Self {
        self.id_source = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl FnMut() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// A fresh id that is not already used in `store`.
    fn next_id<S: Slot>(&mut self, store: &EventStore<S>) -> ElderEaseResult<String> {
        let mut attempts = 1;
        loop {
            let id = (self.id_source)();
            if !store.contains(&id) {
                return Ok(id);
            }
            if attempts == MAX_ID_ATTEMPTS {
                return Err(ElderEaseError::DuplicateId(id));
            }
            attempts += 1;
        }
    }
}

/// The form controller.
#[derive(Debug, Default)]
pub struct EventForm {
    state: FormState,
}

impl EventForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Idle)
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.state {
            FormState::Editing { target_id, .. } => Some(target_id),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&FormFields> {
        match &self.state {
            FormState::Idle => None,
            FormState::Creating(fields) | FormState::Editing { fields, .. } => Some(fields),
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut FormFields> {
        match &mut self.state {
            FormState::Idle => None,
            FormState::Creating(fields) | FormState::Editing { fields, .. } => Some(fields),
        }
    }

    pub fn open_create(&mut self) -> ElderEaseResult<()> {
        self.require_idle()?;
        self.state = FormState::Creating(FormFields::default());
        Ok(())
    }

    pub fn open_edit(&mut self, record: &EventRecord) -> ElderEaseResult<()> {
        self.require_idle()?;
        self.state = FormState::Editing {
            target_id: record.id.clone(),
            fields: FormFields::from_record(record),
        };
        Ok(())
    }

    /// Close the open dialog and discard its fields.
    pub fn cancel(&mut self) {
        self.state = FormState::Idle;
    }

    /// Take the picker's result as-is; coordinate ranges are not checked.
    pub fn select_location(&mut self, selection: LocationSelection) -> ElderEaseResult<()> {
        let fields = self.fields_mut().ok_or(ElderEaseError::NoOpenForm)?;
        fields.location = selection.address;
        fields.coordinates = selection.coordinates;
        Ok(())
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        self.fields().is_some_and(FormFields::is_complete)
    }

    /// Validate and hand the result to the store.
    ///
    /// A validation failure leaves both the form and the store untouched.
    /// Once validation passes the form closes, even when the store's write
    /// fails: the in-memory mutation has already been applied by then.
    pub fn submit<S: Slot>(
        &mut self,
        store: &mut EventStore<S>,
        ctx: &mut SubmitContext,
    ) -> ElderEaseResult<SubmitOutcome> {
        let new_id = match &self.state {
            FormState::Idle => return Err(ElderEaseError::NoOpenForm),
            FormState::Creating(fields) => {
                fields.validate()?;
                Some(ctx.next_id(store)?)
            }
            FormState::Editing { fields, .. } => {
                fields.validate()?;
                None
            }
        };

        match (std::mem::take(&mut self.state), new_id) {
            (FormState::Creating(fields), Some(id)) => {
                let record = EventRecord::create(
                    id.clone(),
                    fields.to_patch(),
                    &ctx.created_by,
                    (ctx.clock)(),
                );
                store.append(record)?;
                Ok(SubmitOutcome::Created(id))
            }
            (FormState::Editing { target_id, fields }, _) => {
                let found = store.update_by_id(&target_id, fields.to_patch())?;
                Ok(SubmitOutcome::Updated {
                    id: target_id,
                    found,
                })
            }
            _ => Err(ElderEaseError::NoOpenForm),
        }
    }

    fn require_idle(&self) -> ElderEaseResult<()> {
        if self.is_open() {
            return Err(ElderEaseError::FormBusy);
        }
        Ok(())
    }
}
