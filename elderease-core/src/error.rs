//! Error types for the ElderEase event core.

use std::fmt;

use thiserror::Error;

/// A form field that must be filled in before an event can be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Description,
    Date,
    Time,
    Location,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredField::Title => "title",
            RequiredField::Description => "description",
            RequiredField::Date => "date",
            RequiredField::Time => "time",
            RequiredField::Location => "location",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur in ElderEase operations.
#[derive(Error, Debug)]
pub enum ElderEaseError {
    #[error("Missing required fields: {}", join_fields(.0))]
    Validation(Vec<RequiredField>),

    #[error("Could not read event storage: {0}")]
    PersistenceRead(String),

    #[error("Could not save events: {0}")]
    PersistenceWrite(String),

    #[error("Another event form is already open")]
    FormBusy,

    #[error("No event form is open")]
    NoOpenForm,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event id '{0}' is already in use")]
    DuplicateId(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for ElderEase operations.
pub type ElderEaseResult<T> = Result<T, ElderEaseError>;
