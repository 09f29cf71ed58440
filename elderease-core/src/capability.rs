//! Capabilities the event screen borrows from its host: picking a location,
//! showing a notice, asking for confirmation.

use std::fmt;

use crate::event::Coordinates;

/// What the location picker reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSelection {
    pub address: String,
    /// `None` when the address couldn't be geocoded
    pub coordinates: Option<Coordinates>,
}

impl LocationSelection {
    pub fn address(address: &str) -> Self {
        LocationSelection {
            address: address.to_string(),
            coordinates: None,
        }
    }

    pub fn with_coordinates(address: &str, coordinates: Coordinates) -> Self {
        LocationSelection {
            address: address.to_string(),
            coordinates: Some(coordinates),
        }
    }
}

pub trait LocationPicker {
    /// Let the user choose a location, starting from `initial` if set.
    /// `None` means the picker was dismissed without a choice.
    fn pick(&mut self, initial: Option<&LocationSelection>) -> Option<LocationSelection>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Destructive,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(message: &str) -> Self {
        Notice {
            title: "Success".to_string(),
            message: message.to_string(),
            severity: Severity::Normal,
        }
    }

    pub fn error(message: &str) -> Self {
        Notice {
            title: "Error".to_string(),
            message: message.to_string(),
            severity: Severity::Destructive,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Fire-and-forget user notification.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Collects notices instead of showing them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Always gives the same answer.
pub struct FixedConfirmer(pub bool);

impl Confirmer for FixedConfirmer {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}
