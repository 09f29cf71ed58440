//! Event record types.
//!
//! These are the records kept in the persisted event slot. Field names are
//! serialized in camelCase so a slot written by the ElderEase web screen
//! (`elderEvents` in browser storage) loads without conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Capacity given to new events when the organiser doesn't pick one.
pub const DEFAULT_MAX_ATTENDEES: u32 = 50;

const MAPS_BASE_URL: &str = "https://www.google.com/maps";

/// A community event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    #[serde(rename = "eventTitle")]
    pub title: String,
    pub description: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Local time (HH:MM)
    pub time: String,
    /// Human-readable address
    pub location: String,
    /// Geocoded position, only when the location picker resolved one
    #[serde(flatten)]
    pub coordinates: Option<Coordinates>,
    /// User ids in join order
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub join_requests: Vec<JoinRequest>,
    #[serde(default = "default_max_attendees")]
    pub max_attendees: u32,
    pub created_by: String,
    pub date_created: DateTime<Utc>,
}

fn default_max_attendees() -> u32 {
    DEFAULT_MAX_ATTENDEES
}

/// Latitude/longitude pair. Stored as two sibling fields on the record;
/// a record with only one of them loads as having no coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A request from a user to attend an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub status: JoinStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStatus {
    Pending,
    Approved,
    Rejected,
}

/// The editable part of an event: everything the create/edit form controls.
///
/// Applying a patch never touches `id`, `created_by`, `date_created`,
/// `attendees` or `join_requests`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPatch {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub max_attendees: u32,
}

impl EventRecord {
    /// Build a brand new record with no attendees or join requests.
    pub fn create(
        id: String,
        details: EventPatch,
        created_by: &str,
        date_created: DateTime<Utc>,
    ) -> Self {
        EventRecord {
            id,
            title: details.title,
            description: details.description,
            date: details.date,
            time: details.time,
            location: details.location,
            coordinates: details.coordinates,
            attendees: Vec::new(),
            join_requests: Vec::new(),
            max_attendees: details.max_attendees,
            created_by: created_by.to_string(),
            date_created,
        }
    }

    pub fn apply(&mut self, patch: EventPatch) {
        self.title = patch.title;
        self.description = patch.description;
        self.date = patch.date;
        self.time = patch.time;
        self.location = patch.location;
        self.coordinates = patch.coordinates;
        self.max_attendees = patch.max_attendees;
    }

    /// The editable fields of this record, as the edit form starts out.
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

    /// e.g. "2025-06-01 at 18:00"
    pub fn schedule_label(&self) -> String {
        format!("{} at {}", self.date, self.time)
    }

    /// e.g. "3/50 attendees"
    pub fn attendance_label(&self) -> String {
        format!("{}/{} attendees", self.attendees.len(), self.max_attendees)
    }

    pub fn pending_requests(&self) -> impl Iterator<Item = &JoinRequest> {
        self.join_requests
            .iter()
            .filter(|r| r.status == JoinStatus::Pending)
    }

    /// Map search link: coordinates when known, the address otherwise.
    pub fn maps_url(&self) -> String {
        let query = match self.coordinates {
            Some(c) => format!("{},{}", c.latitude, c.longitude),
            None => self.location.clone(),
        };

        match Url::parse_with_params(MAPS_BASE_URL, &[("q", query.as_str())]) {
            Ok(url) => url.to_string(),
            Err(_) => MAPS_BASE_URL.to_string(),
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
