//! Terminal rendering for event records.
//!
//! Extension traits that add colored output to elderease-core types using
//! owo_colors.

use elderease_core::{EventRecord, JoinStatus};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for JoinStatus {
    fn render(&self) -> String {
        match self {
            JoinStatus::Pending => "pending".yellow().to_string(),
            JoinStatus::Approved => "approved".green().to_string(),
            JoinStatus::Rejected => "rejected".red().to_string(),
        }
    }
}

impl Render for EventRecord {
    /// One line for the event list
    fn render(&self) -> String {
        format!(
            "📅 {}  {}  {}  {}",
            self.title.bold(),
            self.schedule_label(),
            self.attendance_label().dimmed(),
            format!("[{}]", self.id).dimmed()
        )
    }
}

/// The full card shown by `show`.
pub fn render_details(event: &EventRecord) -> String {
    let mut lines = vec![
        event.title.bold().to_string(),
        format!("   {}", event.description),
        String::new(),
        format!("   When:      {}", event.schedule_label()),
        format!("   Where:     {}", event.location),
    ];

    if let Some(c) = event.coordinates {
        lines.push(format!("   {}", format!("Coordinates: {}", c).dimmed()));
    }

    lines.push(format!("   Attending: {}", event.attendance_label()));

    if !event.join_requests.is_empty() {
        lines.push("   Join requests:".to_string());
        for request in &event.join_requests {
            lines.push(format!(
                "     {} <{}> {}",
                request.user_name,
                request.user_email,
                request.status.render()
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("   Map: {}", event.maps_url()));
    lines.push(
        format!(
            "   id {} · created by {} on {}",
            event.id,
            event.created_by,
            event.date_created.format("%Y-%m-%d")
        )
        .dimmed()
        .to_string(),
    );

    lines.join("\n")
}
