//! Terminal implementations of the host capabilities.

use dialoguer::{Confirm, Input};
use elderease_core::capability::{
    Confirmer, LocationPicker, LocationSelection, Notice, Notifier, Severity,
};
use owo_colors::OwoColorize;

use crate::input::parse_coordinates;

/// Prints notices as a single colored line.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Normal => println!("{}", format!("  {}", notice.message).green()),
            Severity::Destructive => {
                let title = format!("  {}:", notice.title);
                eprintln!("{} {}", title.red().bold(), notice.message.red())
            }
        }
    }
}

/// Asks y/N on the terminal, or says yes without asking when forced.
pub struct PromptConfirmer {
    pub force: bool,
}

impl Confirmer for PromptConfirmer {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.force {
            return true;
        }

        // A closed or non-interactive terminal counts as "no"
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Asks for an address, then optionally for coordinates.
pub struct PromptLocationPicker;

impl LocationPicker for PromptLocationPicker {
    fn pick(&mut self, initial: Option<&LocationSelection>) -> Option<LocationSelection> {
        let mut address_prompt = Input::<String>::new().with_prompt("  Where?");
        if let Some(initial) = initial {
            address_prompt = address_prompt.with_initial_text(initial.address.clone());
        }
        let address = address_prompt.interact_text().ok()?;
        let address = address.trim().to_string();
        if address.is_empty() {
            return None;
        }

        // Keep known coordinates when the address didn't change
        let known = initial
            .filter(|i| i.address == address)
            .and_then(|i| i.coordinates);

        let coordinates = loop {
            let mut prompt = Input::<String>::new()
                .with_prompt("  Coordinates as \"lat, lng\" (skip)")
                .allow_empty(true);
            if let Some(c) = known {
                prompt = prompt.with_initial_text(format!("{}, {}", c.latitude, c.longitude));
            }

            let raw = prompt.interact_text().ok()?;
            if raw.trim().is_empty() {
                break None;
            }
            match parse_coordinates(&raw) {
                Ok(c) => break Some(c),
                Err(e) => eprintln!("  {}", e.to_string().red()),
            }
        };

        Some(LocationSelection {
            address,
            coordinates,
        })
    }
}
