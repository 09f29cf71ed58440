use anyhow::{Context, Result};
use elderease_core::config::ElderEaseConfig;
use owo_colors::OwoColorize;

use crate::commands::load_store;
use crate::render::Render;

pub fn run(config: &ElderEaseConfig, json: bool) -> Result<()> {
    let store = load_store(config);

    if json {
        let out =
            serde_json::to_string_pretty(store.events()).context("Failed to serialize events")?;
        println!("{}", out);
        return Ok(());
    }

    if store.is_empty() {
        println!("{}", "No events yet".dimmed());
        println!("\nCreate your first event with:\n  elderease new");
        return Ok(());
    }

    for event in store.events() {
        println!("{}", event.render());
    }

    Ok(())
}
