use anyhow::Result;
use elderease_core::config::ElderEaseConfig;

use crate::commands::{find_event, load_store};
use crate::render::render_details;

pub fn run(config: &ElderEaseConfig, id: &str) -> Result<()> {
    let store = load_store(config);
    let event = find_event(&store, id)?;

    println!("{}", render_details(event));

    Ok(())
}
