use anyhow::{Context, Result};
use elderease_core::config::ElderEaseConfig;

use crate::commands::{find_event, load_store};

pub fn run(config: &ElderEaseConfig, id: &str) -> Result<()> {
    let store = load_store(config);
    let url = find_event(&store, id)?.maps_url();

    println!("Opening {}", url);
    open::that(&url).with_context(|| format!("Failed to open {} in the browser", url))?;

    Ok(())
}
