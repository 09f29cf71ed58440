use anyhow::Result;
use elderease_core::config::ElderEaseConfig;
use owo_colors::OwoColorize;

pub fn run(config: &ElderEaseConfig) -> Result<()> {
    let config_path = ElderEaseConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", config.slot().path().display());

    println!("{}", "Settings".bold());
    println!("  Created by:    {}", config.created_by);
    println!("  Save retries:  {}", config.save_retries);

    Ok(())
}
