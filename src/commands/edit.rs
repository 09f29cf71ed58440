use anyhow::Result;
use elderease_core::config::ElderEaseConfig;
use owo_colors::OwoColorize;

use crate::EventArgs;
use crate::commands::{fill_form, find_event, load_board};
use crate::render::Render;
use crate::terminal::TerminalNotifier;

pub fn run(config: &ElderEaseConfig, id: &str, args: EventArgs) -> Result<()> {
    // With no flags, walk through every field with the current value filled in
    let interactive = args.is_empty();

    let mut board = load_board(config);
    let current = find_event(board.store(), id)?.render();

    if interactive {
        println!("{} {}\n", "Editing".dimmed(), current);
    }

    board.open_edit(id)?;
    fill_form(&mut board, args, interactive)?;

    if interactive {
        println!();
    }
    if board.submit(&mut TerminalNotifier).is_none() {
        anyhow::bail!("Event was not updated");
    }

    Ok(())
}
