use anyhow::Result;
use elderease_core::config::ElderEaseConfig;

use crate::commands::{find_event, load_board};
use crate::render::Render;
use crate::terminal::{PromptConfirmer, TerminalNotifier};

pub fn run(config: &ElderEaseConfig, id: &str, force: bool) -> Result<()> {
    let mut board = load_board(config);
    let summary = find_event(board.store(), id)?.render();

    if !force {
        println!("{}", summary);
    }

    board.delete(id, &mut PromptConfirmer { force }, &mut TerminalNotifier);

    Ok(())
}
