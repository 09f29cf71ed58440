use anyhow::Result;
use elderease_core::config::ElderEaseConfig;

use crate::EventArgs;
use crate::commands::{fill_form, load_board};
use crate::terminal::TerminalNotifier;

pub fn run(config: &ElderEaseConfig, args: EventArgs) -> Result<()> {
    let interactive = args.has_missing_required();

    let mut board = load_board(config);
    board.open_create()?;

    fill_form(&mut board, args, interactive)?;

    if interactive {
        println!();
    }
    if board.submit(&mut TerminalNotifier).is_none() {
        anyhow::bail!("Event was not created");
    }

    Ok(())
}
