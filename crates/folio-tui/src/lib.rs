//! Full-screen terminal rendition of a Folio card.

pub mod audio;
pub mod effects;
pub mod events;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
use folio_core::config::Config;
use folio_core::content::Card;
pub use runtime::TuiRuntime;

/// Opens `card` full screen and blocks until the reader closes it.
pub fn run_card(config: &Config, card: Card) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "Opening a card requires a terminal.\n\
             Use `folio pages` to print the card as plain text."
        );
    }

    let mut runtime = TuiRuntime::new(config, card)?;
    runtime.run()
}
