//! Default command: open the card full screen.

use anyhow::Result;
use folio_core::config::Config;
use folio_core::content::Card;
use folio_core::interrupt;
use tracing::info;

pub fn run(config: &Config, card: Card) -> Result<()> {
    greet(&card);
    interrupt::init()?;
    open(config, card)
}

fn greet(card: &Card) {
    match &card.recipient {
        Some(recipient) => info!("📖 {} {}! 🎂", card.title, recipient),
        None => info!("📖 {}! 🎂", card.title),
    }
    info!("A little book made with 💜");
}

#[cfg(feature = "tui")]
fn open(config: &Config, card: Card) -> Result<()> {
    folio_tui::run_card(config, card)
}

#[cfg(not(feature = "tui"))]
fn open(_config: &Config, _card: Card) -> Result<()> {
    anyhow::bail!(
        "This build has no terminal UI (feature `tui` disabled).\n\
         Use `folio pages` to print the card as plain text."
    )
}
