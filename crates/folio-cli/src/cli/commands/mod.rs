//! CLI command handlers.

pub mod config;
pub mod pages;
pub mod show;
pub mod sound;

use std::path::Path;

use anyhow::Result;
use folio_core::config::Config;
use folio_core::content::Card;
use tracing::debug;

/// Resolves the card to open: `--card`, then `card` from config, then the
/// built-in card.
pub fn load_card(card_override: Option<&Path>, config: &Config) -> Result<Card> {
    match card_override.or(config.card.as_deref()) {
        Some(path) => {
            debug!(path = %path.display(), "loading card");
            Card::load_from(path)
        }
        None => Ok(Card::builtin()),
    }
}
