//! Core domain for Folio: card content, configuration, and the page-turn
//! state machine with its input and decoration helpers.

pub mod config;
pub mod content;
pub mod gesture;
pub mod hints;
pub mod interrupt;
pub mod logging;
pub mod navigator;
pub mod particles;
pub mod scheduler;
pub mod sound;
