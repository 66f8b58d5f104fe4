//! Configuration management for Folio.
//!
//! Loads configuration from ${FOLIO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::gesture::{DEFAULT_SWIPE_JITTER, DEFAULT_SWIPE_THRESHOLD, SwipeConfig};
use crate::hints::{Entrance, InstructionHint, SwipeHint};
use crate::navigator::Timing;
use crate::particles::ParticleSettings;

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly or run `cargo xtask`.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Folio configuration and data directories.
    //!
    //! FOLIO_HOME resolution order:
    //! 1. FOLIO_HOME environment variable (if set)
    //! 2. ~/.config/folio (default)
    //! 3. ./.folio when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the Folio home directory.
    pub fn folio_home() -> PathBuf {
        if let Ok(home) = std::env::var("FOLIO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".folio"),
            |h| h.join(".config").join("folio"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        folio_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        folio_home().join("logs")
    }
}

/// Ambient particle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    pub enabled: bool,
    pub narrow_width: u32,
    pub narrow_count: usize,
    pub wide_count: usize,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        let settings = ParticleSettings::default();
        Self {
            enabled: true,
            narrow_width: settings.narrow_width,
            narrow_count: settings.narrow_count,
            wide_count: settings.wide_count,
        }
    }
}

/// Swipe hint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeHintConfig {
    pub enabled: bool,
    pub delay_ms: u64,
    pub duration_ms: u64,
}

impl Default for SwipeHintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: SwipeHint::DEFAULT_DELAY.as_millis() as u64,
            duration_ms: SwipeHint::DEFAULT_DURATION.as_millis() as u64,
        }
    }
}

/// Entrance animation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    pub delay_ms: u64,
    pub duration_ms: u64,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            delay_ms: Entrance::DEFAULT_DELAY.as_millis() as u64,
            duration_ms: Entrance::DEFAULT_DURATION.as_millis() as u64,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page flip animation length in milliseconds
    pub flip_duration_ms: u64,

    /// Wait after the flip before state is reconciled
    pub settle_buffer_ms: u64,

    /// Fade-out time of the reading instruction
    pub hint_fade_ms: u64,

    /// Drag distance that turns a page
    pub swipe_threshold: f32,

    /// Drag distance after which a drag counts as a swipe
    pub swipe_jitter: f32,

    /// Play the page-turn sound
    pub sound: bool,

    /// Page-turn sound volume multiplier
    pub sound_volume: f32,

    /// Ring the terminal bell on page turns
    pub haptics: bool,

    /// Card file to open instead of the built-in card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<PathBuf>,

    pub particles: ParticlesConfig,

    pub swipe_hint: SwipeHintConfig,

    pub entrance: EntranceConfig,
}

impl Default for Config {
    fn default() -> Self {
        let timing = Timing::default();
        Self {
            flip_duration_ms: timing.flip.as_millis() as u64,
            settle_buffer_ms: timing.settle_buffer.as_millis() as u64,
            hint_fade_ms: InstructionHint::DEFAULT_FADE.as_millis() as u64,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            swipe_jitter: DEFAULT_SWIPE_JITTER,
            sound: true,
            sound_volume: 1.0,
            haptics: false,
            card: None,
            particles: ParticlesConfig::default(),
            swipe_hint: SwipeHintConfig::default(),
            entrance: EntranceConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// Fails if a file already exists there.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Used by `xtask update-default-config` to keep `default_config.toml`
    /// in sync with the default values. Comments from the template are kept.
    pub fn generate() -> Result<String> {
        use toml_edit::{DocumentMut, Item};

        fn merge(target: &mut toml_edit::Table, source: &toml_edit::Table) {
            for (key, value) in source {
                match value {
                    Item::Value(v) => {
                        if let Some(Item::Value(existing)) = target.get_mut(key) {
                            let decor = existing.decor().clone();
                            *existing = v.clone();
                            *existing.decor_mut() = decor;
                        } else {
                            target[key] = Item::Value(v.clone());
                        }
                    }
                    Item::Table(src_table) => {
                        if let Some(Item::Table(target_table)) = target.get_mut(key) {
                            merge(target_table, src_table);
                        } else {
                            target[key] = Item::Table(src_table.clone());
                        }
                    }
                    _ => {}
                }
            }
        }

        let config = Config::default();
        let generated_toml =
            toml::to_string(&config).context("Failed to serialize default config to TOML")?;

        // Parse template as base (preserves comments)
        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;

        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge(doc.as_table_mut(), generated_doc.as_table());
        Ok(doc.to_string())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn timing(&self) -> Timing {
        Timing {
            flip: Duration::from_millis(self.flip_duration_ms),
            settle_buffer: Duration::from_millis(self.settle_buffer_ms),
        }
    }

    pub fn swipe(&self) -> SwipeConfig {
        SwipeConfig {
            threshold: self.swipe_threshold,
            jitter: self.swipe_jitter,
        }
    }

    pub fn particle_settings(&self) -> ParticleSettings {
        ParticleSettings {
            narrow_width: self.particles.narrow_width,
            narrow_count: self.particles.narrow_count,
            wide_count: self.particles.wide_count,
        }
    }

    pub fn instruction_hint(&self) -> InstructionHint {
        InstructionHint::new(Duration::from_millis(self.hint_fade_ms))
    }

    /// Swipe hint, shown only when the surface accepts pointer input.
    pub fn swipe_hint(&self, pointer_capable: bool) -> SwipeHint {
        SwipeHint::new(
            self.swipe_hint.enabled && pointer_capable,
            Duration::from_millis(self.swipe_hint.delay_ms),
            Duration::from_millis(self.swipe_hint.duration_ms),
        )
    }

    pub fn entrance(&self) -> Entrance {
        Entrance::new(
            Duration::from_millis(self.entrance.delay_ms),
            Duration::from_millis(self.entrance.duration_ms),
        )
    }
}
