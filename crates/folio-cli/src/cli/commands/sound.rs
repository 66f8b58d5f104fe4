//! `folio sound export`.

use std::path::Path;

use anyhow::{Result, bail};
use folio_core::config::Config;
use folio_core::sound::{self, PageTurnSound};
use tracing::info;

pub fn export(path: &Path, config: &Config, seed: Option<u64>, sample_rate: u32) -> Result<()> {
    let turn = PageTurnSound::default().with_volume(config.sound_volume);
    let min_rate = turn.min_sample_rate();
    if sample_rate < min_rate {
        bail!("Sample rate must be at least {min_rate} Hz, got {sample_rate}");
    }

    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let samples = turn.synthesize(sample_rate, &mut rng);
    sound::write_wav(path, &samples, sample_rate)?;

    info!(path = %path.display(), samples = samples.len(), "exported page-turn sound");
    println!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}
