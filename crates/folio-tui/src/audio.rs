//! Page-turn sound playback.
//!
//! Playback is best effort: a missing device or a failing stream is logged
//! once and never interrupts navigation.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample, StreamConfig};
use folio_core::sound::PageTurnSound;
use tracing::{debug, warn};

struct Output {
    device: cpal::Device,
    config: StreamConfig,
    format: SampleFormat,
}

impl Output {
    fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .context("No audio output device")?;
        let supported = device
            .default_output_config()
            .context("Failed to query output config")?;
        let format = supported.sample_format();
        let config: StreamConfig = supported.into();
        debug!(
            channels = config.channels,
            sample_rate = config.sample_rate.0,
            ?format,
            "opened audio output"
        );
        Ok(Self {
            device,
            config,
            format,
        })
    }
}

/// Plays a freshly synthesized [`PageTurnSound`] on each request.
///
/// The output device is opened on first use.
pub struct PageTurnPlayer {
    sound: PageTurnSound,
    output: Option<Output>,
    unavailable: bool,
    // Dropping a stream stops it; keep the latest one alive until replaced.
    stream: Option<cpal::Stream>,
    rng: fastrand::Rng,
}

impl PageTurnPlayer {
    pub fn new(sound: PageTurnSound) -> Self {
        Self {
            sound,
            output: None,
            unavailable: false,
            stream: None,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn play(&mut self) {
        if self.unavailable {
            return;
        }
        if let Err(e) = self.try_play() {
            warn!("page-turn sound unavailable: {e:#}");
            self.unavailable = true;
            self.stream = None;
        }
    }

    fn try_play(&mut self) -> Result<()> {
        if self.output.is_none() {
            self.output = Some(Output::open()?);
        }
        let Some(output) = &self.output else {
            return Ok(());
        };

        let samples: Arc<[f32]> = self
            .sound
            .synthesize(output.config.sample_rate.0, &mut self.rng)
            .into();
        let stream = match output.format {
            SampleFormat::F32 => build_stream::<f32>(output, samples)?,
            SampleFormat::I16 => build_stream::<i16>(output, samples)?,
            SampleFormat::U16 => build_stream::<u16>(output, samples)?,
            other => bail!("Unsupported sample format {other:?}"),
        };
        stream.play().context("Failed to start audio stream")?;
        self.stream = Some(stream);
        Ok(())
    }
}

fn build_stream<T>(output: &Output, samples: Arc<[f32]>) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = usize::from(output.config.channels).max(1);
    let mut cursor = 0;
    let stream = output
        .device
        .build_output_stream(
            &output.config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let value = T::from_sample(samples.get(cursor).copied().unwrap_or(0.0));
                    cursor += 1;
                    frame.fill(value);
                }
            },
            |err| warn!("audio stream error: {err}"),
            None,
        )
        .context("Failed to build audio stream")?;
    Ok(stream)
}
