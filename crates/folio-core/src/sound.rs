//! Synthesized page-turn sound.
//!
//! A short burst of white noise through a high-pass biquad with a fast
//! exponential decay, which reads as rustling paper.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTurnSound {
    pub duration: Duration,
    /// High-pass cutoff in Hz.
    pub cutoff: f32,
    pub start_gain: f32,
    pub end_gain: f32,
}

impl Default for PageTurnSound {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(150),
            cutoff: 800.0,
            start_gain: 0.015,
            end_gain: 0.001,
        }
    }
}

impl PageTurnSound {
    /// Scales both ends of the envelope.
    pub fn with_volume(mut self, volume: f32) -> Self {
        let volume = volume.max(0.0);
        self.start_gain *= volume;
        self.end_gain *= volume;
        self
    }

    /// Lowest sample rate whose Nyquist frequency lies above the cutoff.
    pub fn min_sample_rate(&self) -> u32 {
        (self.cutoff.max(0.0) * 2.0).floor() as u32 + 1
    }

    /// Renders mono samples at `sample_rate`.
    ///
    /// Below [`min_sample_rate`](Self::min_sample_rate) the cutoff is pulled
    /// under Nyquist so the filter stays stable.
    pub fn synthesize(&self, sample_rate: u32, rng: &mut fastrand::Rng) -> Vec<f32> {
        let len = (self.duration.as_secs_f32() * sample_rate as f32).round() as usize;
        let mut filter = HighPass::new(self.cutoff, sample_rate as f32);
        let ratio = if self.start_gain > 0.0 && self.end_gain > 0.0 {
            self.end_gain / self.start_gain
        } else {
            0.0
        };

        (0..len)
            .map(|i| {
                let noise = rng.f32() * 2.0 - 1.0;
                let t = i as f32 / len.max(1) as f32;
                let gain = self.start_gain * ratio.powf(t);
                filter.process(noise) * gain
            })
            .collect()
    }
}

// Coefficients go unstable as the cutoff approaches Nyquist.
const MAX_CUTOFF_RATIO: f32 = 0.45;

/// RBJ cookbook high-pass biquad, Q = 1/sqrt(2).
#[derive(Debug, Clone, Copy)]
struct HighPass {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl HighPass {
    fn new(cutoff: f32, sample_rate: f32) -> Self {
        let cutoff = cutoff.min(sample_rate * MAX_CUTOFF_RATIO);
        let w0 = std::f32::consts::TAU * cutoff / sample_rate;
        let (sin, cos) = w0.sin_cos();
        let alpha = sin / (2.0 * std::f32::consts::FRAC_1_SQRT_2);
        let a0 = 1.0 + alpha;
        Self {
            b0: (1.0 + cos) / 2.0 / a0,
            b1: -(1.0 + cos) / a0,
            b2: (1.0 + cos) / 2.0 / a0,
            a1: -2.0 * cos / a0,
            a2: (1.0 - alpha) / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    fn process(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

/// Writes samples as a 16-bit mono WAV file.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer
            .write_sample(value)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    writer
        .finalize()
        .with_context(|| format!("Failed to finalize {}", path.display()))?;
    Ok(())
}
