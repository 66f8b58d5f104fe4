//! Ambient particles drifting up behind the book.

use std::time::Duration;

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Lavender, rose, butter, lilac and sky.
pub const PALETTE: [Rgb; 5] = [
    Rgb(0x9c, 0x7c, 0xb5),
    Rgb(0xe8, 0xb4, 0xbc),
    Rgb(0xf4, 0xd9, 0xa0),
    Rgb(0xc9, 0xb8, 0xd9),
    Rgb(0xd4, 0xe8, 0xf0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleSettings {
    pub narrow_width: u32,
    pub narrow_count: usize,
    pub wide_count: usize,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            narrow_width: 600,
            narrow_count: 12,
            wide_count: 18,
        }
    }
}

impl ParticleSettings {
    pub fn count_for(&self, viewport_width: u32) -> usize {
        if viewport_width < self.narrow_width {
            self.narrow_count
        } else {
            self.wide_count
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position as a percentage of the viewport.
    pub left: f32,
    /// Diameter in pixels (4..12).
    pub size: f32,
    pub color: Rgb,
    /// One full rise, bottom to top.
    pub duration: Duration,
    /// How far into its cycle the particle starts.
    pub offset: Duration,
}

/// Where a particle is at some instant, in viewport percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePosition {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

impl Particle {
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self {
            left: rng.f32() * 100.0,
            size: rng.f32() * 8.0 + 4.0,
            color: PALETTE[rng.usize(..PALETTE.len())],
            duration: Duration::from_secs_f32(rng.f32() * 18.0 + 12.0),
            offset: Duration::from_secs_f32(rng.f32() * 12.0),
        }
    }

    /// Position at `elapsed` ambient time. The particle rises from just
    /// below the viewport to just above it, swaying a little and fading in
    /// and out at the ends.
    pub fn position(&self, elapsed: Duration) -> ParticlePosition {
        let cycle = self.duration.as_secs_f32().max(f32::EPSILON);
        let t = (elapsed + self.offset).as_secs_f32() % cycle / cycle;
        let sway = (t * std::f32::consts::TAU * 2.0).sin() * 3.0;
        ParticlePosition {
            x: (self.left + sway).clamp(0.0, 100.0),
            y: 105.0 - t * 110.0,
            opacity: (t * std::f32::consts::PI).sin(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn generate(viewport_width: u32, settings: &ParticleSettings, rng: &mut fastrand::Rng) -> Self {
        let count = settings.count_for(viewport_width);
        Self {
            particles: (0..count).map(|_| Particle::random(rng)).collect(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Animation clock for ambient effects that stops while the card is hidden.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbientClock {
    elapsed: Duration,
    last: Option<Duration>,
    paused: bool,
}

impl AmbientClock {
    /// Feeds the wall time; elapsed ambient time only grows while running.
    pub fn observe(&mut self, now: Duration) {
        if let Some(last) = self.last
            && !self.paused
        {
            self.elapsed += now.saturating_sub(last);
        }
        self.last = Some(now);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_depends_on_viewport() {
        let settings = ParticleSettings::default();
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(ParticleField::generate(400, &settings, &mut rng).len(), 12);
        assert_eq!(ParticleField::generate(1200, &settings, &mut rng).len(), 18);
    }

    #[test]
    fn test_random_particles_stay_in_ranges() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..200 {
            let p = Particle::random(&mut rng);
            assert!((0.0..=100.0).contains(&p.left));
            assert!((4.0..=12.0).contains(&p.size));
            assert!(PALETTE.contains(&p.color));
            assert!((12.0..=30.0).contains(&p.duration.as_secs_f32()));
            assert!(p.offset.as_secs_f32() <= 12.0);
        }
    }

    #[test]
    fn test_particle_rises_over_cycle() {
        let p = Particle {
            left: 50.0,
            size: 6.0,
            color: PALETTE[0],
            duration: Duration::from_secs(20),
            offset: Duration::ZERO,
        };
        let start = p.position(Duration::ZERO);
        let later = p.position(Duration::from_secs(10));
        assert!(later.y < start.y);
        assert!(later.opacity > start.opacity);
    }

    #[test]
    fn test_ambient_clock_stops_while_paused() {
        let mut clock = AmbientClock::default();
        clock.observe(Duration::from_millis(0));
        clock.observe(Duration::from_millis(100));
        clock.set_paused(true);
        clock.observe(Duration::from_millis(500));
        clock.set_paused(false);
        clock.observe(Duration::from_millis(600));
        assert_eq!(clock.elapsed(), Duration::from_millis(200));
        assert!(!clock.is_paused());
    }
}
