//! The confetti explosion widget
//!
//! Owns the particle collection and the shared progress sequence. On mount
//! the widget generates its particles and arms the three-phase burst on the
//! scheduler; every render pass maps each particle through the pure
//! transform mapping at the current progress.
//!
//! # Example
//!
//! ```ignore
//! use confetti_animation::AnimationScheduler;
//! use confetti_core::{Point, Size};
//! use confetti_widget::explosion;
//!
//! let scheduler = AnimationScheduler::new();
//! let mut cannon = explosion(20, Point::new(0.0, 0.0));
//! cannon.mount(scheduler.handle());
//!
//! // Each frame:
//! scheduler.tick();
//! let pieces = cannon.render(Size::new(390.0, 844.0));
//! ```

use confetti_animation::{AnimatedSequence, Easing, SchedulerHandle, Sequence};
use confetti_core::{Point, Size};
use rand::Rng;

use crate::mapping::{self, ConfettiPiece};
use crate::particle::{self, Particle};

/// Fixed pause between particle generation and the start of the burst
const PRE_BURST_DELAY_MS: u32 = 1000;

/// Default duration of the outward burst phase
const DEFAULT_EXPLOSION_SPEED_MS: u32 = 350;

/// Default duration of the gravity-driven fall phase
const DEFAULT_FALL_SPEED_MS: u32 = 3000;

/// A one-shot confetti explosion
///
/// Configuration is fixed at construction; the animation plays once and is
/// abandoned if the widget is dropped mid-flight.
pub struct Explosion {
    count: usize,
    origin: Point,
    explosion_speed_ms: u32,
    fall_speed_ms: u32,
    particles: Vec<Particle>,
    animation: Option<AnimatedSequence>,
}

impl Explosion {
    /// Create an explosion of `count` particles bursting from `origin`
    pub fn new(count: usize, origin: impl Into<Point>) -> Self {
        Self {
            count,
            origin: origin.into(),
            explosion_speed_ms: DEFAULT_EXPLOSION_SPEED_MS,
            fall_speed_ms: DEFAULT_FALL_SPEED_MS,
            particles: Vec::new(),
            animation: None,
        }
    }

    /// Set the duration of the burst phase in milliseconds (default: 350)
    pub fn explosion_speed(mut self, ms: u32) -> Self {
        self.explosion_speed_ms = ms;
        self
    }

    /// Set the duration of the fall phase in milliseconds (default: 3000)
    pub fn fall_speed(mut self, ms: u32) -> Self {
        self.fall_speed_ms = ms;
        self
    }

    /// Generate particles and arm the burst on the scheduler
    ///
    /// The sequence starts immediately but holds the fixed pre-burst pause
    /// before the reset step, so the explosion becomes visible about a
    /// second after mounting.
    pub fn mount(&mut self, handle: SchedulerHandle) {
        let mut rng = rand::rng();
        self.particles = particle::generate(self.count, &mut || rng.random::<f32>());

        tracing::debug!(
            count = self.particles.len(),
            origin = ?self.origin,
            "confetti: particles generated, burst armed"
        );

        let animation = AnimatedSequence::new(handle, self.build_sequence());
        animation.start();
        self.animation = Some(animation);
    }

    /// The scripted three-phase progress sequence
    ///
    /// Reset is instant so the scalar starts from a known value regardless
    /// of prior state; the explosion eases out (fast start), the fall eases
    /// in (slow start).
    fn build_sequence(&self) -> Sequence {
        Sequence::new()
            .delay(PRE_BURST_DELAY_MS)
            .step(0.0, 0, Easing::Linear)
            .step(1.0, self.explosion_speed_ms, Easing::EaseOutCubic)
            .step(2.0, self.fall_speed_ms, Easing::EaseInCubic)
    }

    /// Compute every particle's placement at the current progress
    ///
    /// Viewport dimensions are queried by the caller once per render pass
    /// and passed in, so rotation/resize takes effect on the next frame.
    pub fn render(&self, viewport: Size) -> Vec<ConfettiPiece> {
        let progress = self.progress();
        self.particles
            .iter()
            .map(|particle| mapping::place_particle(progress, particle, viewport, self.origin))
            .collect()
    }

    /// The shared progress scalar (0 reset, 1 explosion done, 2 fall done)
    pub fn progress(&self) -> f32 {
        self.animation.as_ref().map(|a| a.value()).unwrap_or(0.0)
    }

    /// Check if the burst is still playing (including the pre-burst pause)
    pub fn is_animating(&self) -> bool {
        self.animation
            .as_ref()
            .map(|a| a.is_playing())
            .unwrap_or(false)
    }

    /// Check if the burst has run to completion
    pub fn is_finished(&self) -> bool {
        self.animation
            .as_ref()
            .map(|a| a.is_finished())
            .unwrap_or(false)
    }

    /// The generated particles (empty before mount)
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The configured burst origin
    pub fn origin(&self) -> Point {
        self.origin
    }
}

/// Create a confetti explosion widget
///
/// # Example
///
/// ```ignore
/// let cannon = explosion(200, Point::new(-10.0, 0.0))
///     .explosion_speed(400)
///     .fall_speed(2400);
/// ```
pub fn explosion(count: usize, origin: impl Into<Point>) -> Explosion {
    Explosion::new(count, origin)
}
