//! Scripted step sequences
//!
//! A `Sequence` plays an ordered list of timed steps over one shared scalar.
//! Steps run strictly in order; a step only begins once the previous one has
//! completed. The sequence runs once and is not repeated or reversed.
//!
//! # Example
//!
//! ```rust
//! use confetti_animation::{Easing, Sequence};
//!
//! let mut seq = Sequence::new()
//!     .step(0.0, 0, Easing::Linear)
//!     .step(1.0, 350, Easing::EaseOutCubic)
//!     .step(2.0, 3000, Easing::EaseInCubic);
//!
//! seq.start();
//! seq.tick(350.0);
//! assert_eq!(seq.value(), 1.0);
//! ```

use crate::easing::Easing;
use crate::interpolate::Interpolate;

/// One timed step of a sequence
#[derive(Clone, Copy, Debug)]
pub struct Step {
    /// Scalar value the step animates to
    pub target: f32,
    /// Step duration in milliseconds; zero completes instantly
    pub duration_ms: u32,
    /// Easing applied to the step's local progress
    pub easing: Easing,
}

/// A one-shot scripted animation over a single scalar
///
/// Time is advanced in milliseconds via [`Sequence::tick`]; the scheduler
/// supplies wall-clock deltas in production and tests supply fixed ones.
/// Leftover time at a step boundary flows into the next step so boundaries
/// do not quantize to frame boundaries.
#[derive(Clone, Debug)]
pub struct Sequence {
    steps: Vec<Step>,
    initial: f32,
    delay_ms: u32,

    value: f32,
    current: usize,
    step_from: f32,
    step_elapsed: f32,
    delay_remaining: f32,
    elapsed: f32,
    playing: bool,
    started: bool,
}

impl Sequence {
    /// Create an empty sequence starting at scalar 0
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            initial: 0.0,
            delay_ms: 0,
            value: 0.0,
            current: 0,
            step_from: 0.0,
            step_elapsed: 0.0,
            delay_remaining: 0.0,
            elapsed: 0.0,
            playing: false,
            started: false,
        }
    }

    /// Append a step animating to `target` over `duration_ms`
    pub fn step(mut self, target: f32, duration_ms: u32, easing: Easing) -> Self {
        self.steps.push(Step {
            target,
            duration_ms,
            easing,
        });
        self
    }

    /// Set the scalar value held before the first step begins
    pub fn start_value(mut self, initial: f32) -> Self {
        self.initial = initial;
        self.value = initial;
        self
    }

    /// Set a pre-roll delay before the first step begins
    ///
    /// The delay is consumed in timeline time, so ticking a total of
    /// `delay_ms` is exactly what arms the first step.
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Start (or rewind and restart) the sequence
    pub fn start(&mut self) {
        self.value = self.initial;
        self.current = 0;
        self.step_from = self.initial;
        self.step_elapsed = 0.0;
        self.delay_remaining = self.delay_ms as f32;
        self.elapsed = 0.0;
        self.playing = true;
        self.started = true;
    }

    /// Halt without completing; the scalar keeps its current value
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Advance the sequence by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.elapsed += dt_ms;
        let mut dt = dt_ms;

        // Pre-roll delay consumes time before the first step
        if self.delay_remaining > 0.0 {
            if dt < self.delay_remaining {
                self.delay_remaining -= dt;
                return;
            }
            dt -= self.delay_remaining;
            self.delay_remaining = 0.0;
        }

        loop {
            let Some(step) = self.steps.get(self.current) else {
                self.playing = false;
                return;
            };
            let step = *step;

            if step.duration_ms == 0 {
                // Instant step: snap and move on without consuming time
                self.value = step.target;
                self.advance();
                continue;
            }

            let duration = step.duration_ms as f32;
            self.step_elapsed += dt;

            if self.step_elapsed >= duration {
                // Step complete; leftover time flows into the next step
                dt = self.step_elapsed - duration;
                self.value = step.target;
                self.advance();
                if !self.playing {
                    return;
                }
                continue;
            }

            let local = self.step_elapsed / duration;
            let eased = step.easing.apply(local);
            self.value = self.step_from.lerp(&step.target, eased);
            return;
        }
    }

    fn advance(&mut self) {
        self.current += 1;
        self.step_from = self.value;
        self.step_elapsed = 0.0;
        if self.current >= self.steps.len() {
            self.playing = false;
        }
    }

    /// The shared scalar's current value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Check if the sequence is currently playing (including the pre-roll)
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the sequence has run to its terminal value
    pub fn is_finished(&self) -> bool {
        self.started && !self.playing && self.current >= self.steps.len()
    }

    /// Overall progress through delay plus all steps (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let total =
            self.delay_ms as f32 + self.steps.iter().map(|s| s.duration_ms as f32).sum::<f32>();
        if total <= 0.0 {
            return if self.is_finished() { 1.0 } else { 0.0 };
        }
        (self.elapsed / total).clamp(0.0, 1.0)
    }

    /// Index of the step currently playing, if any
    pub fn current_step(&self) -> Option<usize> {
        if self.playing && self.delay_remaining <= 0.0 && self.current < self.steps.len() {
            Some(self.current)
        } else {
            None
        }
    }

    /// Number of steps in the script
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}
