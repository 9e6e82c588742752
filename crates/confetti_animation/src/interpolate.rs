//! Checkpoint interpolation
//!
//! Provides the trait for linearly interpolatable values and the piecewise
//! mapping from a progress value over a checkpoint list to an output list.
//! This is the explicit, framework-independent form of the host animation
//! engine's declarative input-range/output-range interpolation.

use smallvec::SmallVec;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

/// Piecewise-linear interpolation over parallel checkpoint/output lists
///
/// `input_range` must be sorted ascending and the same length as
/// `output_range` (at least two entries). Outside the input range the edge
/// outputs are held, which is what keeps a particle pinned to its final
/// column once its last checkpoint has passed.
///
/// Repeated checkpoints are allowed and produce a step: the later output
/// wins from that point on.
pub fn interpolate(t: f32, input_range: &[f32], output_range: &[f32]) -> f32 {
    debug_assert_eq!(input_range.len(), output_range.len());
    debug_assert!(input_range.len() >= 2);

    if t <= input_range[0] {
        return output_range[0];
    }
    if t >= input_range[input_range.len() - 1] {
        return output_range[output_range.len() - 1];
    }

    // Find the segment containing t
    let mut hi = 1;
    while input_range[hi] < t {
        hi += 1;
    }
    let lo = hi - 1;

    let span = input_range[hi] - input_range[lo];
    if span <= f32::EPSILON {
        return output_range[hi];
    }

    let local = (t - input_range[lo]) / span;
    output_range[lo].lerp(&output_range[hi], local)
}

/// A reusable declarative checkpoint mapping
///
/// Holds the checkpoint and output lists once so per-frame sampling does
/// not rebuild them. Sized inline for the widget's four-checkpoint case.
#[derive(Clone, Debug)]
pub struct Interpolation {
    input_range: SmallVec<[f32; 4]>,
    output_range: SmallVec<[f32; 4]>,
}

impl Interpolation {
    /// Create a mapping from parallel checkpoint and output lists
    ///
    /// # Panics
    ///
    /// Panics if the lists differ in length or have fewer than two entries.
    pub fn new(input_range: &[f32], output_range: &[f32]) -> Self {
        assert_eq!(
            input_range.len(),
            output_range.len(),
            "checkpoint and output lists must be parallel"
        );
        assert!(input_range.len() >= 2, "need at least two checkpoints");

        Self {
            input_range: SmallVec::from_slice(input_range),
            output_range: SmallVec::from_slice(output_range),
        }
    }

    /// Sample the mapping at a progress value
    pub fn sample(&self, t: f32) -> f32 {
        interpolate(t, &self.input_range, &self.output_range)
    }
}
