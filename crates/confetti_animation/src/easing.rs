//! Easing functions
//!
//! Shapes the local progress of a timed step. The explosion phase uses
//! `EaseOutCubic` (fast start, slow finish) and the fall phase uses
//! `EaseInCubic` (slow start, fast finish).

/// Easing curve applied to a step's local progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant rate
    #[default]
    Linear,
    /// Quadratic ease-in
    EaseIn,
    /// Quadratic ease-out
    EaseOut,
    /// Quadratic ease-in-out
    EaseInOut,
    /// Quadratic ease-in (explicit alias of `EaseIn`)
    EaseInQuad,
    /// Quadratic ease-out (explicit alias of `EaseOut`)
    EaseOutQuad,
    /// Cubic ease-in
    EaseInCubic,
    /// Cubic ease-out
    EaseOutCubic,
}

impl Easing {
    /// Map a linear progress value in [0, 1] through this curve
    ///
    /// Input is clamped; every curve maps 0 to 0 and 1 to 1.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn | Easing::EaseInQuad => t * t,
            Easing::EaseOut | Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}
