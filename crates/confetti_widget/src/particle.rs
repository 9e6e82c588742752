//! Particle data and randomized generation
//!
//! Each particle is a bundle of motion-shaping parameters drawn once at
//! generation time and never mutated. Position, rotation, and swing are all
//! derived per frame from these parameters and the shared progress scalar;
//! particles carry no mutable state of their own.

/// Lower bound of the vertical target band
///
/// Apexes land in the upper 30% of the viewport so pieces clear the screen
/// before falling.
pub const VERTICAL_TARGET_MIN: f32 = 0.7;

/// Per-axis rotation speed multipliers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinRates {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A single confetti particle (immutable once generated)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Fraction of viewport width for the final horizontal resting column
    pub horizontal_target: f32,
    /// Fraction of viewport height for the apex of the burst
    pub vertical_target: f32,
    /// Scales the lateral oscillation during the fall phase
    pub swing_magnitude: f32,
    /// Per-axis rotation speed multipliers
    pub spin_rates: SpinRates,
}

impl Particle {
    /// Draw a particle with all fields sampled uniformly from their ranges
    ///
    /// `rng` must yield uniform values in [0, 1); the caller controls the
    /// entropy source, so tests can drive generation deterministically.
    pub fn random(rng: &mut impl FnMut() -> f32) -> Self {
        Self {
            horizontal_target: random_value(rng, 0.0, 1.0),
            vertical_target: random_value(rng, VERTICAL_TARGET_MIN, 1.0),
            swing_magnitude: random_value(rng, 0.2, 1.0),
            spin_rates: SpinRates {
                x: random_value(rng, 0.3, 1.0),
                y: random_value(rng, 0.3, 1.0),
                z: random_value(rng, 0.3, 1.0),
            },
        }
    }
}

/// Uniform draw from [min, max)
fn random_value(rng: &mut impl FnMut() -> f32, min: f32, max: f32) -> f32 {
    min + rng() * (max - min)
}

/// Generate exactly `count` independent particles
///
/// A count of 0 yields an empty collection; there are no error conditions.
pub fn generate(count: usize, rng: &mut impl FnMut() -> f32) -> Vec<Particle> {
    (0..count).map(|_| Particle::random(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_generate_exact_count() {
        let mut rng = || 0.5;
        assert_eq!(generate(0, &mut rng).len(), 0);
        assert_eq!(generate(1, &mut rng).len(), 1);
        assert_eq!(generate(20, &mut rng).len(), 20);
        assert_eq!(generate(500, &mut rng).len(), 500);
    }

    #[test]
    fn test_fields_within_ranges() {
        let mut std_rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut rng = || std_rng.random::<f32>();

        for particle in generate(1000, &mut rng) {
            assert!((0.0..=1.0).contains(&particle.horizontal_target));
            assert!((VERTICAL_TARGET_MIN..=1.0).contains(&particle.vertical_target));
            assert!((0.2..=1.0).contains(&particle.swing_magnitude));
            assert!((0.3..=1.0).contains(&particle.spin_rates.x));
            assert!((0.3..=1.0).contains(&particle.spin_rates.y));
            assert!((0.3..=1.0).contains(&particle.spin_rates.z));
        }
    }

    #[test]
    fn test_draw_order_is_stable() {
        // Fields consume draws in declaration order, so a scripted source
        // lands each value in a known field.
        let draws = [0.5, 0.0, 1.0, 0.0, 0.5, 1.0];
        let mut i = 0;
        let mut rng = || {
            let v = draws[i];
            i += 1;
            v
        };

        let particle = Particle::random(&mut rng);
        assert_eq!(particle.horizontal_target, 0.5);
        assert_eq!(particle.vertical_target, VERTICAL_TARGET_MIN);
        assert_eq!(particle.swing_magnitude, 1.0);
        assert_eq!(particle.spin_rates.x, 0.3);
        assert!((particle.spin_rates.y - 0.65).abs() < 1e-6);
        assert_eq!(particle.spin_rates.z, 1.0);
    }
}
