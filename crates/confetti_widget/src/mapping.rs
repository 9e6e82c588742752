//! Per-particle transform mapping
//!
//! Pure functions from (progress scalar, particle, viewport, origin) to the
//! placement handed to the leaf painter. The progress scalar runs over the
//! checkpoints 0 (reset), 1 (explosion complete), 2 (fall complete); every
//! mapping below is a checkpoint interpolation read off that shared scalar.

use confetti_animation::{interpolate, Interpolation};
use confetti_core::{Point, Size, Transform};

use crate::particle::Particle;

/// Full-animation rotation multipliers for the x, y, and z axes
///
/// Distinct per-axis totals keep the tumbling of the three rotations from
/// synchronizing.
const SPIN_MULTIPLIERS: [f32; 3] = [10.0, 5.0, 2.0];

/// Peak lateral swing offset (logical pixels) at swing magnitude 1
const SWING_AMPLITUDE: f32 = 30.0;

/// Swing checkpoints: one oscillation concentrated in the early-to-mid fall
const SWING_CHECKPOINTS: [f32; 4] = [0.0, 0.4, 1.2, 2.0];

/// Computed placement for one confetti piece
///
/// The presentational leaf widget paints a single confetti shape at this
/// position with this transform; its visual design is up to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    /// Distance from the viewport's left edge
    pub left: f32,
    /// Distance from the viewport's bottom edge
    pub bottom: f32,
    /// Visual transform (three rotations, then the swing translation)
    pub transform: Transform,
}

/// Map one particle to its placement at the given progress
pub fn place_particle(
    progress: f32,
    particle: &Particle,
    viewport: Size,
    origin: Point,
) -> ConfettiPiece {
    let resting_column = particle.horizontal_target * viewport.width;

    // The horizontal resting column is reached during the explosion and held
    // through the fall; only the swing moves the piece sideways after that.
    let left = Interpolation::new(&[0.0, 1.0, 2.0], &[origin.x, resting_column, resting_column])
        .sample(progress);

    // Pieces with a higher apex reach the floor later within the fall, so
    // landings stagger instead of arriving in unison.
    let apex = particle.vertical_target * viewport.height;
    let bottom = Interpolation::new(
        &[0.0, 1.0, 1.0 + particle.vertical_target, 2.0],
        &[origin.y, apex, 0.0, 0.0],
    )
    .sample(progress);

    let swing_peak = particle.swing_magnitude * SWING_AMPLITUDE;
    let swing = Interpolation::new(
        &SWING_CHECKPOINTS,
        &[0.0, -swing_peak, swing_peak, 0.0],
    )
    .sample(progress);

    let transform = Transform::new()
        .rotate_x(spin(progress, particle.spin_rates.x, SPIN_MULTIPLIERS[0]))
        .rotate_y(spin(progress, particle.spin_rates.y, SPIN_MULTIPLIERS[1]))
        .rotate_z(spin(progress, particle.spin_rates.z, SPIN_MULTIPLIERS[2]))
        .translate_x(swing);

    ConfettiPiece {
        left,
        bottom,
        transform,
    }
}

/// Linear rotation from 0° at progress 0 to the axis total at progress 2
fn spin(progress: f32, rate: f32, multiplier: f32) -> f32 {
    interpolate(progress, &[0.0, 2.0], &[0.0, rate * 360.0 * multiplier])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::SpinRates;
    use confetti_core::transform::Axis;

    const VIEWPORT: Size = Size::new(400.0, 800.0);

    fn sample_particle() -> Particle {
        Particle {
            horizontal_target: 0.25,
            vertical_target: 0.8,
            swing_magnitude: 0.5,
            spin_rates: SpinRates {
                x: 0.5,
                y: 1.0,
                z: 0.4,
            },
        }
    }

    fn assert_approx(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_position_at_origin_before_burst() {
        let origin = Point::new(50.0, 100.0);
        let piece = place_particle(0.0, &sample_particle(), VIEWPORT, origin);

        assert_eq!(piece.left, 50.0);
        assert_eq!(piece.bottom, 100.0);
    }

    #[test]
    fn test_apex_at_explosion_complete() {
        let piece = place_particle(1.0, &sample_particle(), VIEWPORT, Point::ZERO);

        assert_approx(piece.left, 0.25 * 400.0);
        assert_approx(piece.bottom, 0.8 * 800.0);
    }

    #[test]
    fn test_resting_state_at_completion() {
        let particle = sample_particle();
        let piece = place_particle(2.0, &particle, VIEWPORT, Point::new(50.0, 100.0));

        assert_approx(piece.left, 0.25 * 400.0);
        assert_eq!(piece.bottom, 0.0);
        assert_approx(piece.transform.rotation(Axis::X).unwrap(), 0.5 * 360.0 * 10.0);
        assert_approx(piece.transform.rotation(Axis::Y).unwrap(), 1.0 * 360.0 * 5.0);
        assert_approx(piece.transform.rotation(Axis::Z).unwrap(), 0.4 * 360.0 * 2.0);
        assert_approx(piece.transform.translation_x(), 0.0);
    }

    #[test]
    fn test_floor_reached_before_fall_ends() {
        let particle = sample_particle();

        // This particle lands at progress 1 + 0.8; bottom stays 0 afterwards
        let landing = place_particle(1.8, &particle, VIEWPORT, Point::ZERO);
        assert_approx(landing.bottom, 0.0);

        let later = place_particle(1.9, &particle, VIEWPORT, Point::ZERO);
        assert_eq!(later.bottom, 0.0);

        // Still airborne shortly before the landing checkpoint
        let airborne = place_particle(1.7, &particle, VIEWPORT, Point::ZERO);
        assert!(airborne.bottom > 0.0);
    }

    #[test]
    fn test_swing_shape() {
        let particle = sample_particle();
        let swing_at = |progress: f32| {
            place_particle(progress, &particle, VIEWPORT, Point::ZERO)
                .transform
                .translation_x()
        };

        // Zero at rest points; the oscillation crosses zero mid-fall
        assert_eq!(swing_at(0.0), 0.0);
        assert_approx(swing_at(0.8), 0.0);
        assert_approx(swing_at(2.0), 0.0);

        // Extremes at the swing checkpoints, scaled by the magnitude
        assert_approx(swing_at(0.4), -15.0);
        assert_approx(swing_at(1.2), 15.0);
    }

    #[test]
    fn test_horizontal_holds_through_fall() {
        let particle = sample_particle();

        for progress in [1.0, 1.3, 1.6, 2.0] {
            let piece = place_particle(progress, &particle, VIEWPORT, Point::new(50.0, 0.0));
            assert_approx(piece.left, 100.0);
        }
    }

    #[test]
    fn test_spin_midpoint_regression() {
        // spin rate 0.5 on the x axis: 1800° total, linear in progress
        let piece = place_particle(1.0, &sample_particle(), VIEWPORT, Point::ZERO);
        assert_approx(piece.transform.rotation(Axis::X).unwrap(), 900.0);
    }
}
