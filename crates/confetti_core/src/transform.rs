//! Visual transform operations
//!
//! A `Transform` is an ordered list of operations applied by the host
//! renderer in sequence. Order matters: rotations compose before the
//! lateral translation so the swing offset is not itself rotated.

use smallvec::SmallVec;

/// A single transform operation
///
/// Rotation angles are in degrees; the renderer converts as needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// Rotation around the horizontal axis (degrees)
    RotateX(f32),
    /// Rotation around the vertical axis (degrees)
    RotateY(f32),
    /// Rotation in the screen plane (degrees)
    RotateZ(f32),
    /// Horizontal translation (logical pixels)
    TranslateX(f32),
}

/// An ordered sequence of transform operations
///
/// Backed by an inline vector sized for the common case (three rotations
/// plus one translation).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transform {
    ops: SmallVec<[TransformOp; 4]>,
}

impl Transform {
    /// Create an empty (identity) transform
    pub fn new() -> Self {
        Self {
            ops: SmallVec::new(),
        }
    }

    /// Append a rotation around the X axis (degrees)
    pub fn rotate_x(mut self, degrees: f32) -> Self {
        self.ops.push(TransformOp::RotateX(degrees));
        self
    }

    /// Append a rotation around the Y axis (degrees)
    pub fn rotate_y(mut self, degrees: f32) -> Self {
        self.ops.push(TransformOp::RotateY(degrees));
        self
    }

    /// Append a rotation around the Z axis (degrees)
    pub fn rotate_z(mut self, degrees: f32) -> Self {
        self.ops.push(TransformOp::RotateZ(degrees));
        self
    }

    /// Append a horizontal translation (logical pixels)
    pub fn translate_x(mut self, offset: f32) -> Self {
        self.ops.push(TransformOp::TranslateX(offset));
        self
    }

    /// The operations in application order
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Check whether this transform has no operations
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Net horizontal translation across all ops
    pub fn translation_x(&self) -> f32 {
        self.ops
            .iter()
            .map(|op| match op {
                TransformOp::TranslateX(dx) => *dx,
                _ => 0.0,
            })
            .sum()
    }

    /// Rotation around a given axis, if one was recorded
    ///
    /// Returns the first matching rotation; the widget records at most one
    /// per axis.
    pub fn rotation(&self, axis: Axis) -> Option<f32> {
        self.ops.iter().find_map(|op| match (axis, op) {
            (Axis::X, TransformOp::RotateX(deg)) => Some(*deg),
            (Axis::Y, TransformOp::RotateY(deg)) => Some(*deg),
            (Axis::Z, TransformOp::RotateZ(deg)) => Some(*deg),
            _ => None,
        })
    }
}

/// Rotation axis selector for [`Transform::rotation`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_builds_in_order() {
        let t = Transform::new().rotate_x(90.0).rotate_z(45.0).translate_x(-6.0);

        assert_eq!(
            t.ops(),
            &[
                TransformOp::RotateX(90.0),
                TransformOp::RotateZ(45.0),
                TransformOp::TranslateX(-6.0),
            ]
        );
    }

    #[test]
    fn test_identity() {
        assert!(Transform::new().is_identity());
        assert!(!Transform::new().rotate_y(10.0).is_identity());
    }

    #[test]
    fn test_accessors() {
        let t = Transform::new().rotate_y(720.0).translate_x(12.0);

        assert_eq!(t.rotation(Axis::Y), Some(720.0));
        assert_eq!(t.rotation(Axis::X), None);
        assert!((t.translation_x() - 12.0).abs() < 1e-6);
    }
}
