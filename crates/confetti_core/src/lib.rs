//! Confetti Core
//!
//! Foundational types shared by the animation engine and the widget layer:
//!
//! - **Geometry**: `Point` and `Size` for origins and viewports
//! - **Transforms**: ordered lists of visual transform operations (per-axis
//!   rotation, horizontal translation) handed to the host renderer
//!
//! # Example
//!
//! ```rust
//! use confetti_core::{Point, Size, Transform};
//!
//! let origin = Point::new(50.0, 100.0);
//! let viewport = Size::new(390.0, 844.0);
//!
//! let transform = Transform::new()
//!     .rotate_x(180.0)
//!     .rotate_z(45.0)
//!     .translate_x(-12.0);
//! assert_eq!(transform.ops().len(), 3);
//! assert!(viewport.width > origin.x);
//! ```

pub mod geometry;
pub mod transform;

pub use geometry::{Point, Size};
pub use transform::{Axis, Transform, TransformOp};
