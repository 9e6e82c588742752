//! Confetti Explosion Widget
//!
//! A one-shot confetti burst for the host UI framework: a fixed number of
//! particles with randomized motion parameters, one shared progress scalar
//! driven through reset, explosion, and fall phases, and a pure per-frame
//! mapping from that scalar to each particle's position and transform.
//!
//! # Example
//!
//! ```ignore
//! use confetti_animation::AnimationScheduler;
//! use confetti_core::{Point, Size};
//! use confetti_widget::explosion;
//!
//! let mut scheduler = AnimationScheduler::new();
//! scheduler.start_background();
//!
//! let mut cannon = explosion(150, Point::new(-10.0, 0.0));
//! cannon.mount(scheduler.handle());
//!
//! // On each frame, after the scheduler has ticked:
//! for piece in cannon.render(Size::new(390.0, 844.0)) {
//!     // hand piece.left / piece.bottom / piece.transform to the painter
//! }
//! ```

pub mod explosion;
pub mod mapping;
pub mod particle;

pub use explosion::{explosion, Explosion};
pub use mapping::{place_particle, ConfettiPiece};
pub use particle::{generate, Particle, SpinRates, VERTICAL_TARGET_MIN};
