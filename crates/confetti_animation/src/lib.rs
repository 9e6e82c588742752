//! Confetti Animation Engine
//!
//! Scripted sequences, easing, and checkpoint interpolation.
//!
//! # Features
//!
//! - **Easing**: quadratic and cubic curves applied to step-local progress
//! - **Checkpoint Interpolation**: piecewise mapping from a progress scalar
//!   over a checkpoint list to an output list, with held edges
//! - **Sequences**: one-shot scripted step chains over a single scalar
//! - **Scheduler**: slotmap registry ticking every registered sequence, with
//!   an optional 120fps background thread and redraw signaling
//!
//! The progress scalar driving a confetti burst is a `Sequence` of three
//! steps (instant reset, eased explosion, eased fall); every particle's
//! visual transform is a pure function of that scalar via `Interpolation`
//! mappings.

pub mod easing;
pub mod interpolate;
pub mod scheduler;
pub mod sequence;

pub use easing::Easing;
pub use interpolate::{interpolate, Interpolate, Interpolation};
pub use scheduler::{
    get_scheduler, is_scheduler_initialized, set_global_scheduler, try_get_scheduler,
    AnimatedSequence, AnimationScheduler, SchedulerHandle, SequenceId, WakeCallback,
};
pub use sequence::{Sequence, Step};
