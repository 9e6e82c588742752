//! Animation scheduler
//!
//! Manages all active sequences and advances them each frame. Sequences are
//! implicitly registered when created through the `AnimatedSequence` wrapper
//! and removed when the wrapper drops, which is how an abandoned widget's
//! animation dies with it.

use crate::sequence::Sequence;
use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

// ============================================================================
// Global Animation Scheduler State
// ============================================================================

/// Global scheduler handle for access from anywhere in the application
static GLOBAL_SCHEDULER: OnceLock<SchedulerHandle> = OnceLock::new();

/// Set the global animation scheduler handle
///
/// This should be called once at app startup after creating the
/// `AnimationScheduler`.
///
/// # Panics
///
/// Panics if called more than once.
pub fn set_global_scheduler(handle: SchedulerHandle) {
    if GLOBAL_SCHEDULER.set(handle).is_err() {
        panic!("set_global_scheduler() called more than once");
    }
}

/// Get the global animation scheduler handle
///
/// # Panics
///
/// Panics if `set_global_scheduler()` has not been called.
pub fn get_scheduler() -> SchedulerHandle {
    GLOBAL_SCHEDULER
        .get()
        .expect("Animation scheduler not initialized. Call set_global_scheduler() at app startup.")
        .clone()
}

/// Try to get the global scheduler (returns None if not initialized)
pub fn try_get_scheduler() -> Option<SchedulerHandle> {
    GLOBAL_SCHEDULER.get().cloned()
}

/// Check if the global scheduler has been initialized
pub fn is_scheduler_initialized() -> bool {
    GLOBAL_SCHEDULER.get().is_some()
}

new_key_type! {
    /// Handle to a registered sequence
    pub struct SequenceId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    sequences: SlotMap<SequenceId, Sequence>,
    last_frame: Instant,
}

/// Callback type for waking up the main thread from the animation thread
///
/// Called when there are active sequences that need to be rendered. The
/// callback should wake up the event loop (e.g., via an event-loop proxy).
pub type WakeCallback = Arc<dyn Fn() + Send + Sync>;

/// The animation scheduler that ticks all active sequences
///
/// Typically held by the application context and shared via
/// `SchedulerHandle`. Sequences register themselves implicitly when created
/// through `AnimatedSequence`.
///
/// # Background Thread Mode
///
/// The scheduler can run on its own background thread via
/// `start_background()`, which keeps animations advancing even when the
/// window loses focus.
///
/// ```ignore
/// let mut scheduler = AnimationScheduler::new();
/// scheduler.start_background(); // Runs at 120fps in background thread
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    /// Stop signal for the background thread
    stop_flag: Arc<AtomicBool>,
    /// Set by the background thread when active sequences need a redraw
    needs_redraw: Arc<AtomicBool>,
    /// Background thread handle (if running)
    thread_handle: Option<JoinHandle<()>>,
    /// Optional callback to wake up the main thread
    wake_callback: Option<WakeCallback>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                sequences: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
            stop_flag: Arc::new(AtomicBool::new(false)),
            needs_redraw: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
            wake_callback: None,
        }
    }

    /// Set a wake callback invoked from the background thread while
    /// sequences are active
    pub fn set_wake_callback<F>(&mut self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.wake_callback = Some(Arc::new(callback));
    }

    /// Start the scheduler on a background thread
    ///
    /// The thread sets the `needs_redraw` flag whenever sequences are
    /// active; the main thread should call `take_needs_redraw()` and request
    /// a window redraw when it returns true.
    pub fn start_background(&mut self) {
        if self.thread_handle.is_some() {
            return; // Already running
        }

        let inner = Arc::clone(&self.inner);
        let stop_flag = Arc::clone(&self.stop_flag);
        let needs_redraw = Arc::clone(&self.needs_redraw);
        let wake_callback = self.wake_callback.clone();

        tracing::debug!("AnimationScheduler: starting background thread");

        self.thread_handle = Some(thread::spawn(move || {
            let frame_duration = Duration::from_micros(1_000_000 / 120); // 120fps

            while !stop_flag.load(Ordering::Relaxed) {
                let start = Instant::now();

                let has_active = {
                    let mut inner = inner.lock().unwrap();
                    let now = Instant::now();
                    let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
                    inner.last_frame = now;

                    for (_, sequence) in inner.sequences.iter_mut() {
                        sequence.tick(dt_ms);
                    }

                    // NOTE: Finished sequences are not removed here. They are
                    // only removed when their AnimatedSequence wrapper drops,
                    // so a completed animation can still be sampled.
                    inner.sequences.iter().any(|(_, s)| s.is_playing())
                };

                if has_active {
                    needs_redraw.store(true, Ordering::Release);

                    if let Some(ref callback) = wake_callback {
                        // Only log occasionally to avoid spam
                        static COUNTER: std::sync::atomic::AtomicU64 =
                            std::sync::atomic::AtomicU64::new(0);
                        let count = COUNTER.fetch_add(1, Ordering::Relaxed);
                        if count % 120 == 0 {
                            // Once per second at 120fps
                            tracing::debug!("Animation thread: waking event loop");
                        }
                        callback();
                    }
                }

                // Sleep for remaining frame time
                let elapsed = start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        }));
    }

    /// Stop the background thread
    pub fn stop_background(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        self.stop_flag.store(false, Ordering::Relaxed);
    }

    /// Check if the background thread is running
    pub fn is_background_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// Check and clear the needs_redraw flag
    ///
    /// Atomic swap: returns the previous value and clears the flag in one
    /// operation.
    pub fn take_needs_redraw(&self) -> bool {
        self.needs_redraw.swap(false, Ordering::Acquire)
    }

    /// Manually request a redraw
    pub fn request_redraw(&self) {
        self.needs_redraw.store(true, Ordering::Release);
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Tick all sequences by the elapsed wall-clock time
    ///
    /// Returns true if any sequences are still active (need another tick).
    pub fn tick(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let now = Instant::now();
        let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
        inner.last_frame = now;

        for (_, sequence) in inner.sequences.iter_mut() {
            sequence.tick(dt_ms);
        }

        inner.sequences.iter().any(|(_, s)| s.is_playing())
    }

    /// Check if any sequences are still active
    pub fn has_active_animations(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.sequences.iter().any(|(_, s)| s.is_playing())
    }

    /// Get the number of registered sequences
    pub fn sequence_count(&self) -> usize {
        self.inner.lock().unwrap().sequences.len()
    }

    // =========================================================================
    // Direct Sequence Access (for advanced use cases)
    // =========================================================================

    pub fn add_sequence(&self, sequence: Sequence) -> SequenceId {
        self.inner.lock().unwrap().sequences.insert(sequence)
    }

    pub fn get_sequence_value(&self, id: SequenceId) -> Option<f32> {
        self.inner
            .lock()
            .unwrap()
            .sequences
            .get(id)
            .map(|s| s.value())
    }

    pub fn start_sequence(&self, id: SequenceId) {
        if let Some(sequence) = self.inner.lock().unwrap().sequences.get_mut(id) {
            sequence.start();
        }
    }

    pub fn stop_sequence(&self, id: SequenceId) {
        if let Some(sequence) = self.inner.lock().unwrap().sequences.get_mut(id) {
            sequence.stop();
        }
    }

    pub fn remove_sequence(&self, id: SequenceId) -> Option<Sequence> {
        self.inner.lock().unwrap().sequences.remove(id)
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        // Stop background thread when scheduler is dropped
        self.stop_background();
    }
}

/// A weak handle to the animation scheduler
///
/// Passed to components that need to register sequences. It won't prevent
/// the scheduler from being dropped; every operation degrades to a no-op
/// (or `None`) once the scheduler is gone.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a sequence and return its ID
    pub fn register_sequence(&self, sequence: Sequence) -> Option<SequenceId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = inner.lock().unwrap();
            // Reset last_frame to now to prevent a huge dt on first tick
            guard.last_frame = Instant::now();
            guard.sequences.insert(sequence)
        })
    }

    /// Start a sequence
    pub fn start_sequence(&self, id: SequenceId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(sequence) = inner.lock().unwrap().sequences.get_mut(id) {
                sequence.start();
            }
        }
    }

    /// Stop a sequence
    pub fn stop_sequence(&self, id: SequenceId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(sequence) = inner.lock().unwrap().sequences.get_mut(id) {
                sequence.stop();
            }
        }
    }

    /// Remove a sequence
    pub fn remove_sequence(&self, id: SequenceId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().sequences.remove(id);
        }
    }

    /// Get a sequence's current scalar value
    pub fn get_sequence_value(&self, id: SequenceId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().sequences.get(id).map(|s| s.value()))
    }

    /// Check if a sequence is playing
    pub fn is_sequence_playing(&self, id: SequenceId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .lock()
                    .unwrap()
                    .sequences
                    .get(id)
                    .map(|s| s.is_playing())
            })
            .unwrap_or(false)
    }

    /// Check if a sequence has run to completion
    pub fn is_sequence_finished(&self, id: SequenceId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .lock()
                    .unwrap()
                    .sequences
                    .get(id)
                    .map(|s| s.is_finished())
            })
            .unwrap_or(false)
    }

    /// Apply a function to a sequence if it exists
    pub fn with_sequence<F, R>(&self, id: SequenceId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Sequence) -> R,
    {
        self.inner.upgrade().and_then(|inner| {
            inner
                .lock()
                .unwrap()
                .sequences
                .get_mut(id)
                .map(|sequence| f(sequence))
        })
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Sequence
// ============================================================================

/// A sequence that automatically registers with the scheduler
///
/// Registered on creation and removed when dropped, so tearing down the
/// owning widget abandons the animation wholesale.
///
/// # Example
///
/// ```ignore
/// use confetti_animation::{AnimatedSequence, Easing, Sequence};
///
/// let anim = AnimatedSequence::new(
///     handle,
///     Sequence::new()
///         .step(0.0, 0, Easing::Linear)
///         .step(1.0, 350, Easing::EaseOutCubic),
/// );
/// anim.start();
/// let progress = anim.value();
/// ```
pub struct AnimatedSequence {
    handle: SchedulerHandle,
    sequence_id: Option<SequenceId>,
    /// Value reported if the scheduler is gone
    fallback: f32,
}

impl AnimatedSequence {
    /// Register a sequence with the scheduler
    pub fn new(handle: SchedulerHandle, sequence: Sequence) -> Self {
        let fallback = sequence.value();
        let sequence_id = handle.register_sequence(sequence);
        Self {
            handle,
            sequence_id,
            fallback,
        }
    }

    /// Start (or restart) the sequence
    pub fn start(&self) {
        if let Some(id) = self.sequence_id {
            self.handle.start_sequence(id);
        }
    }

    /// Stop the sequence without completing it
    pub fn stop(&self) {
        if let Some(id) = self.sequence_id {
            self.handle.stop_sequence(id);
        }
    }

    /// The shared scalar's current value
    pub fn value(&self) -> f32 {
        self.sequence_id
            .and_then(|id| self.handle.get_sequence_value(id))
            .unwrap_or(self.fallback)
    }

    /// Check if the sequence is playing (including its pre-roll delay)
    pub fn is_playing(&self) -> bool {
        self.sequence_id
            .map(|id| self.handle.is_sequence_playing(id))
            .unwrap_or(false)
    }

    /// Check if the sequence has run to its terminal value
    pub fn is_finished(&self) -> bool {
        self.sequence_id
            .map(|id| self.handle.is_sequence_finished(id))
            .unwrap_or(false)
    }

    /// Overall progress through delay plus steps (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        self.sequence_id
            .and_then(|id| self.handle.with_sequence(id, |s| s.progress()))
            .unwrap_or(0.0)
    }
}

impl Drop for AnimatedSequence {
    fn drop(&mut self) {
        if let Some(id) = self.sequence_id {
            self.handle.remove_sequence(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use std::sync::atomic::AtomicU64;

    fn two_phase() -> Sequence {
        Sequence::new()
            .step(0.0, 0, Easing::Linear)
            .step(1.0, 350, Easing::EaseOutCubic)
            .step(2.0, 3000, Easing::EaseInCubic)
    }

    #[test]
    fn test_scheduler_tick() {
        let scheduler = AnimationScheduler::new();

        let mut sequence = two_phase();
        sequence.start();
        let id = scheduler.add_sequence(sequence);

        // Let a little wall-clock time pass so dt is nonzero
        std::thread::sleep(Duration::from_millis(5));
        scheduler.tick();

        let value = scheduler.get_sequence_value(id).unwrap();
        assert!(value > 0.0);
    }

    #[test]
    fn test_animated_sequence() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let anim = AnimatedSequence::new(handle, two_phase());
        assert!(!anim.is_playing());
        assert_eq!(anim.value(), 0.0);

        anim.start();
        assert!(anim.is_playing());

        std::thread::sleep(Duration::from_millis(5));
        scheduler.tick();
        assert!(anim.value() > 0.0);
    }

    #[test]
    fn test_wrapper_drop_removes_sequence() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        {
            let _anim = AnimatedSequence::new(handle, two_phase());
            assert_eq!(scheduler.sequence_count(), 1);
        }
        assert_eq!(scheduler.sequence_count(), 0);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        // Scheduler is dropped, handle should not be alive
        assert!(!handle.is_alive());

        // Operations should safely no-op
        assert!(handle.register_sequence(two_phase()).is_none());

        let anim = AnimatedSequence::new(handle, two_phase());
        anim.start();
        assert_eq!(anim.value(), 0.0);
        assert!(!anim.is_playing());
    }

    #[test]
    fn test_finished_sequence_remains_sampleable() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let mut sequence = two_phase();
        sequence.start();
        let id = scheduler.add_sequence(sequence);

        // Drive past the full script deterministically
        handle.with_sequence(id, |s| s.tick(5000.0));

        assert!(handle.is_sequence_finished(id));
        assert!(!handle.is_sequence_playing(id));
        assert_eq!(handle.get_sequence_value(id), Some(2.0));

        // Finished sequences stay registered until explicitly removed
        assert_eq!(scheduler.sequence_count(), 1);
    }

    #[test]
    fn test_background_thread_ticks_and_signals_redraw() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.start_background();
        assert!(scheduler.is_background_running());

        let anim = AnimatedSequence::new(scheduler.handle(), two_phase());
        anim.start();

        // Give the 120fps thread a few frames to advance the sequence
        std::thread::sleep(Duration::from_millis(50));

        assert!(scheduler.take_needs_redraw());
        assert!(anim.value() > 0.0);
        assert!(anim.is_playing());

        scheduler.stop_background();
        assert!(!scheduler.is_background_running());

        // Flag was cleared by the swap and nothing is ticking anymore
        scheduler.take_needs_redraw();
        assert!(!scheduler.take_needs_redraw());
    }

    #[test]
    fn test_background_thread_idle_without_active_sequences() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.start_background();

        // Registered but never started: nothing to animate
        let _anim = AnimatedSequence::new(scheduler.handle(), two_phase());

        std::thread::sleep(Duration::from_millis(50));
        assert!(!scheduler.take_needs_redraw());

        scheduler.stop_background();
    }

    #[test]
    fn test_wake_callback_fires_while_active() {
        let wakes = Arc::new(AtomicU64::new(0));

        let mut scheduler = AnimationScheduler::new();
        let counter = Arc::clone(&wakes);
        scheduler.set_wake_callback(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        scheduler.start_background();

        let anim = AnimatedSequence::new(scheduler.handle(), two_phase());
        anim.start();

        std::thread::sleep(Duration::from_millis(50));
        scheduler.stop_background();

        assert!(wakes.load(Ordering::Relaxed) > 0);
    }

    #[test]
    fn test_request_redraw_sets_flag() {
        let scheduler = AnimationScheduler::new();
        assert!(!scheduler.take_needs_redraw());

        scheduler.request_redraw();
        assert!(scheduler.take_needs_redraw());
        assert!(!scheduler.take_needs_redraw());
    }

    #[test]
    fn test_global_scheduler_registration() {
        // The one test that touches the process-global handle
        let scheduler = AnimationScheduler::new();
        set_global_scheduler(scheduler.handle());

        assert!(is_scheduler_initialized());
        assert!(try_get_scheduler().is_some());

        // Components reach the scheduler without explicit handle passing
        let anim = AnimatedSequence::new(get_scheduler(), two_phase());
        anim.start();
        assert_eq!(scheduler.sequence_count(), 1);

        std::thread::sleep(Duration::from_millis(5));
        scheduler.tick();
        assert!(anim.value() > 0.0);
    }
}
