//! Headless confetti cannon demo
//!
//! Runs the scheduler in background mode the way a host app would: the
//! 120fps animation thread advances the burst and raises the redraw flag,
//! while this (main) thread plays the render loop, sampling placements
//! whenever a redraw is signaled. Run with:
//!
//! ```sh
//! cargo run -p confetti_widget --example cannon_demo
//! ```

use std::thread;
use std::time::Duration;

use confetti_animation::{get_scheduler, set_global_scheduler, AnimationScheduler};
use confetti_core::{Point, Size};
use confetti_widget::explosion;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let viewport = Size::new(390.0, 844.0);

    let mut scheduler = AnimationScheduler::new();
    scheduler.start_background();
    set_global_scheduler(scheduler.handle());

    let mut cannon = explosion(20, Point::new(0.0, 0.0));
    cannon.mount(get_scheduler());

    println!("generated {} particles, burst begins shortly", cannon.particles().len());

    let mut frame = 0u32;
    while cannon.is_animating() {
        if scheduler.take_needs_redraw() {
            if frame % 30 == 0 {
                if let Some(piece) = cannon.render(viewport).first() {
                    println!(
                        "progress {:.3}  first piece: left {:7.2}  bottom {:7.2}",
                        cannon.progress(),
                        piece.left,
                        piece.bottom
                    );
                }
            }
            frame += 1;
        }
        thread::sleep(Duration::from_millis(8));
    }

    scheduler.stop_background();

    let pieces = cannon.render(viewport);
    let landed = pieces.iter().filter(|p| p.bottom == 0.0).count();
    println!("burst complete: {landed}/{} pieces at rest", pieces.len());
}
