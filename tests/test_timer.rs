use std::time::Duration;

use wall_shooter::timer::Timers;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Ev {
    A,
    B,
}

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}

#[test]
fn fires_once_deadline_is_reached() {
    let mut timers = Timers::new();
    let id = timers.schedule(secs(3.0), Ev::A);

    assert!(timers.advance(secs(2.0)).is_empty());
    assert!(timers.is_pending(id));

    let fired = timers.advance(secs(1.0));
    assert_eq!(fired, vec![(id, Ev::A)]);
    assert!(!timers.is_pending(id));
    assert!(timers.advance(secs(10.0)).is_empty());
}

#[test]
fn cancelled_timer_never_fires() {
    let mut timers = Timers::new();
    let id = timers.schedule(secs(1.0), Ev::A);
    assert!(timers.cancel(id));
    assert!(timers.advance(secs(5.0)).is_empty());
    assert!(!timers.cancel(id));
}

#[test]
fn due_events_come_out_earliest_first() {
    let mut timers = Timers::new();
    let late = timers.schedule(secs(2.0), Ev::B);
    let early = timers.schedule(secs(1.0), Ev::A);
    let fired = timers.advance(secs(5.0));
    assert_eq!(fired, vec![(early, Ev::A), (late, Ev::B)]);
}

#[test]
fn delay_counts_from_schedule_time() {
    let mut timers = Timers::new();
    timers.advance(secs(10.0));
    let id = timers.schedule(secs(1.0), Ev::A);
    assert!(timers.advance(secs(0.5)).is_empty());
    assert_eq!(timers.advance(secs(0.5)), vec![(id, Ev::A)]);
}

#[test]
fn clear_drops_everything() {
    let mut timers = Timers::new();
    let a = timers.schedule(secs(1.0), Ev::A);
    let b = timers.schedule(secs(2.0), Ev::B);
    timers.clear();
    assert!(!timers.is_pending(a));
    assert!(!timers.is_pending(b));
    assert!(timers.advance(secs(3.0)).is_empty());
}
