/// Deferred callbacks measured in real elapsed time.
///
/// Nothing runs on its own: the per-frame driver calls [`Timers::advance`]
/// with the real (unscaled) frame time and handles whatever fired.  A
/// cancelled timer never fires.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<E> {
    id: TimerId,
    deadline: Duration,
    event: E,
}

#[derive(Debug)]
pub struct Timers<E> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Timers {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<E> Timers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once `delay` of real time has passed.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            deadline: self.now + delay,
            event,
        });
        id
    }

    /// Returns `false` if the timer already fired or was cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Move the clock forward and return the events that came due, earliest first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TimerId, E)> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.deadline <= now);
        self.pending = waiting;

        due.sort_by_key(|p| (p.deadline, p.id.0));
        due.into_iter().map(|p| (p.id, p.event)).collect()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
