/// Slow-motion charges and the real-time window each one opens.
///
/// The expiry timer runs on real time: the controller itself lowers the
/// simulation time scale, so a simulation-time timer would stretch the window.

use log::{info, warn};

use crate::config::Tuning;
use crate::timer::{TimerId, Timers};

/// Events the slow-motion controller schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    SlowMotionExpired,
}

#[derive(Debug)]
pub struct SlowMotionController {
    scale: f32,
    duration: std::time::Duration,
    consumed_uses: u32,
    expiry: Option<TimerId>,
}

impl SlowMotionController {
    pub fn new(tuning: &Tuning) -> Self {
        SlowMotionController {
            scale: tuning.slow_motion_scale,
            duration: tuning.slow_motion_duration(),
            consumed_uses: 0,
            expiry: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.expiry.is_some()
    }

    pub fn consumed_uses(&self) -> u32 {
        self.consumed_uses
    }

    pub fn has_capacity(&self, max_uses: u32) -> bool {
        self.consumed_uses < max_uses
    }

    pub fn remaining_uses(&self, max_uses: u32) -> u32 {
        max_uses.saturating_sub(self.consumed_uses)
    }

    /// Time scale this controller asks for.
    pub fn time_scale(&self) -> f32 {
        if self.is_active() {
            self.scale
        } else {
            1.0
        }
    }

    /// Start a slow-motion window.  Returns `false`, changing nothing, when
    /// already active or out of charges.
    pub fn activate(&mut self, max_uses: u32, timers: &mut Timers<TimerEvent>) -> bool {
        if self.is_active() {
            return false;
        }
        if !self.has_capacity(max_uses) {
            warn!("Slow motion requested with no charges left");
            return false;
        }

        self.consumed_uses += 1;
        self.expiry = Some(timers.schedule(self.duration, TimerEvent::SlowMotionExpired));
        info!(
            "Slow motion on, {} of {} charges left",
            self.remaining_uses(max_uses),
            max_uses
        );
        true
    }

    /// End the window early or on expiry.  Returns `false` when inactive.
    pub fn deactivate(&mut self, timers: &mut Timers<TimerEvent>) -> bool {
        match self.expiry.take() {
            Some(id) => {
                timers.cancel(id);
                info!("Slow motion off");
                true
            }
            None => false,
        }
    }

    /// Handle a fired timer.  Stale ids from an earlier window are ignored.
    pub fn on_timer(&mut self, id: TimerId, timers: &mut Timers<TimerEvent>) -> bool {
        if self.expiry == Some(id) {
            self.deactivate(timers)
        } else {
            false
        }
    }

    /// Refill all charges.
    pub fn reset_consumed_uses(&mut self) {
        self.consumed_uses = 0;
    }
}
