/// Whole-second countdown used for the pre-round count and the round clock.
///
/// The timer knows nothing about wall time: its owner calls `tick()` once per
/// elapsed second (see `schedule`) and simply stops calling it while paused.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// Timer is stopped; nothing happened.
    Idle,
    /// One second elapsed, `remaining` is still at least 1.
    Running { remaining: u32 },
    /// Remaining dropped below 1 on this tick. Reported exactly once.
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    start: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// A stopped timer that will count down from `start` once reset.
    pub fn new(start: u32) -> Self {
        Countdown {
            start,
            remaining: start,
            running: false,
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.start;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Restore the start value without starting the clock.
    pub fn rewind(&mut self) {
        self.remaining = self.start;
        self.running = false;
    }

    pub fn tick(&mut self) -> TickResult {
        if !self.running {
            return TickResult::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining < 1 {
            self.running = false;
            TickResult::Expired
        } else {
            TickResult::Running {
                remaining: self.remaining,
            }
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn start_value(&self) -> u32 {
        self.start
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
