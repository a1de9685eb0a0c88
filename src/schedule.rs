/// Fixed-interval job scheduler driven by a single clock.
///
/// Each entry is an `(interval, phase, job)` triple. `advance(dt)` moves
/// every enabled entry's phase forward and returns the jobs that came due,
/// in entry order, once per elapsed interval. Dispatching them is the
/// caller's business, so the scheduler never borrows game state.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Job {
    CountdownTick,
    RoundTimerTick,
    SpawnFlower,
    SpawnBird,
    SpawnDarkBird,
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    interval: f32,
    phase: f32,
    enabled: bool,
    job: Job,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Schedule {
    entries: Vec<Entry>,
}

impl Schedule {
    pub fn new() -> Self {
        Schedule {
            entries: Vec::new(),
        }
    }

    /// Register `job` every `interval` seconds. Starts disabled.
    pub fn every(mut self, interval: f32, job: Job) -> Self {
        self.entries.push(Entry {
            interval: interval.max(f32::EPSILON),
            phase: 0.0,
            enabled: false,
            job,
        });
        self
    }

    /// Enable or disable a job. Either way its phase restarts at zero.
    pub fn set_enabled(&mut self, job: Job, enabled: bool) {
        for entry in self.entries.iter_mut().filter(|e| e.job == job) {
            entry.enabled = enabled;
            entry.phase = 0.0;
        }
    }

    pub fn disable_all(&mut self) {
        for entry in &mut self.entries {
            entry.enabled = false;
            entry.phase = 0.0;
        }
    }

    pub fn is_enabled(&self, job: Job) -> bool {
        self.entries.iter().any(|e| e.job == job && e.enabled)
    }

    pub fn advance(&mut self, dt: f32) -> Vec<Job> {
        let mut due = Vec::new();
        if dt <= 0.0 {
            return due;
        }
        for entry in self.entries.iter_mut().filter(|e| e.enabled) {
            entry.phase += dt;
            while entry.phase >= entry.interval {
                entry.phase -= entry.interval;
                due.push(entry.job);
            }
        }
        due
    }
}
