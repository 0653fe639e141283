//! Simulation clock and tick-evaluated timers
//!
//! Timers are deadlines checked once per frame instead of host callbacks,
//! so they always fire in a known order relative to entity updates.

/// Elapsed simulation time
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    /// Milliseconds since the simulation started
    pub now_ms: f64,
    /// Frames processed
    pub frame: u64,
}

impl SimClock {
    /// Advance by one frame of `dt_ms`; negative or non-finite deltas only count the frame
    pub fn advance(&mut self, dt_ms: f64) {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.now_ms += dt_ms;
        }
        self.frame += 1;
    }
}

/// Shortest repeat interval
pub const MIN_PERIOD_MS: f64 = 1.0;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Raise the warp speed multiplier
    WarpRamp,
    /// End the hyperspace jump
    WarpDisengage,
}

#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub due_ms: f64,
    /// Re-arm interval for repeating tasks
    pub period_ms: Option<f64>,
    pub kind: TaskKind,
}

/// Pending timers
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    tasks: Vec<ScheduledTask>,
}

impl Schedule {
    pub fn schedule_once(&mut self, kind: TaskKind, due_ms: f64) {
        self.tasks.push(ScheduledTask {
            due_ms,
            period_ms: None,
            kind,
        });
    }

    /// First firing one period after `now_ms`; periods floor at `MIN_PERIOD_MS`
    pub fn schedule_every(&mut self, kind: TaskKind, now_ms: f64, period_ms: f64) {
        let period_ms = period_ms.max(MIN_PERIOD_MS);
        self.tasks.push(ScheduledTask {
            due_ms: now_ms + period_ms,
            period_ms: Some(period_ms),
            kind,
        });
    }

    /// Drop every pending task of this kind
    pub fn cancel(&mut self, kind: TaskKind) {
        self.tasks.retain(|t| t.kind != kind);
    }

    pub fn pending(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pop the earliest task due at or before `now_ms`
    ///
    /// Repeating tasks are re-armed one period later and stay pending until
    /// cancelled, so a long frame yields one firing per elapsed period. Ties
    /// go to the task scheduled first.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<TaskKind> {
        let (idx, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by(|(ia, a), (ib, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(ia.cmp(ib))
            })?;

        let kind = self.tasks[idx].kind;
        match self.tasks[idx].period_ms {
            Some(period) => self.tasks[idx].due_ms += period,
            None => {
                self.tasks.remove(idx);
            }
        }
        Some(kind)
    }
}
