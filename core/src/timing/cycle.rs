use crate::snapshot::TimingSample;

/// Animation lock of a typical secondary action (seconds).
pub const WEAVE_LOCK_SECS: f32 = 0.6;

/// Safety buffer kept between the last weave and the next primary action
/// (seconds). Covers observation jitter between environment samples.
pub const WEAVE_SAFETY_BUFFER_SECS: f32 = 0.1;

/// Hard cap on secondary actions per cycle.
pub const MAX_WEAVES_PER_CYCLE: u8 = 2;

/// Cycle length assumed when a primary action is issued before the
/// environment has reported one (seconds).
pub const DEFAULT_CYCLE_SECS: f32 = 2.5;

const EPS: f32 = 1e-3;

/// Phase of the primary-action cycle. Exactly one phase is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePhase {
    /// A primary action may be issued
    #[default]
    Ready,
    /// Cycle running, no room left to weave
    Rolling,
    /// Cycle running with room for secondary actions
    WeaveWindow,
    /// Inside a multi-tick cast
    Casting,
    /// Animation lock from the last action still running
    Locked,
}

/// Tracks the primary-action cycle and the weave budget within it.
#[derive(Debug, Clone, Default)]
pub struct CycleTracker {
    phase: CyclePhase,
    cycle_total: f32,
    cycle_remaining: f32,
    lock_remaining: f32,
    in_cast: bool,
    weaves_used: u8,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state machine from a fresh environment sample.
    ///
    /// Detects cycle rollover two ways: the remaining time reaching zero, or
    /// the remaining time *increasing* between samples (a new primary action
    /// started between observations). Both reset the weave count.
    pub fn observe(&mut self, sample: &TimingSample) {
        if sample.cycle_total <= 0.0 {
            // No timing data - conservative defaults, safe to act
            self.phase = CyclePhase::Ready;
            self.cycle_total = 0.0;
            self.cycle_remaining = 0.0;
            self.lock_remaining = 0.0;
            self.in_cast = sample.in_cast;
            self.weaves_used = 0;
            if self.in_cast {
                self.phase = CyclePhase::Casting;
            }
            return;
        }

        let remaining = (sample.cycle_total - sample.cycle_elapsed).max(0.0);

        if remaining > self.cycle_remaining + EPS || remaining <= EPS {
            self.weaves_used = 0;
        }

        self.cycle_total = sample.cycle_total;
        self.cycle_remaining = remaining;
        self.lock_remaining = sample.lock_remaining.max(0.0);
        self.in_cast = sample.in_cast;

        self.phase = if self.in_cast {
            CyclePhase::Casting
        } else if self.cycle_remaining <= EPS {
            CyclePhase::Ready
        } else if self.lock_remaining > WEAVE_SAFETY_BUFFER_SECS {
            CyclePhase::Locked
        } else if self.weave_budget() > self.weaves_used {
            CyclePhase::WeaveWindow
        } else {
            CyclePhase::Rolling
        };
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn cycle_remaining(&self) -> f32 {
        self.cycle_remaining
    }

    pub fn lock_remaining(&self) -> f32 {
        self.lock_remaining
    }

    pub fn weaves_used_this_cycle(&self) -> u8 {
        self.weaves_used
    }

    /// Whether a primary action may be issued right now.
    pub fn can_issue_primary(&self) -> bool {
        self.phase == CyclePhase::Ready
    }

    /// How many secondary actions still fit in this cycle without delaying
    /// the next primary action: `min(cap, floor((remaining - buffer) / lock))`.
    pub fn weave_budget(&self) -> u8 {
        // EPS keeps the boundary case (remaining == buffer + n*lock) legal
        // despite f32 rounding.
        let room = (self.cycle_remaining - WEAVE_SAFETY_BUFFER_SECS + EPS) / WEAVE_LOCK_SECS;
        if room <= 0.0 {
            return 0;
        }
        (room.floor() as u8).min(MAX_WEAVES_PER_CYCLE)
    }

    /// Whether a secondary action may be issued right now.
    pub fn can_issue_secondary(&self) -> bool {
        !self.in_cast
            && self.lock_remaining < WEAVE_SAFETY_BUFFER_SECS
            && self.weaves_used < self.weave_budget()
    }

    /// Whether issuing a secondary action with the given lock now would push
    /// past the end of the cycle and delay the next primary action.
    pub fn would_clip(&self, lock_duration: f32) -> bool {
        self.lock_remaining + lock_duration > self.cycle_remaining
    }

    /// Record a successfully issued primary action. The environment will
    /// report the fresh cycle next sample; this keeps the tracker coherent
    /// for the remainder of the current tick.
    pub fn note_primary_issued(&mut self, lock_secs: f32) {
        let total = if self.cycle_total > 0.0 {
            self.cycle_total
        } else {
            DEFAULT_CYCLE_SECS
        };
        self.cycle_total = total;
        self.cycle_remaining = total;
        self.lock_remaining = lock_secs.max(0.0);
        self.weaves_used = 0;
        self.phase = if self.lock_remaining > WEAVE_SAFETY_BUFFER_SECS {
            CyclePhase::Locked
        } else if self.weave_budget() > 0 {
            CyclePhase::WeaveWindow
        } else {
            CyclePhase::Rolling
        };
    }

    /// Record a successfully issued secondary action.
    pub fn note_secondary_issued(&mut self, lock_secs: f32) {
        self.weaves_used = self.weaves_used.saturating_add(1);
        self.lock_remaining = self.lock_remaining.max(lock_secs);
        if self.phase == CyclePhase::WeaveWindow {
            self.phase = if self.lock_remaining > WEAVE_SAFETY_BUFFER_SECS {
                CyclePhase::Locked
            } else if self.weaves_used < self.weave_budget() {
                CyclePhase::WeaveWindow
            } else {
                CyclePhase::Rolling
            };
        }
    }
}
