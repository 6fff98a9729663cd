//! Action timing state machine
//!
//! Tracks the primary-action cooldown cycle and animation lock:
//! - Ready: a primary action may be issued
//! - Rolling: cycle in progress, no weave room left
//! - WeaveWindow: cycle in progress with room for secondary actions
//! - Casting: inside a multi-tick cast
//! - Locked: animation lock from the last action still running
//!
//! Transitions are driven solely by elapsed-time observations from the
//! environment, never by module decisions. When the environment reports no
//! timing data (e.g., not in combat) the machine reports Ready with zero
//! remaining: "safe to act", never an error.

mod cycle;

#[cfg(test)]
mod cycle_tests;

pub use cycle::{
    CyclePhase, CycleTracker, DEFAULT_CYCLE_SECS, MAX_WEAVES_PER_CYCLE, WEAVE_LOCK_SECS,
    WEAVE_SAFETY_BUFFER_SECS,
};
