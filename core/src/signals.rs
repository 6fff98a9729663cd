//! Engine signals
//!
//! High-level "interesting things that happened" emitted during a tick, at a
//! higher level than raw decisions. Observers (the sim harness, future
//! overlays) drain them after each tick with `Engine::take_signals`.

use chrono::NaiveDateTime;

use crate::gateway::TargetRef;

/// Signals emitted by the engine for cross-cutting concerns.
#[derive(Debug, Clone)]
pub enum EngineSignal {
    /// A module committed and the gateway accepted the action
    ActionIssued {
        action_id: u64,
        action_name: &'static str,
        module: &'static str,
        target: TargetRef,
        timestamp: NaiveDateTime,
    },

    /// The gateway refused a committed action; the tick ended with no action
    ActionRejected {
        action_id: u64,
        action_name: &'static str,
        module: &'static str,
        timestamp: NaiveDateTime,
    },

    /// A pending heal aged out without ever being observed to land
    PendingHealExpired {
        target_id: i64,
        records: usize,
        timestamp: NaiveDateTime,
    },

    /// The offense combo advanced to its next step
    ComboAdvanced {
        step: &'static str,
        timestamp: NaiveDateTime,
    },

    /// The offense combo window lapsed and the chain reset
    ComboReset { timestamp: NaiveDateTime },
}
