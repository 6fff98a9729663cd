use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ActorState, EntitySnapshot};

/// Raw timing readings from the environment for one tick.
///
/// A zeroed sample (`cycle_total == 0.0`) means the environment had no timing
/// data (e.g., the agent is not in combat). The cycle tracker treats that as
/// "safe to act", never as an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TimingSample {
    /// Seconds elapsed since the previous sample
    pub elapsed_secs: f32,

    /// Whether the agent is inside a multi-tick cast
    pub in_cast: bool,

    /// Total length of the current primary-action cycle (0.0 = no data)
    pub cycle_total: f32,

    /// Seconds of the current cycle already elapsed
    pub cycle_elapsed: f32,

    /// Seconds of animation lock remaining from the last issued action
    pub lock_remaining: f32,
}

/// Everything the engine consumes for one tick, assembled by the
/// environment reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickInput {
    pub timestamp: NaiveDateTime,
    pub timing: TimingSample,
    pub actor: ActorState,
    pub party: Vec<EntitySnapshot>,
    #[serde(default)]
    pub enemies: Vec<EntitySnapshot>,
}
