use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Position, StatusEffect};

/// Per-action readiness as observed from the environment.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActionReadiness {
    /// Seconds until the action (or its next charge) comes off recast
    pub remaining_secs: f32,

    /// Charges currently available
    pub charges: u8,
}

/// Per-tick view of the controlled agent itself.
///
/// Resources (mana, gauge stacks) and action readiness are environment-owned;
/// the engine reads them fresh each tick and never extrapolates spent
/// resources forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorState {
    pub id: i64,
    pub level: u8,

    pub mana: i64,
    pub max_mana: i64,

    /// Gauge stacks (e.g., tactical-advantage charges), 0..=3
    #[serde(default)]
    pub gauge: u8,

    pub alive: bool,
    pub position: Position,

    #[serde(default)]
    pub effects: Vec<StatusEffect>,

    /// Readiness keyed by action identifier. Actions absent from the map are
    /// treated as ready with one charge; the reader only reports actions it
    /// has seen used.
    #[serde(default)]
    pub readiness: HashMap<u64, ActionReadiness>,
}

impl ActorState {
    /// Whether an action has at least one charge available right now.
    pub fn is_ready(&self, action_id: u64) -> bool {
        match self.readiness.get(&action_id) {
            Some(r) => r.charges > 0 || r.remaining_secs <= 0.0,
            None => true,
        }
    }

    /// Mana as a fraction of maximum, in [0.0, 1.0].
    pub fn mana_fraction(&self) -> f32 {
        if self.max_mana <= 0 {
            return 0.0;
        }
        (self.mana as f32 / self.max_mana as f32).clamp(0.0, 1.0)
    }

    pub fn has_effect(&self, effect_id: u64) -> bool {
        self.effects.iter().any(|e| e.effect_id == effect_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_action_is_ready() {
        let actor = ActorState {
            id: 1,
            level: 50,
            mana: 1000,
            max_mana: 1000,
            gauge: 0,
            alive: true,
            position: Position::default(),
            effects: vec![],
            readiness: HashMap::new(),
        };
        assert!(actor.is_ready(999));
    }

    #[test]
    fn test_charge_readiness() {
        let mut actor = ActorState {
            id: 1,
            level: 50,
            mana: 1000,
            max_mana: 1000,
            gauge: 0,
            alive: true,
            position: Position::default(),
            effects: vec![],
            readiness: HashMap::new(),
        };
        actor.readiness.insert(
            7,
            ActionReadiness {
                remaining_secs: 12.0,
                charges: 1,
            },
        );
        assert!(actor.is_ready(7), "a held charge is usable mid-recast");

        actor.readiness.insert(
            7,
            ActionReadiness {
                remaining_secs: 12.0,
                charges: 0,
            },
        );
        assert!(!actor.is_ready(7));
    }
}
