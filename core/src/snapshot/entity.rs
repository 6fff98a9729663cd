use serde::{Deserialize, Serialize};

use super::Position;

/// Combat role tag reported by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tank,
    Healer,
    Damage,
    /// Roleless or unreadable (e.g., NPC filling a party slot)
    #[default]
    Unknown,
}

/// A status effect active on an entity, with its remaining duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub effect_id: u64,
    pub remaining_secs: f32,
}

/// Read-only per-tick view of one participant.
///
/// Produced fresh every tick by the environment reader; the engine never
/// mutates it. The pressure readings (`incoming_dps`, `incoming_dps_delta`,
/// `shield`, `mitigation`) are whatever the reader observed externally; the
/// engine does not compute them, only weighs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: i64,
    pub name: String,
    pub role: Role,

    /// Raw (already-applied) health as read from the client
    pub hp: i64,
    pub max_hp: i64,

    /// Absorb-shield amount remaining on this entity
    #[serde(default)]
    pub shield: i64,

    /// Active damage-reduction fraction in [0.0, 1.0]
    #[serde(default)]
    pub mitigation: f32,

    /// Observed incoming damage per second
    #[serde(default)]
    pub incoming_dps: f32,

    /// Change in incoming damage rate per second (positive = ramping up)
    #[serde(default)]
    pub incoming_dps_delta: f32,

    pub position: Position,
    pub alive: bool,

    /// Whether this entity currently holds hostile aggression
    #[serde(default)]
    pub has_aggro: bool,

    #[serde(default)]
    pub effects: Vec<StatusEffect>,
}

impl EntitySnapshot {
    /// Raw health as a fraction of maximum, in [0.0, 1.0].
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Raw missing health (max - current), never negative.
    pub fn missing_hp(&self) -> i64 {
        (self.max_hp - self.hp).max(0)
    }

    /// Look up an active status effect by identifier.
    pub fn effect(&self, effect_id: u64) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.effect_id == effect_id)
    }

    pub fn has_effect(&self, effect_id: u64) -> bool {
        self.effect(effect_id).is_some()
    }
}
