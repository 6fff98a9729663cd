//! Archetype profile types
//!
//! A profile is the immutable configuration snapshot for one agent archetype:
//! effective ranges, HP thresholds, per-ability enable toggles, and triage
//! weights. Profiles are loaded from TOML config files and never written back
//! by the engine.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Archetype Profile
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration for one agent archetype (loaded from config)
///
/// The module *list* for an archetype is assembled in code; everything the
/// modules consult at runtime (ranges, thresholds, toggles, weights) comes
/// from this struct so behavior differences between archetypes stay data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeProfile {
    /// Unique identifier for this profile (e.g., "field_medic")
    pub id: String,

    /// Display name
    pub name: String,

    // ─── Ranges ─────────────────────────────────────────────────────────────
    /// Maximum distance at which single-target support actions land
    #[serde(default = "default_heal_range")]
    pub heal_range: f32,

    /// Effect radius of ground-targeted area actions
    #[serde(default = "default_aoe_radius")]
    pub aoe_radius: f32,

    /// Minimum injured members required before an area action is worth it
    #[serde(default = "default_min_aoe_targets")]
    pub min_aoe_targets: usize,

    // ─── Tunables ───────────────────────────────────────────────────────────
    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub toggles: AbilityToggles,

    #[serde(default)]
    pub weights: TriageWeights,
}

impl ArchetypeProfile {
    /// The builtin field-medic profile with all defaults applied.
    pub fn field_medic() -> Self {
        Self {
            id: "field_medic".to_string(),
            name: "Field Medic".to_string(),
            heal_range: default_heal_range(),
            aoe_radius: default_aoe_radius(),
            min_aoe_targets: default_min_aoe_targets(),
            thresholds: Thresholds::default(),
            toggles: AbilityToggles::default(),
            weights: TriageWeights::default(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Thresholds
// ═══════════════════════════════════════════════════════════════════════════

/// HP-fraction and resource thresholds consulted by module guards
///
/// All HP values are fractions of maximum health in [0.0, 1.0].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Predicted HP fraction below which the emergency response fires
    #[serde(default = "default_emergency_hp")]
    pub emergency_hp: f32,

    /// Predicted HP fraction below which single-target healing engages
    #[serde(default = "default_single_heal_hp")]
    pub single_heal_hp: f32,

    /// Predicted HP fraction below which free gauge spends are worth using
    #[serde(default = "default_free_spend_hp")]
    pub free_spend_hp: f32,

    /// Predicted HP fraction below which a member counts as injured for
    /// area-heal clustering
    #[serde(default = "default_aoe_injured_hp")]
    pub aoe_injured_hp: f32,

    /// Predicted HP fraction below which the tank gets pre-mitigation
    #[serde(default = "default_mitigation_hp")]
    pub mitigation_hp: f32,

    /// Mana fraction below which offense stops spending
    #[serde(default = "default_offense_mana_floor")]
    pub offense_mana_floor: f32,

    /// Remaining seconds under which the gauge-building probe is refreshed
    #[serde(default = "default_probe_refresh_secs")]
    pub probe_refresh_secs: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            emergency_hp: default_emergency_hp(),
            single_heal_hp: default_single_heal_hp(),
            free_spend_hp: default_free_spend_hp(),
            aoe_injured_hp: default_aoe_injured_hp(),
            mitigation_hp: default_mitigation_hp(),
            offense_mana_floor: default_offense_mana_floor(),
            probe_refresh_secs: default_probe_refresh_secs(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Ability Toggles
// ═══════════════════════════════════════════════════════════════════════════

/// Per-ability enable flags
///
/// Every decision module checks its toggle first; a disabled ability costs
/// nothing at tick time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityToggles {
    #[serde(default = "default_true")]
    pub resuscitate: bool,

    #[serde(default = "default_true")]
    pub kolto_probe: bool,

    #[serde(default = "default_true")]
    pub emergency_medpac: bool,

    #[serde(default = "default_true")]
    pub stim_boost: bool,

    #[serde(default = "default_true")]
    pub protective_screen: bool,

    #[serde(default = "default_true")]
    pub surgical_probe: bool,

    #[serde(default = "default_true")]
    pub nanotech_cloud: bool,

    #[serde(default = "default_true")]
    pub kolto_injection: bool,

    #[serde(default = "default_true")]
    pub offense: bool,
}

impl Default for AbilityToggles {
    fn default() -> Self {
        Self {
            resuscitate: true,
            kolto_probe: true,
            emergency_medpac: true,
            stim_boost: true,
            protective_screen: true,
            surgical_probe: true,
            nanotech_cloud: true,
            kolto_injection: true,
            offense: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Triage Weights
// ═══════════════════════════════════════════════════════════════════════════

/// Weights for the "most endangered" triage score
///
/// The score is a weighted sum of normalized factors; positive weights raise
/// urgency, the shield/mitigation weights are subtracted as penalties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageWeights {
    /// Normalized incoming-damage rate
    #[serde(default = "default_w_incoming_rate")]
    pub incoming_rate: f32,

    /// Flat bonus for tank-role candidates
    #[serde(default = "default_w_tank_bonus")]
    pub tank_bonus: f32,

    /// Flat bonus for healer-role candidates (keep the co-healer up)
    #[serde(default = "default_w_cohealer_bonus")]
    pub cohealer_bonus: f32,

    /// Predicted missing-health fraction
    #[serde(default = "default_w_missing_health")]
    pub missing_health: f32,

    /// Normalized positive damage acceleration
    #[serde(default = "default_w_acceleration")]
    pub acceleration: f32,

    /// Time-to-death urgency (1.0 at imminent death, 0.0 at the horizon)
    #[serde(default = "default_w_urgency")]
    pub urgency: f32,

    /// Penalty per absorb-shield fraction of max health
    #[serde(default = "default_w_shield_penalty")]
    pub shield_penalty: f32,

    /// Penalty per active mitigation fraction
    #[serde(default = "default_w_mitigation_penalty")]
    pub mitigation_penalty: f32,

    /// Seconds-to-death at which urgency reaches zero
    #[serde(default = "default_ttd_horizon_secs")]
    pub ttd_horizon_secs: f32,
}

impl Default for TriageWeights {
    fn default() -> Self {
        Self {
            incoming_rate: default_w_incoming_rate(),
            tank_bonus: default_w_tank_bonus(),
            cohealer_bonus: default_w_cohealer_bonus(),
            missing_health: default_w_missing_health(),
            acceleration: default_w_acceleration(),
            urgency: default_w_urgency(),
            shield_penalty: default_w_shield_penalty(),
            mitigation_penalty: default_w_mitigation_penalty(),
            ttd_horizon_secs: default_ttd_horizon_secs(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Serde Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn default_true() -> bool {
    true
}

fn default_heal_range() -> f32 {
    30.0
}

fn default_aoe_radius() -> f32 {
    8.0
}

fn default_min_aoe_targets() -> usize {
    3
}

fn default_emergency_hp() -> f32 {
    0.35
}

fn default_single_heal_hp() -> f32 {
    0.80
}

fn default_free_spend_hp() -> f32 {
    0.85
}

fn default_aoe_injured_hp() -> f32 {
    0.85
}

fn default_mitigation_hp() -> f32 {
    0.90
}

fn default_offense_mana_floor() -> f32 {
    0.40
}

fn default_probe_refresh_secs() -> f32 {
    3.0
}

fn default_w_incoming_rate() -> f32 {
    1.0
}

fn default_w_tank_bonus() -> f32 {
    0.6
}

fn default_w_cohealer_bonus() -> f32 {
    0.35
}

fn default_w_missing_health() -> f32 {
    1.2
}

fn default_w_acceleration() -> f32 {
    0.5
}

fn default_w_urgency() -> f32 {
    1.5
}

fn default_w_shield_penalty() -> f32 {
    0.4
}

fn default_w_mitigation_penalty() -> f32 {
    0.3
}

fn default_ttd_horizon_secs() -> f32 {
    10.0
}

// ═══════════════════════════════════════════════════════════════════════════
// Config File Structure
// ═══════════════════════════════════════════════════════════════════════════

/// Root structure for profile config files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Profiles defined in this file
    #[serde(default, rename = "profile")]
    pub profiles: Vec<ArchetypeProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_toml() {
        let toml = r#"
[[profile]]
id = "field_medic"
name = "Field Medic"
heal_range = 25.0

[profile.thresholds]
emergency_hp = 0.30

[profile.toggles]
offense = false
"#;

        let config: ProfileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.profiles.len(), 1);

        let profile = &config.profiles[0];
        assert_eq!(profile.id, "field_medic");
        assert_eq!(profile.heal_range, 25.0);
        // Unset fields take defaults
        assert_eq!(profile.aoe_radius, 8.0);
        assert_eq!(profile.min_aoe_targets, 3);
        // Partial sections keep defaults for unset fields
        assert_eq!(profile.thresholds.emergency_hp, 0.30);
        assert_eq!(profile.thresholds.single_heal_hp, 0.80);
        assert!(!profile.toggles.offense);
        assert!(profile.toggles.kolto_injection);
    }

    #[test]
    fn test_builtin_field_medic_defaults() {
        let profile = ArchetypeProfile::field_medic();
        assert_eq!(profile.id, "field_medic");
        assert!(profile.toggles.resuscitate);
        assert!(profile.thresholds.emergency_hp < profile.thresholds.single_heal_hp);
    }

    #[test]
    fn test_weights_roundtrip() {
        let profile = ArchetypeProfile::field_medic();
        let serialized = toml::to_string(&ProfileConfig {
            profiles: vec![profile],
        })
        .unwrap();
        let parsed: ProfileConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.profiles[0].weights.urgency, 1.5);
    }
}
