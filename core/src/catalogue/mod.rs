//! Static action reference data
//!
//! The catalogue maps stable action identifiers to per-action facts: class,
//! lock duration, recast, cost, range, and the estimated effect magnitude
//! used for optimistic prediction. It is consulted at pipeline assembly
//! (unknown IDs are fatal there) and at execution time; it contains no
//! decision logic.

use phf::phf_map;

/// Whether an action is bound by the shared cycle cooldown or weavable
/// between primary actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionClass {
    /// Bound by the shared cycle cooldown (at most one per cycle)
    Primary,
    /// Own short lock, issuable between primary actions
    Secondary,
}

/// Static facts about one action.
#[derive(Debug, Clone)]
pub struct ActionInfo {
    pub id: u64,
    pub name: &'static str,
    pub class: ActionClass,

    /// Cast time (primary) or animation lock (secondary), seconds
    pub lock_secs: f32,

    /// Recast time per charge, seconds (0.0 = cycle-bound only)
    pub recast_secs: f32,

    pub charges: u8,
    pub mana_cost: i64,
    pub min_level: u8,
    pub range: f32,
    pub ground_targeted: bool,

    /// Expected heal magnitude per target, for pending-heal registration
    pub estimated_heal: i64,
}

/// Action identifiers for the field-medic kit.
pub mod actions {
    pub const RIFLE_SHOT: u64 = 2101;
    pub const INCISION: u64 = 2102;
    pub const LACERATION: u64 = 2103;
    pub const SUTURE: u64 = 2104;

    pub const KOLTO_INJECTION: u64 = 2201;
    pub const KOLTO_PROBE: u64 = 2202;
    pub const SURGICAL_PROBE: u64 = 2203;
    pub const NANOTECH_CLOUD: u64 = 2204;
    pub const EMERGENCY_MEDPAC: u64 = 2205;
    pub const PROTECTIVE_SCREEN: u64 = 2206;
    pub const STIM_BOOST: u64 = 2207;
    pub const RESUSCITATE: u64 = 2208;
}

/// Status-effect identifiers referenced by module guards.
pub mod effects {
    /// Heal-over-time applied by Kolto Probe
    pub const KOLTO_PROBE_HOT: u64 = 3301;
    /// Self buff from Stim Boost
    pub const STIM_BOOST_BUFF: u64 = 3302;
    /// Absorb shield from Protective Screen
    pub const PROTECTIVE_SCREEN_SHIELD: u64 = 3303;
}

static ACTIONS: phf::Map<u64, ActionInfo> = phf_map! {
    2101u64 => ActionInfo {
        id: 2101, name: "Rifle Shot", class: ActionClass::Primary,
        lock_secs: 0.6, recast_secs: 0.0, charges: 1, mana_cost: 0,
        min_level: 1, range: 30.0, ground_targeted: false, estimated_heal: 0,
    },
    2102u64 => ActionInfo {
        id: 2102, name: "Incision", class: ActionClass::Primary,
        lock_secs: 0.6, recast_secs: 0.0, charges: 1, mana_cost: 200,
        min_level: 10, range: 4.0, ground_targeted: false, estimated_heal: 0,
    },
    2103u64 => ActionInfo {
        id: 2103, name: "Laceration", class: ActionClass::Primary,
        lock_secs: 0.6, recast_secs: 0.0, charges: 1, mana_cost: 200,
        min_level: 24, range: 4.0, ground_targeted: false, estimated_heal: 0,
    },
    2104u64 => ActionInfo {
        id: 2104, name: "Suture", class: ActionClass::Primary,
        lock_secs: 0.6, recast_secs: 0.0, charges: 1, mana_cost: 200,
        min_level: 42, range: 4.0, ground_targeted: false, estimated_heal: 0,
    },
    2201u64 => ActionInfo {
        id: 2201, name: "Kolto Injection", class: ActionClass::Primary,
        lock_secs: 2.0, recast_secs: 0.0, charges: 1, mana_cost: 550,
        min_level: 2, range: 30.0, ground_targeted: false, estimated_heal: 7_800,
    },
    2202u64 => ActionInfo {
        id: 2202, name: "Kolto Probe", class: ActionClass::Primary,
        lock_secs: 0.6, recast_secs: 0.0, charges: 1, mana_cost: 250,
        min_level: 8, range: 30.0, ground_targeted: false, estimated_heal: 0,
    },
    2203u64 => ActionInfo {
        id: 2203, name: "Surgical Probe", class: ActionClass::Primary,
        lock_secs: 0.6, recast_secs: 0.0, charges: 1, mana_cost: 0,
        min_level: 34, range: 30.0, ground_targeted: false, estimated_heal: 4_200,
    },
    2204u64 => ActionInfo {
        id: 2204, name: "Nanotech Cloud", class: ActionClass::Secondary,
        lock_secs: 0.75, recast_secs: 12.0, charges: 1, mana_cost: 600,
        min_level: 38, range: 30.0, ground_targeted: true, estimated_heal: 3_000,
    },
    2205u64 => ActionInfo {
        id: 2205, name: "Emergency Medpac", class: ActionClass::Secondary,
        lock_secs: 0.6, recast_secs: 15.0, charges: 2, mana_cost: 0,
        min_level: 16, range: 30.0, ground_targeted: false, estimated_heal: 6_500,
    },
    2206u64 => ActionInfo {
        id: 2206, name: "Protective Screen", class: ActionClass::Secondary,
        lock_secs: 0.6, recast_secs: 9.0, charges: 1, mana_cost: 300,
        min_level: 28, range: 30.0, ground_targeted: false, estimated_heal: 0,
    },
    2207u64 => ActionInfo {
        id: 2207, name: "Stim Boost", class: ActionClass::Secondary,
        lock_secs: 0.6, recast_secs: 30.0, charges: 1, mana_cost: 0,
        min_level: 20, range: 0.0, ground_targeted: false, estimated_heal: 0,
    },
    2208u64 => ActionInfo {
        id: 2208, name: "Resuscitate", class: ActionClass::Primary,
        lock_secs: 1.5, recast_secs: 0.0, charges: 1, mana_cost: 900,
        min_level: 12, range: 30.0, ground_targeted: false, estimated_heal: 0,
    },
};

/// Lookup facade over the static action table.
#[derive(Debug, Clone, Copy)]
pub struct ActionCatalogue {
    table: &'static phf::Map<u64, ActionInfo>,
}

impl ActionCatalogue {
    /// The builtin field-medic catalogue.
    pub fn builtin() -> Self {
        Self { table: &ACTIONS }
    }

    pub fn get(&self, action_id: u64) -> Option<&'static ActionInfo> {
        self.table.get(&action_id)
    }

    pub fn contains(&self, action_id: u64) -> bool {
        self.table.contains_key(&action_id)
    }
}

impl Default for ActionCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}
