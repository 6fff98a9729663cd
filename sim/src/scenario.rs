//! Builtin replay scenario and the scripted gateway.
//!
//! The scenario is a precomputed stream of tick inputs approximating a
//! four-member pull: a tank under ramping boss pressure with periodic
//! co-healer relief, two damage dealers taking chip damage, and one boss.
//! It exists so the harness runs with no replay file on disk; recorded
//! replays go through the same [`TickInput`] JSON shape.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use kolto_core::catalogue::effects;
use kolto_core::snapshot::{ActorState, StatusEffect};
use kolto_core::{EntitySnapshot, ExecutionGateway, Position, Role, TickInput, TimingSample};

const TICK_SECS: f32 = 0.25;
const TICKS: usize = 240;

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(21, 30, 0)
        .unwrap()
}

fn entity(id: i64, name: &str, role: Role, hp: i64, max_hp: i64, pos: Position) -> EntitySnapshot {
    EntitySnapshot {
        id,
        name: name.to_string(),
        role,
        hp: hp.clamp(0, max_hp),
        max_hp,
        shield: 0,
        mitigation: 0.0,
        incoming_dps: 0.0,
        incoming_dps_delta: 0.0,
        position: pos,
        alive: hp > 0,
        has_aggro: false,
        effects: vec![],
    }
}

/// Generate the builtin scenario.
pub fn builtin_scenario() -> Vec<TickInput> {
    let mut inputs = Vec::with_capacity(TICKS);

    let tank_max = 180_000i64;
    let dps_max = 110_000i64;
    let boss_max = 4_000_000i64;

    let mut tank_hp = tank_max;
    let mut dps_a_hp = dps_max;
    let mut dps_b_hp = dps_max;
    let mut boss_hp = boss_max;

    for tick in 0..TICKS {
        let secs = tick as f32 * TICK_SECS;
        let timestamp = base_time() + Duration::milliseconds((secs * 1000.0) as i64);

        // Boss pressure on the tank ramps over the pull, with a heavy smash
        // every 10s; the co-healer lands a big heal every 2.5s
        let tank_dps = 1_200.0 + secs * 25.0;
        tank_hp -= (tank_dps * TICK_SECS) as i64;
        if tick % 40 == 19 {
            tank_hp -= 48_000;
        }
        if tick % 10 == 9 {
            tank_hp = (tank_hp + 11_000).min(tank_max);
        }

        // Chip damage on the dealers plus a raid-wide burst every 15s
        dps_a_hp -= 90;
        dps_b_hp -= 70;
        if tick % 60 == 35 {
            tank_hp -= 20_000;
            dps_a_hp -= 26_000;
            dps_b_hp -= 26_000;
        }
        if tick % 24 == 23 {
            dps_a_hp = (dps_a_hp + 5_000).min(dps_max);
            dps_b_hp = (dps_b_hp + 5_000).min(dps_max);
        }

        boss_hp -= 16_000;

        let mut tank = entity(
            1,
            "Brakk",
            Role::Tank,
            tank_hp,
            tank_max,
            Position::new(9.0, 0.0, 0.0),
        );
        tank.incoming_dps = tank_dps;
        tank.incoming_dps_delta = 25.0;
        tank.has_aggro = true;
        // Scripted probe upkeep: the HoT drifts toward expiry every 18s
        tank.effects.push(StatusEffect {
            effect_id: effects::KOLTO_PROBE_HOT,
            remaining_secs: 18.0 - (secs % 18.0),
        });

        let mut dps_a = entity(
            2,
            "Vex",
            Role::Damage,
            dps_a_hp,
            dps_max,
            Position::new(7.0, 3.0, 0.0),
        );
        dps_a.incoming_dps = 90.0 / TICK_SECS;

        let mut dps_b = entity(
            3,
            "Sorn",
            Role::Damage,
            dps_b_hp,
            dps_max,
            Position::new(7.5, -3.0, 0.0),
        );
        dps_b.incoming_dps = 70.0 / TICK_SECS;

        let boss = entity(
            900,
            "Warlord Kresh",
            Role::Unknown,
            boss_hp,
            boss_max,
            Position::new(12.0, 0.0, 0.0),
        );

        let mut actor = ActorState {
            id: 100,
            level: 50,
            mana: (12_000 - tick as i64 * 30).max(3_000),
            max_mana: 12_000,
            gauge: ((tick / 8) % 3) as u8,
            alive: true,
            position: Position::new(0.0, 0.0, 0.0),
            effects: vec![],
            readiness: Default::default(),
        };
        // Stim boost lapses mid-pull so the buff module has work once
        if !(80..100).contains(&tick) {
            actor.effects.push(StatusEffect {
                effect_id: effects::STIM_BOOST_BUFF,
                remaining_secs: 60.0,
            });
        }

        inputs.push(TickInput {
            timestamp,
            timing: TimingSample {
                elapsed_secs: TICK_SECS,
                in_cast: false,
                cycle_total: 2.5,
                cycle_elapsed: secs % 2.5,
                lock_remaining: 0.0,
            },
            actor,
            party: vec![tank, dps_a, dps_b],
            enemies: vec![boss],
        });
    }

    inputs
}

/// Gateway for replays: accepts everything, optionally refusing every Nth
/// call to exercise the rejection path.
pub struct ReplayGateway {
    pub accepted: usize,
    pub rejected: usize,
    fail_every: Option<usize>,
}

impl ReplayGateway {
    pub fn new(fail_every: Option<usize>) -> Self {
        Self {
            accepted: 0,
            rejected: 0,
            fail_every,
        }
    }

    fn answer(&mut self) -> bool {
        let call = self.accepted + self.rejected + 1;
        if let Some(n) = self.fail_every
            && n > 0
            && call % n == 0
        {
            self.rejected += 1;
            return false;
        }
        self.accepted += 1;
        true
    }
}

impl ExecutionGateway for ReplayGateway {
    fn execute(&mut self, _action_id: u64, _target_id: i64) -> bool {
        self.answer()
    }

    fn execute_at(&mut self, _action_id: u64, _position: Position) -> bool {
        self.answer()
    }
}
