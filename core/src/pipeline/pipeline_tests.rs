//! Tests for pipeline assembly and module behavior
//!
//! Priority ordering, assembly validation, combo preemption rules, and the
//! individual module guard chains.

use chrono::{NaiveDate, NaiveDateTime};
use kolto_types::ArchetypeProfile;

use crate::catalogue::{actions, ActionCatalogue};
use crate::gateway::TargetRef;
use crate::prediction::HealthLedger;
use crate::snapshot::{
    ActorState, EntitySnapshot, Position, Role, StatusEffect, TickInput, TimingSample,
};
use crate::timing::CycleTracker;

use super::{
    field_medic_modules, ActionRequest, AgentState, AssemblyError, ComboState, ComboStep,
    ModuleDescriptor, ModuleKind, Pipeline, TickContext,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(21, 30, 0)
        .unwrap()
}

fn actor() -> ActorState {
    ActorState {
        id: 100,
        level: 50,
        mana: 5_000,
        max_mana: 5_000,
        gauge: 0,
        alive: true,
        position: Position::default(),
        effects: vec![],
        readiness: Default::default(),
    }
}

fn member(id: i64, role: Role, hp: i64, max_hp: i64) -> EntitySnapshot {
    EntitySnapshot {
        id,
        name: format!("Member{id}"),
        role,
        hp,
        max_hp,
        shield: 0,
        mitigation: 0.0,
        incoming_dps: 0.0,
        incoming_dps_delta: 0.0,
        position: Position::default(),
        alive: true,
        has_aggro: false,
        effects: vec![],
    }
}

fn input(party: Vec<EntitySnapshot>, enemies: Vec<EntitySnapshot>) -> TickInput {
    TickInput {
        timestamp: now(),
        timing: TimingSample::default(),
        actor: actor(),
        party,
        enemies,
    }
}

/// Tracker in the Ready phase (no timing data - primary legal).
fn tracker_ready() -> CycleTracker {
    let mut tracker = CycleTracker::new();
    tracker.observe(&TimingSample::default());
    tracker
}

/// Tracker mid-cycle with weave room (secondary legal).
fn tracker_weaving() -> CycleTracker {
    let mut tracker = CycleTracker::new();
    tracker.observe(&TimingSample {
        elapsed_secs: 0.1,
        in_cast: false,
        cycle_total: 2.5,
        cycle_elapsed: 0.5,
        lock_remaining: 0.0,
    });
    tracker
}

struct Fixture {
    input: TickInput,
    tracker: CycleTracker,
    ledger: HealthLedger,
    profile: ArchetypeProfile,
    catalogue: ActionCatalogue,
    agent: AgentState,
}

impl Fixture {
    fn new(input: TickInput, tracker: CycleTracker) -> Self {
        Self {
            input,
            tracker,
            ledger: HealthLedger::new(),
            profile: ArchetypeProfile::field_medic(),
            catalogue: ActionCatalogue::builtin(),
            agent: AgentState::new(),
        }
    }

    fn ctx(&self) -> TickContext<'_> {
        TickContext {
            input: &self.input,
            timing: &self.tracker,
            ledger: &self.ledger,
            profile: &self.profile,
            catalogue: &self.catalogue,
            agent: &self.agent,
        }
    }
}

fn descriptor(priority: u16, name: &'static str, kind: ModuleKind) -> ModuleDescriptor {
    ModuleDescriptor {
        priority,
        name,
        kind,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Assembly
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_assemble_default_table() {
    let pipeline =
        Pipeline::assemble(field_medic_modules(), &ActionCatalogue::builtin()).unwrap();
    let priorities: Vec<u16> = pipeline.modules().iter().map(|m| m.priority).collect();
    let mut sorted = priorities.clone();
    sorted.sort_unstable();
    assert_eq!(priorities, sorted);
    assert_eq!(pipeline.modules().len(), 9);
}

#[test]
fn test_duplicate_priority_is_fatal() {
    let result = Pipeline::assemble(
        vec![
            descriptor(30, "a", ModuleKind::EmergencyResponse),
            descriptor(30, "b", ModuleKind::Mitigation),
        ],
        &ActionCatalogue::builtin(),
    );
    assert!(matches!(
        result,
        Err(AssemblyError::DuplicatePriority { priority: 30, .. })
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Priority ordering / single commitment
// ─────────────────────────────────────────────────────────────────────────────

/// Context where both the emergency and mitigation modules would accept:
/// an unscreened tank at 20% health under fire, in a weave window.
fn dual_accept_fixture() -> Fixture {
    let mut tank = member(1, Role::Tank, 2_000, 10_000);
    tank.incoming_dps = 800.0;
    Fixture::new(input(vec![tank], vec![]), tracker_weaving())
}

#[test]
fn test_lower_priority_number_wins_regardless_of_insertion_order() {
    let forward = vec![
        descriptor(30, "emergency_medpac", ModuleKind::EmergencyResponse),
        descriptor(50, "protective_screen", ModuleKind::Mitigation),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    for modules in [forward, reversed] {
        let fixture = dual_accept_fixture();
        let pipeline = Pipeline::assemble(modules, &ActionCatalogue::builtin()).unwrap();
        let commitment = pipeline.run(&fixture.ctx()).unwrap();
        assert_eq!(commitment.module, "emergency_medpac");
        assert_eq!(commitment.request.action_id, actions::EMERGENCY_MEDPAC);
    }
}

#[test]
fn test_first_commit_stops_the_walk() {
    let fixture = dual_accept_fixture();
    let pipeline = Pipeline::assemble(
        vec![
            descriptor(30, "emergency_medpac", ModuleKind::EmergencyResponse),
            descriptor(50, "protective_screen", ModuleKind::Mitigation),
        ],
        &ActionCatalogue::builtin(),
    )
    .unwrap();

    // Both would accept; exactly one commitment comes back
    let commitment = pipeline.run(&fixture.ctx()).unwrap();
    assert_eq!(commitment.priority, 30);
}

#[test]
fn test_all_disabled_yields_no_action() {
    let mut fixture = dual_accept_fixture();
    fixture.profile.toggles.emergency_medpac = false;
    fixture.profile.toggles.protective_screen = false;

    let pipeline = Pipeline::assemble(
        vec![
            descriptor(30, "emergency_medpac", ModuleKind::EmergencyResponse),
            descriptor(50, "protective_screen", ModuleKind::Mitigation),
        ],
        &ActionCatalogue::builtin(),
    )
    .unwrap();
    assert!(pipeline.run(&fixture.ctx()).is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Combo preemption
// ─────────────────────────────────────────────────────────────────────────────

fn combo_at(owner_priority: u16) -> ComboState {
    ComboState {
        owner_priority,
        next_step: ComboStep::Laceration,
        advanced_at: now(),
    }
}

#[test]
fn test_combo_blocks_later_modules() {
    // kolto_injection would accept (injured member, Ready phase), but a
    // combo owned at priority 60 blocks everything after 60
    let hurt = member(1, Role::Damage, 4_000, 10_000);
    let mut fixture = Fixture::new(input(vec![hurt], vec![]), tracker_ready());
    fixture.agent.combo = Some(combo_at(60));

    let pipeline = Pipeline::assemble(
        vec![descriptor(80, "kolto_injection", ModuleKind::SingleHeal)],
        &ActionCatalogue::builtin(),
    )
    .unwrap();
    assert!(pipeline.run(&fixture.ctx()).is_none());
}

#[test]
fn test_combo_does_not_block_higher_urgency() {
    let mut tank = member(1, Role::Tank, 2_000, 10_000);
    tank.incoming_dps = 800.0;
    let mut fixture = Fixture::new(input(vec![tank], vec![]), tracker_weaving());
    fixture.agent.combo = Some(combo_at(60));

    let pipeline = Pipeline::assemble(
        vec![descriptor(30, "emergency_medpac", ModuleKind::EmergencyResponse)],
        &ActionCatalogue::builtin(),
    )
    .unwrap();
    assert!(pipeline.run(&fixture.ctx()).is_some());
}

#[test]
fn test_stale_combo_lapses_at_tick_start() {
    let mut agent = AgentState::new();
    agent.combo = Some(ComboState {
        owner_priority: 90,
        next_step: ComboStep::Suture,
        advanced_at: now(),
    });

    assert!(agent
        .begin_tick(now() + chrono::Duration::seconds(3))
        .is_none());
    assert!(agent.combo.is_some());

    let signal = agent.begin_tick(now() + chrono::Duration::seconds(11));
    assert!(signal.is_some());
    assert!(agent.combo.is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Module guard chains
// ─────────────────────────────────────────────────────────────────────────────

fn run_single(fixture: &Fixture, kind: ModuleKind) -> Option<ActionRequest> {
    let pipeline = Pipeline::assemble(
        vec![descriptor(10, "under_test", kind)],
        &ActionCatalogue::builtin(),
    )
    .unwrap();
    pipeline.run(&fixture.ctx()).map(|c| c.request)
}

#[test]
fn test_resuscitate_prefers_healer_then_tank() {
    let mut dead_dps = member(1, Role::Damage, 0, 10_000);
    dead_dps.alive = false;
    let mut dead_healer = member(2, Role::Healer, 0, 10_000);
    dead_healer.alive = false;
    let mut dead_tank = member(3, Role::Tank, 0, 10_000);
    dead_tank.alive = false;

    let fixture = Fixture::new(
        input(vec![dead_dps, dead_healer, dead_tank], vec![]),
        tracker_ready(),
    );
    let request = run_single(&fixture, ModuleKind::Resuscitate).unwrap();
    assert_eq!(request.target, TargetRef::Entity(2));
}

#[test]
fn test_resuscitate_declines_with_no_fallen() {
    let fixture = Fixture::new(
        input(vec![member(1, Role::Tank, 9_000, 10_000)], vec![]),
        tracker_ready(),
    );
    assert!(run_single(&fixture, ModuleKind::Resuscitate).is_none());
}

#[test]
fn test_probe_upkeep_refreshes_expiring_probe() {
    use crate::catalogue::effects;

    let mut tank = member(1, Role::Tank, 9_000, 10_000);
    tank.effects.push(StatusEffect {
        effect_id: effects::KOLTO_PROBE_HOT,
        remaining_secs: 1.5,
    });
    let fixture = Fixture::new(input(vec![tank], vec![]), tracker_ready());

    let request = run_single(&fixture, ModuleKind::GaugeUpkeep).unwrap();
    assert_eq!(request.action_id, actions::KOLTO_PROBE);

    // Fresh probe: decline
    let mut tank = member(1, Role::Tank, 9_000, 10_000);
    tank.effects.push(StatusEffect {
        effect_id: effects::KOLTO_PROBE_HOT,
        remaining_secs: 12.0,
    });
    let fixture = Fixture::new(input(vec![tank], vec![]), tracker_ready());
    assert!(run_single(&fixture, ModuleKind::GaugeUpkeep).is_none());
}

#[test]
fn test_emergency_registers_pending_heal() {
    let fixture = dual_accept_fixture();
    let request = run_single(&fixture, ModuleKind::EmergencyResponse).unwrap();
    assert_eq!(request.pending_heals.len(), 1);
    assert_eq!(request.pending_heals[0].0, 1);
    assert!(request.pending_heals[0].1 > 0);
}

#[test]
fn test_emergency_respects_threshold() {
    // 60% health: endangered but not below the emergency bar
    let mut tank = member(1, Role::Tank, 6_000, 10_000);
    tank.incoming_dps = 800.0;
    let fixture = Fixture::new(input(vec![tank], vec![]), tracker_weaving());
    assert!(run_single(&fixture, ModuleKind::EmergencyResponse).is_none());
}

#[test]
fn test_stim_boost_only_when_missing() {
    use crate::catalogue::effects;

    let fixture = Fixture::new(input(vec![], vec![]), tracker_weaving());
    let request = run_single(&fixture, ModuleKind::ProactiveBuff).unwrap();
    assert_eq!(request.action_id, actions::STIM_BOOST);
    assert_eq!(request.target, TargetRef::Entity(100));

    let mut fixture = Fixture::new(input(vec![], vec![]), tracker_weaving());
    fixture.input.actor.effects.push(StatusEffect {
        effect_id: effects::STIM_BOOST_BUFF,
        remaining_secs: 20.0,
    });
    assert!(run_single(&fixture, ModuleKind::ProactiveBuff).is_none());
}

#[test]
fn test_free_spend_needs_gauge() {
    let hurt = member(1, Role::Damage, 4_000, 10_000);

    let fixture = Fixture::new(input(vec![hurt.clone()], vec![]), tracker_ready());
    assert!(run_single(&fixture, ModuleKind::FreeSpend).is_none());

    let mut fixture = Fixture::new(input(vec![hurt], vec![]), tracker_ready());
    fixture.input.actor.gauge = 2;
    let request = run_single(&fixture, ModuleKind::FreeSpend).unwrap();
    assert_eq!(request.action_id, actions::SURGICAL_PROBE);
}

#[test]
fn test_area_heal_targets_cluster_center() {
    let mut a = member(1, Role::Damage, 5_000, 10_000);
    a.position = Position::new(10.0, 0.0, 0.0);
    let mut b = member(2, Role::Damage, 5_000, 10_000);
    b.position = Position::new(12.0, 0.0, 0.0);
    let mut c = member(3, Role::Damage, 5_000, 10_000);
    c.position = Position::new(11.0, 2.0, 0.0);

    let fixture = Fixture::new(input(vec![a, b, c], vec![]), tracker_weaving());
    let request = run_single(&fixture, ModuleKind::AreaHeal).unwrap();

    assert!(matches!(request.target, TargetRef::Ground(_)));
    assert_eq!(request.pending_heals.len(), 3);
}

#[test]
fn test_area_heal_declines_below_min_targets() {
    let hurt = member(1, Role::Damage, 5_000, 10_000);
    let fixture = Fixture::new(input(vec![hurt], vec![]), tracker_weaving());
    assert!(run_single(&fixture, ModuleKind::AreaHeal).is_none());
}

#[test]
fn test_single_heal_requires_primary_phase() {
    let hurt = member(1, Role::Damage, 4_000, 10_000);

    let fixture = Fixture::new(input(vec![hurt.clone()], vec![]), tracker_ready());
    assert!(run_single(&fixture, ModuleKind::SingleHeal).is_some());

    // Mid-cycle: a primary cast would clip the rotation
    let fixture = Fixture::new(input(vec![hurt], vec![]), tracker_weaving());
    assert!(run_single(&fixture, ModuleKind::SingleHeal).is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Offense
// ─────────────────────────────────────────────────────────────────────────────

fn enemy_at(id: i64, x: f32) -> EntitySnapshot {
    let mut e = member(id, Role::Unknown, 50_000, 50_000);
    e.position = Position::new(x, 0.0, 0.0);
    e
}

#[test]
fn test_offense_starts_combo_in_melee_range() {
    let fixture = Fixture::new(input(vec![], vec![enemy_at(7, 2.0)]), tracker_ready());
    let request = run_single(&fixture, ModuleKind::Offense).unwrap();
    assert_eq!(request.action_id, actions::INCISION);
    assert_eq!(request.target, TargetRef::Entity(7));
}

#[test]
fn test_offense_falls_back_to_filler_at_range() {
    let fixture = Fixture::new(input(vec![], vec![enemy_at(7, 20.0)]), tracker_ready());
    let request = run_single(&fixture, ModuleKind::Offense).unwrap();
    assert_eq!(request.action_id, actions::RIFLE_SHOT);
}

#[test]
fn test_offense_continues_combo() {
    let mut fixture = Fixture::new(input(vec![], vec![enemy_at(7, 2.0)]), tracker_ready());
    fixture.agent.combo = Some(ComboState {
        owner_priority: 10,
        next_step: ComboStep::Laceration,
        advanced_at: now(),
    });
    let request = run_single(&fixture, ModuleKind::Offense).unwrap();
    assert_eq!(request.action_id, actions::LACERATION);
}

#[test]
fn test_offense_honors_mana_floor() {
    let mut fixture = Fixture::new(input(vec![], vec![enemy_at(7, 2.0)]), tracker_ready());
    fixture.input.actor.mana = 1_000; // 20%, below the 40% floor

    let request = run_single(&fixture, ModuleKind::Offense).unwrap();
    assert_eq!(
        request.action_id,
        actions::RIFLE_SHOT,
        "spenders stop below the mana floor, the filler keeps going"
    );
}

#[test]
fn test_offense_declines_without_enemies() {
    let fixture = Fixture::new(input(vec![], vec![]), tracker_ready());
    assert!(run_single(&fixture, ModuleKind::Offense).is_none());
}

#[test]
fn test_combo_note_executed_walks_the_chain() {
    let mut agent = AgentState::new();

    let signal = agent.note_executed(actions::INCISION, 90, now());
    assert!(signal.is_some());
    assert_eq!(
        agent.combo.as_ref().unwrap().next_step,
        ComboStep::Laceration
    );

    agent.note_executed(actions::LACERATION, 90, now());
    assert_eq!(agent.combo.as_ref().unwrap().next_step, ComboStep::Suture);

    agent.note_executed(actions::SUTURE, 90, now());
    assert!(agent.combo.is_none(), "finisher closes the chain");

    // Non-combo actions leave the chain alone
    agent.note_executed(actions::INCISION, 90, now());
    agent.note_executed(actions::KOLTO_INJECTION, 80, now());
    assert!(agent.combo.is_some());
}
