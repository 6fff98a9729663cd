use chrono::NaiveDateTime;
use kolto_types::ArchetypeProfile;

use crate::catalogue::{actions, ActionCatalogue, ActionClass, ActionInfo};
use crate::gateway::TargetRef;
use crate::prediction::HealthLedger;
use crate::signals::EngineSignal;
use crate::snapshot::TickInput;
use crate::timing::CycleTracker;

/// Seconds after which an unfinished combo chain lapses.
pub const COMBO_WINDOW_SECS: i64 = 10;

/// The next pending step of the offense combo chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboStep {
    Laceration,
    Suture,
}

/// Cross-tick combo memory - the only state a module concern may carry
/// between ticks.
#[derive(Debug, Clone)]
pub struct ComboState {
    /// Priority of the module that owns the chain. While the combo is in
    /// progress, modules with a *greater* priority number cannot preempt it.
    pub owner_priority: u16,

    pub next_step: ComboStep,
    pub advanced_at: NaiveDateTime,
}

/// Mutable agent state passed to every module through the context.
///
/// Rebuilt concerns (resources, readiness) live on the per-tick
/// [`crate::snapshot::ActorState`]; only the combo chain survives ticks.
#[derive(Debug, Clone, Default)]
pub struct AgentState {
    pub combo: Option<ComboState>,
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lapse a stale combo at the start of a tick.
    pub fn begin_tick(&mut self, now: NaiveDateTime) -> Option<EngineSignal> {
        let combo = self.combo.as_ref()?;
        let age = now.signed_duration_since(combo.advanced_at).num_seconds();
        if age >= COMBO_WINDOW_SECS {
            self.combo = None;
            return Some(EngineSignal::ComboReset { timestamp: now });
        }
        None
    }

    /// Update combo memory after a successful execution.
    pub fn note_executed(
        &mut self,
        action_id: u64,
        module_priority: u16,
        now: NaiveDateTime,
    ) -> Option<EngineSignal> {
        let advanced = match action_id {
            actions::INCISION => {
                self.combo = Some(ComboState {
                    owner_priority: module_priority,
                    next_step: ComboStep::Laceration,
                    advanced_at: now,
                });
                Some("Incision")
            }
            actions::LACERATION => {
                self.combo = Some(ComboState {
                    owner_priority: module_priority,
                    next_step: ComboStep::Suture,
                    advanced_at: now,
                });
                Some("Laceration")
            }
            actions::SUTURE => {
                self.combo = None;
                Some("Suture")
            }
            _ => None,
        };

        advanced.map(|step| EngineSignal::ComboAdvanced {
            step,
            timestamp: now,
        })
    }
}

/// One module's proposed action for this tick.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub action_id: u64,
    pub target: TargetRef,

    /// Optimistic pending-heal registrations: (target id, amount)
    pub pending_heals: Vec<(i64, i64)>,
}

impl ActionRequest {
    pub fn at_entity(action_id: u64, target_id: i64) -> Self {
        Self {
            action_id,
            target: TargetRef::Entity(target_id),
            pending_heals: Vec::new(),
        }
    }

    pub fn with_pending(mut self, target_id: i64, amount: i64) -> Self {
        self.pending_heals.push((target_id, amount));
        self
    }
}

/// Everything a module may consult while deciding.
///
/// Modules receive the context immutably: a decline must leave no trace, and
/// commits are applied by the engine after the gateway answers.
pub struct TickContext<'a> {
    pub input: &'a TickInput,
    pub timing: &'a CycleTracker,
    pub ledger: &'a HealthLedger,
    pub profile: &'a ArchetypeProfile,
    pub catalogue: &'a ActionCatalogue,
    pub agent: &'a AgentState,
}

impl TickContext<'_> {
    /// Shared guard chain, cheap checks first: config toggle, catalogue
    /// lookup, level gate, resource gate, cooldown-ready gate, timing
    /// legality for the action's class. Returns the action facts when every
    /// gate passes; modules layer their situational checks on top.
    pub fn guard(&self, enabled: bool, action_id: u64) -> Option<&'static ActionInfo> {
        if !enabled {
            return None;
        }
        let info = self.catalogue.get(action_id)?;
        let actor = &self.input.actor;
        if !actor.alive || actor.level < info.min_level {
            return None;
        }
        if actor.mana < info.mana_cost {
            return None;
        }
        if !actor.is_ready(action_id) {
            return None;
        }
        if !self.class_legal(info) {
            return None;
        }
        Some(info)
    }

    /// Whether the timing machine allows this action class right now.
    pub fn class_legal(&self, info: &ActionInfo) -> bool {
        match info.class {
            ActionClass::Primary => self.timing.can_issue_primary(),
            ActionClass::Secondary => {
                self.timing.can_issue_secondary() && !self.timing.would_clip(info.lock_secs)
            }
        }
    }
}
