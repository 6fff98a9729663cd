//! Per-tick engine orchestration
//!
//! The engine owns the long-lived pieces (cycle tracker, health ledger,
//! agent state, pipeline, gateway) and routes one tick through them:
//! timing update, ledger reconcile, pipeline walk, gateway execution,
//! prediction bookkeeping. Components store, the engine routes.
//!
//! `evaluate_tick` always returns a decision (possibly "no action") and
//! never fails. Absent environment data and gateway rejections are both
//! recovered within the tick.

use kolto_types::ArchetypeProfile;

use crate::catalogue::{ActionCatalogue, ActionClass};
use crate::gateway::{ExecutionGateway, TargetRef};
use crate::pipeline::{field_medic_modules, AgentState, AssemblyError, ModuleDescriptor, Pipeline, TickContext};
use crate::prediction::HealthLedger;
use crate::signals::EngineSignal;
use crate::snapshot::TickInput;
use crate::timing::CycleTracker;

/// The action that went out this tick, if any.
#[derive(Debug, Clone)]
pub struct IssuedAction {
    pub action_id: u64,
    pub action_name: &'static str,
    pub target: TargetRef,
}

/// Outcome of one tick. "No action" is a normal outcome, not an error.
#[derive(Debug, Clone, Default)]
pub struct TickDecision {
    pub issued: Option<IssuedAction>,
    pub module: Option<&'static str>,
}

/// One agent's decision engine. Instances are independent; two agents must
/// not share an engine (or its ledger).
pub struct Engine<G: ExecutionGateway> {
    profile: ArchetypeProfile,
    catalogue: ActionCatalogue,
    pipeline: Pipeline,
    tracker: CycleTracker,
    ledger: HealthLedger,
    agent: AgentState,
    gateway: G,
    signals: Vec<EngineSignal>,
}

impl<G: ExecutionGateway> Engine<G> {
    /// Assemble an engine from an explicit module table. Fails only on
    /// configuration errors (duplicate priorities, unknown action IDs).
    pub fn new(
        profile: ArchetypeProfile,
        modules: Vec<ModuleDescriptor>,
        catalogue: ActionCatalogue,
        gateway: G,
    ) -> Result<Self, AssemblyError> {
        let pipeline = Pipeline::assemble(modules, &catalogue)?;
        Ok(Self {
            profile,
            catalogue,
            pipeline,
            tracker: CycleTracker::new(),
            ledger: HealthLedger::new(),
            agent: AgentState::new(),
            gateway,
            signals: Vec::new(),
        })
    }

    /// The standard field-medic engine.
    pub fn field_medic(profile: ArchetypeProfile, gateway: G) -> Result<Self, AssemblyError> {
        Self::new(
            profile,
            field_medic_modules(),
            ActionCatalogue::builtin(),
            gateway,
        )
    }

    /// Evaluate one tick. Always returns a decision, never fails.
    pub fn evaluate_tick(&mut self, input: &TickInput) -> TickDecision {
        let now = input.timestamp;

        self.tracker.observe(&input.timing);

        if let Some(signal) = self.agent.begin_tick(now) {
            self.signals.push(signal);
        }

        // Sweep records for entities that left the roster. An empty party is
        // absent environment data, not an empty roster, so nothing is swept.
        if !input.party.is_empty() {
            self.ledger
                .retain_targets(|id| input.party.iter().any(|e| e.id == id));
        }
        for entity in &input.party {
            let outcome = self.ledger.reconcile(entity, now);
            if outcome.expired > 0 {
                tracing::debug!(
                    "[LEDGER] {} pending heal(s) on {} expired unconfirmed",
                    outcome.expired,
                    entity.name
                );
                self.signals.push(EngineSignal::PendingHealExpired {
                    target_id: entity.id,
                    records: outcome.expired,
                    timestamp: now,
                });
            }
        }

        let commitment = {
            let ctx = TickContext {
                input,
                timing: &self.tracker,
                ledger: &self.ledger,
                profile: &self.profile,
                catalogue: &self.catalogue,
                agent: &self.agent,
            };
            self.pipeline.run(&ctx)
        };

        let Some(commitment) = commitment else {
            return TickDecision::default();
        };
        let request = commitment.request;

        let Some(info) = self.catalogue.get(request.action_id) else {
            // Assembly validates every module action; a miss here is a bug
            tracing::error!(
                "BUG: committed action {} missing from catalogue",
                request.action_id
            );
            return TickDecision::default();
        };

        // Optimistic registration before the gateway answers; rolled back
        // below on rejection
        for &(target_id, amount) in &request.pending_heals {
            let baseline = input
                .party
                .iter()
                .find(|e| e.id == target_id)
                .map(|e| e.hp)
                .unwrap_or(0);
            self.ledger
                .register_pending_heal(target_id, amount, baseline, now);
        }

        let success = match request.target {
            TargetRef::Entity(target_id) => self.gateway.execute(request.action_id, target_id),
            TargetRef::Ground(position) => self.gateway.execute_at(request.action_id, position),
        };

        if !success {
            for &(target_id, _) in &request.pending_heals {
                self.ledger.clear_pending(target_id);
            }
            tracing::warn!(
                "[PIPELINE] gateway rejected {} from {}",
                info.name,
                commitment.module
            );
            self.signals.push(EngineSignal::ActionRejected {
                action_id: info.id,
                action_name: info.name,
                module: commitment.module,
                timestamp: now,
            });
            // No retry this tick - the next module does NOT get a turn
            return TickDecision::default();
        }

        match info.class {
            ActionClass::Primary => self.tracker.note_primary_issued(info.lock_secs),
            ActionClass::Secondary => self.tracker.note_secondary_issued(info.lock_secs),
        }

        if let Some(signal) = self
            .agent
            .note_executed(request.action_id, commitment.priority, now)
        {
            self.signals.push(signal);
        }

        tracing::info!(
            "[PIPELINE] {} issued {} ({:?})",
            commitment.module,
            info.name,
            request.target
        );
        self.signals.push(EngineSignal::ActionIssued {
            action_id: info.id,
            action_name: info.name,
            module: commitment.module,
            target: request.target,
            timestamp: now,
        });

        TickDecision {
            issued: Some(IssuedAction {
                action_id: info.id,
                action_name: info.name,
                target: request.target,
            }),
            module: Some(commitment.module),
        }
    }

    /// Drain signals emitted since the last call.
    pub fn take_signals(&mut self) -> Vec<EngineSignal> {
        std::mem::take(&mut self.signals)
    }

    pub fn ledger(&self) -> &HealthLedger {
        &self.ledger
    }

    pub fn tracker(&self) -> &CycleTracker {
        &self.tracker
    }

    pub fn profile(&self) -> &ArchetypeProfile {
        &self.profile
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}
