use chrono::NaiveDateTime;
use hashbrown::HashMap;

use crate::snapshot::EntitySnapshot;

/// Seconds after which an unreconciled pending heal is pruned regardless.
pub const PENDING_EXPIRY_SECS: i64 = 4;

/// One not-yet-confirmed heal in flight toward a target.
#[derive(Debug, Clone)]
pub struct PendingHeal {
    /// Estimated magnitude of the heal
    pub amount: i64,

    /// Raw health the target had when the heal was issued. The heal is
    /// considered landed once raw health reaches `baseline_hp + amount`.
    pub baseline_hp: i64,

    pub registered_at: NaiveDateTime,
}

/// What a reconcile pass did for one entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOutcome {
    /// Records pruned because the heal was observed to have landed
    pub landed: usize,

    /// Records pruned by the expiry window (heal never confirmed)
    pub expired: usize,

    /// Estimated amount still pending after the pass
    pub still_pending: i64,
}

/// Pending-heal records keyed by target entity.
///
/// One ledger per agent instance. Within a tick the engine reconciles first,
/// then registers zero or more heals as modules commit; no other ordering is
/// legal.
#[derive(Debug, Clone, Default)]
pub struct HealthLedger {
    pending: HashMap<i64, Vec<PendingHeal>>,
}

impl HealthLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicted health: raw health plus unexpired pending heals, clamped to
    /// max health.
    pub fn predicted_health(&self, entity: &EntitySnapshot) -> i64 {
        let Some(records) = self.pending.get(&entity.id) else {
            return entity.hp;
        };
        let pending: i64 = records.iter().map(|r| r.amount).sum();
        (entity.hp + pending).clamp(0, entity.max_hp)
    }

    /// Predicted health as a fraction of maximum, in [0.0, 1.0].
    pub fn predicted_fraction(&self, entity: &EntitySnapshot) -> f32 {
        if entity.max_hp <= 0 {
            return 0.0;
        }
        (self.predicted_health(entity) as f32 / entity.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Predicted missing health (max - predicted), never negative.
    pub fn predicted_missing(&self, entity: &EntitySnapshot) -> i64 {
        (entity.max_hp - self.predicted_health(entity)).max(0)
    }

    /// Record an issued heal toward a target, using the target's current raw
    /// health as the landing baseline.
    pub fn register_pending_heal(
        &mut self,
        target_id: i64,
        amount: i64,
        baseline_hp: i64,
        at: NaiveDateTime,
    ) {
        self.pending.entry(target_id).or_default().push(PendingHeal {
            amount,
            baseline_hp,
            registered_at: at,
        });
    }

    /// Drop all records for one entity. Used to roll back optimistic
    /// registration when the gateway rejects the action in the same tick.
    pub fn clear_pending(&mut self, target_id: i64) {
        self.pending.remove(&target_id);
    }

    /// Reconcile one entity against its fresh snapshot.
    ///
    /// Prunes records whose heal has visibly landed (raw health reached
    /// baseline + amount, or the target is full), all records of dead
    /// targets, and anything older than [`PENDING_EXPIRY_SECS`].
    pub fn reconcile(&mut self, entity: &EntitySnapshot, now: NaiveDateTime) -> ReconcileOutcome {
        let Some(records) = self.pending.get_mut(&entity.id) else {
            return ReconcileOutcome::default();
        };

        let mut outcome = ReconcileOutcome::default();

        records.retain(|record| {
            if !entity.alive {
                outcome.expired += 1;
                return false;
            }
            if entity.hp >= record.baseline_hp + record.amount || entity.hp >= entity.max_hp {
                outcome.landed += 1;
                return false;
            }
            let age = now.signed_duration_since(record.registered_at).num_seconds();
            if age >= PENDING_EXPIRY_SECS {
                outcome.expired += 1;
                return false;
            }
            outcome.still_pending += record.amount;
            true
        });

        if records.is_empty() {
            self.pending.remove(&entity.id);
        }

        outcome
    }

    /// Drop records for targets no longer tracked by the environment (left
    /// the party, despawned). Records of known targets are untouched.
    pub fn retain_targets(&mut self, known: impl Fn(i64) -> bool) {
        self.pending.retain(|&target_id, _| known(target_id));
    }

    /// Total estimated heal amount currently in flight toward a target.
    pub fn pending_amount(&self, target_id: i64) -> i64 {
        self.pending
            .get(&target_id)
            .map(|records| records.iter().map(|r| r.amount).sum())
            .unwrap_or(0)
    }

    /// Number of tracked records across all targets.
    pub fn record_count(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }
}
