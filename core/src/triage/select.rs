use crate::prediction::HealthLedger;
use crate::snapshot::{EntitySnapshot, Position, Role};

/// Entity with the smallest predicted-health fraction within range.
///
/// Candidates must be alive, in range of `origin`, and actually missing
/// health after accounting for heals in flight; a target with a big heal
/// inbound is not a candidate, which is what prevents overheal
/// double-commits. `min_missing` additionally requires at least that much
/// predicted-missing health (pass 0 to accept any injury).
///
/// Ties resolve to the first candidate in input order.
pub fn lowest_health<'a>(
    entities: &'a [EntitySnapshot],
    ledger: &HealthLedger,
    origin: Position,
    max_range: f32,
    min_missing: i64,
) -> Option<&'a EntitySnapshot> {
    let mut best: Option<(&EntitySnapshot, f32)> = None;

    for entity in entities {
        if !entity.alive || !origin.within(&entity.position, max_range) {
            continue;
        }
        let missing = ledger.predicted_missing(entity);
        if missing <= 0 || missing < min_missing {
            continue;
        }
        let fraction = ledger.predicted_fraction(entity);
        match best {
            Some((_, best_fraction)) if fraction >= best_fraction => {}
            _ => best = Some((entity, fraction)),
        }
    }

    best.map(|(entity, _)| entity)
}

/// First alive non-self entity whose role tag is tank.
///
/// Parties without a role-tagged tank (roleless groups, NPC-filled slots)
/// fall back to whichever entity currently holds hostile aggression.
pub fn find_tank<'a>(entities: &'a [EntitySnapshot], self_id: i64) -> Option<&'a EntitySnapshot> {
    entities
        .iter()
        .find(|e| e.alive && e.id != self_id && e.role == Role::Tank)
        .or_else(|| {
            entities
                .iter()
                .find(|e| e.alive && e.id != self_id && e.has_aggro)
        })
}

/// Number of alive entities whose predicted-health fraction is below
/// `threshold`. Used by area-heal guards before paying for a cluster scan.
pub fn injured_count(
    entities: &[EntitySnapshot],
    ledger: &HealthLedger,
    threshold: f32,
) -> usize {
    entities
        .iter()
        .filter(|e| e.alive && ledger.predicted_fraction(e) < threshold)
        .count()
}
