use kolto_types::TriageWeights;

use crate::prediction::HealthLedger;
use crate::snapshot::{EntitySnapshot, Position, Role};

/// Raw per-candidate factors gathered in the collection pass.
struct CandidateFactors<'a> {
    entity: &'a EntitySnapshot,
    rate: f32,
    accel: f32,
    missing_fraction: f32,
    shield_fraction: f32,
    mitigation: f32,
    time_to_death: f32,
    predicted_fraction: f32,
}

/// Most endangered candidate by weighted urgency score.
///
/// One pass over the entities gathers factors and the normalization
/// denominators (max observed rate/acceleration) together; scoring then runs
/// over the gathered candidates only. Candidates must be alive, in range,
/// and below full predicted health.
///
/// Ties break by lowest predicted-health fraction, then by input order, so
/// repeated calls on identical input are deterministic.
pub fn most_endangered<'a>(
    entities: &'a [EntitySnapshot],
    ledger: &HealthLedger,
    origin: Position,
    max_range: f32,
    weights: &TriageWeights,
) -> Option<&'a EntitySnapshot> {
    let mut candidates: Vec<CandidateFactors<'a>> = Vec::with_capacity(entities.len());
    let mut max_rate = 0.0f32;
    let mut max_accel = 0.0f32;

    for entity in entities {
        if !entity.alive || !origin.within(&entity.position, max_range) {
            continue;
        }
        let predicted_fraction = ledger.predicted_fraction(entity);
        if predicted_fraction >= 1.0 {
            continue;
        }

        let rate = entity.incoming_dps.max(0.0);
        let accel = entity.incoming_dps_delta.max(0.0);
        max_rate = max_rate.max(rate);
        max_accel = max_accel.max(accel);

        let shield_fraction = if entity.max_hp > 0 {
            (entity.shield as f32 / entity.max_hp as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let time_to_death = if rate > 0.0 {
            ledger.predicted_health(entity) as f32 / rate
        } else {
            f32::INFINITY
        };

        candidates.push(CandidateFactors {
            entity,
            rate,
            accel,
            missing_fraction: 1.0 - predicted_fraction,
            shield_fraction,
            mitigation: entity.mitigation.clamp(0.0, 1.0),
            time_to_death,
            predicted_fraction,
        });
    }

    let mut best: Option<(&CandidateFactors, f32)> = None;

    for candidate in &candidates {
        let score = score_candidate(candidate, weights, max_rate, max_accel);
        let replace = match best {
            None => true,
            Some((incumbent, best_score)) => {
                score > best_score
                    || (score == best_score
                        && candidate.predicted_fraction < incumbent.predicted_fraction)
            }
        };
        if replace {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate.entity)
}

fn score_candidate(
    candidate: &CandidateFactors,
    weights: &TriageWeights,
    max_rate: f32,
    max_accel: f32,
) -> f32 {
    let normalized_rate = if max_rate > 0.0 {
        candidate.rate / max_rate
    } else {
        0.0
    };
    let normalized_accel = if max_accel > 0.0 {
        candidate.accel / max_accel
    } else {
        0.0
    };

    let urgency = if candidate.time_to_death.is_finite() && weights.ttd_horizon_secs > 0.0 {
        (1.0 - candidate.time_to_death / weights.ttd_horizon_secs).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let role_bonus = match candidate.entity.role {
        Role::Tank => weights.tank_bonus,
        Role::Healer => weights.cohealer_bonus,
        _ => 0.0,
    };

    weights.incoming_rate * normalized_rate
        + role_bonus
        + weights.missing_health * candidate.missing_fraction
        + weights.acceleration * normalized_accel
        + weights.urgency * urgency
        - weights.shield_penalty * candidate.shield_fraction
        - weights.mitigation_penalty * candidate.mitigation
}
