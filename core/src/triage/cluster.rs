use crate::prediction::HealthLedger;
use crate::snapshot::{EntitySnapshot, Position};

/// Result of a cluster scan for a ground/stacked area effect.
#[derive(Debug, Clone, Default)]
pub struct ClusterPick<'a> {
    /// The entity to center the effect on, if a qualifying cluster exists
    pub center: Option<&'a EntitySnapshot>,

    /// Injured members covered by the chosen center (center included)
    pub count: usize,

    /// IDs of the covered members
    pub member_ids: Vec<i64>,
}

/// Best stacked-target center for an area effect.
///
/// Every injured candidate is tried as a hypothetical effect center; the one
/// covering the most injured members (itself included) wins. The scan
/// short-circuits the moment a candidate covers every injured member, since
/// that cannot be beaten. Centers must lie within `max_range` of `origin`;
/// covered members may be anywhere inside `radius` of the center.
///
/// Returns an empty pick when fewer than `min_count` members would be
/// covered: area effects below their worthwhile size are declined, not
/// forced.
pub fn best_cluster_center<'a>(
    entities: &'a [EntitySnapshot],
    ledger: &HealthLedger,
    origin: Position,
    max_range: f32,
    radius: f32,
    min_count: usize,
    injured_threshold: f32,
) -> ClusterPick<'a> {
    let injured: Vec<&EntitySnapshot> = entities
        .iter()
        .filter(|e| e.alive && ledger.predicted_fraction(e) < injured_threshold)
        .collect();

    if injured.is_empty() {
        return ClusterPick::default();
    }

    let mut best_center: Option<&EntitySnapshot> = None;
    let mut best_members: Vec<i64> = Vec::new();

    for center in &injured {
        if !origin.within(&center.position, max_range) {
            continue;
        }

        let members: Vec<i64> = injured
            .iter()
            .filter(|other| center.position.within(&other.position, radius))
            .map(|other| other.id)
            .collect();

        if members.len() > best_members.len() {
            best_center = Some(center);
            best_members = members;
            // Full coverage cannot be beaten
            if best_members.len() == injured.len() {
                break;
            }
        }
    }

    match best_center {
        Some(center) if best_members.len() >= min_count => ClusterPick {
            center: Some(center),
            count: best_members.len(),
            member_ids: best_members,
        },
        _ => ClusterPick::default(),
    }
}
