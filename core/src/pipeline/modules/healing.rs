//! Healing concerns: free gauge spends, area healing, single-target healing.

use crate::catalogue::actions;
use crate::gateway::TargetRef;
use crate::pipeline::context::{ActionRequest, TickContext};
use crate::triage::{best_cluster_center, injured_count, lowest_health};

/// Free instant heal off a gauge stack. Costs nothing, so the injury bar is
/// set higher than for the cast heal.
pub(super) fn surgical_probe(ctx: &TickContext) -> Option<ActionRequest> {
    let info = ctx.guard(ctx.profile.toggles.surgical_probe, actions::SURGICAL_PROBE)?;

    if ctx.input.actor.gauge == 0 {
        return None;
    }

    let target = lowest_health(
        &ctx.input.party,
        ctx.ledger,
        ctx.input.actor.position,
        ctx.profile.heal_range.min(info.range),
        0,
    )?;

    if ctx.ledger.predicted_fraction(target) >= ctx.profile.thresholds.free_spend_hp {
        return None;
    }

    Some(ActionRequest::at_entity(info.id, target.id).with_pending(target.id, info.estimated_heal))
}

/// Ground-targeted area heal on the densest injured cluster. The cheap
/// injured-count gate runs before the quadratic cluster scan.
pub(super) fn nanotech_cloud(ctx: &TickContext) -> Option<ActionRequest> {
    let info = ctx.guard(ctx.profile.toggles.nanotech_cloud, actions::NANOTECH_CLOUD)?;

    let thresholds = &ctx.profile.thresholds;
    if injured_count(&ctx.input.party, ctx.ledger, thresholds.aoe_injured_hp)
        < ctx.profile.min_aoe_targets
    {
        return None;
    }

    let pick = best_cluster_center(
        &ctx.input.party,
        ctx.ledger,
        ctx.input.actor.position,
        ctx.profile.heal_range.min(info.range),
        ctx.profile.aoe_radius,
        ctx.profile.min_aoe_targets,
        thresholds.aoe_injured_hp,
    );
    let center = pick.center?;

    let mut request = ActionRequest {
        action_id: info.id,
        target: TargetRef::Ground(center.position),
        pending_heals: Vec::with_capacity(pick.member_ids.len()),
    };
    for member_id in pick.member_ids {
        request.pending_heals.push((member_id, info.estimated_heal));
    }
    Some(request)
}

/// Bread-and-butter cast heal on the lowest predicted-health member.
pub(super) fn kolto_injection(ctx: &TickContext) -> Option<ActionRequest> {
    let info = ctx.guard(ctx.profile.toggles.kolto_injection, actions::KOLTO_INJECTION)?;

    let target = lowest_health(
        &ctx.input.party,
        ctx.ledger,
        ctx.input.actor.position,
        ctx.profile.heal_range.min(info.range),
        0,
    )?;

    if ctx.ledger.predicted_fraction(target) >= ctx.profile.thresholds.single_heal_hp {
        return None;
    }

    Some(ActionRequest::at_entity(info.id, target.id).with_pending(target.id, info.estimated_heal))
}
