//! Emergency single-target response.

use crate::catalogue::actions;
use crate::pipeline::context::{ActionRequest, TickContext};
use crate::triage::most_endangered;

/// Instant medpac on whoever the triage scorer ranks most endangered, once
/// their predicted health drops below the emergency threshold. Runs the
/// party-wide scan only after every cheap gate has passed.
pub(super) fn emergency_medpac(ctx: &TickContext) -> Option<ActionRequest> {
    let info = ctx.guard(
        ctx.profile.toggles.emergency_medpac,
        actions::EMERGENCY_MEDPAC,
    )?;

    let target = most_endangered(
        &ctx.input.party,
        ctx.ledger,
        ctx.input.actor.position,
        ctx.profile.heal_range.min(info.range),
        &ctx.profile.weights,
    )?;

    if ctx.ledger.predicted_fraction(target) >= ctx.profile.thresholds.emergency_hp {
        return None;
    }

    Some(ActionRequest::at_entity(info.id, target.id).with_pending(target.id, info.estimated_heal))
}
