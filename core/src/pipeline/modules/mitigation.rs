//! Pre-mitigation on the tank.

use crate::catalogue::{actions, effects};
use crate::pipeline::context::{ActionRequest, TickContext};
use crate::triage::find_tank;

/// Screen the tank before the damage arrives: fires when the tank is
/// unscreened and already dipping below the mitigation threshold.
pub(super) fn protective_screen(ctx: &TickContext) -> Option<ActionRequest> {
    let info = ctx.guard(
        ctx.profile.toggles.protective_screen,
        actions::PROTECTIVE_SCREEN,
    )?;

    let actor = &ctx.input.actor;
    let tank = find_tank(&ctx.input.party, actor.id)?;
    if !actor.position.within(&tank.position, info.range) {
        return None;
    }
    if tank.has_effect(effects::PROTECTIVE_SCREEN_SHIELD) {
        return None;
    }
    if ctx.ledger.predicted_fraction(tank) >= ctx.profile.thresholds.mitigation_hp {
        return None;
    }

    Some(ActionRequest::at_entity(info.id, tank.id))
}
