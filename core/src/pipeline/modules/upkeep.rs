//! Maintenance concerns: gauge placement and proactive self buffs.

use crate::catalogue::{actions, effects};
use crate::pipeline::context::{ActionRequest, TickContext};
use crate::triage::find_tank;

/// Keep the kolto probe rolling on the tank. The probe is what feeds the
/// gauge, so letting it drop starves every free spend downstream.
pub(super) fn probe_upkeep(ctx: &TickContext) -> Option<ActionRequest> {
    let info = ctx.guard(ctx.profile.toggles.kolto_probe, actions::KOLTO_PROBE)?;

    let actor = &ctx.input.actor;
    let tank = find_tank(&ctx.input.party, actor.id)?;
    if !actor.position.within(&tank.position, info.range) {
        return None;
    }

    let needs_refresh = match tank.effect(effects::KOLTO_PROBE_HOT) {
        None => true,
        Some(probe) => probe.remaining_secs < ctx.profile.thresholds.probe_refresh_secs,
    };
    if !needs_refresh {
        return None;
    }

    Some(ActionRequest::at_entity(info.id, tank.id))
}

/// Reapply the stim-boost self buff whenever it is missing.
pub(super) fn stim_boost(ctx: &TickContext) -> Option<ActionRequest> {
    let info = ctx.guard(ctx.profile.toggles.stim_boost, actions::STIM_BOOST)?;

    let actor = &ctx.input.actor;
    if actor.has_effect(effects::STIM_BOOST_BUFF) {
        return None;
    }

    Some(ActionRequest::at_entity(info.id, actor.id))
}
