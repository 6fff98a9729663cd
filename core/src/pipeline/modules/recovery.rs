//! Resurrection of fallen allies.

use crate::catalogue::actions;
use crate::pipeline::context::{ActionRequest, TickContext};
use crate::snapshot::{EntitySnapshot, Role};

/// Raise the most valuable fallen party member: healers first (they bring
/// the rest back), then tanks, then whoever died first in input order.
pub(super) fn resuscitate(ctx: &TickContext) -> Option<ActionRequest> {
    let info = ctx.guard(ctx.profile.toggles.resuscitate, actions::RESUSCITATE)?;

    let actor = &ctx.input.actor;
    let in_range = |e: &&EntitySnapshot| {
        !e.alive && e.id != actor.id && actor.position.within(&e.position, info.range)
    };

    let fallen = ctx
        .input
        .party
        .iter()
        .filter(in_range)
        .find(|e| e.role == Role::Healer)
        .or_else(|| {
            ctx.input
                .party
                .iter()
                .filter(in_range)
                .find(|e| e.role == Role::Tank)
        })
        .or_else(|| ctx.input.party.iter().find(in_range))?;

    Some(ActionRequest::at_entity(info.id, fallen.id))
}
