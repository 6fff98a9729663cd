//! Offense: the incision combo chain and the rifle-shot filler.

use crate::catalogue::actions;
use crate::pipeline::context::{ActionRequest, ComboStep, TickContext};
use crate::snapshot::EntitySnapshot;

/// Spend leftover cycles on damage. Continues an in-progress combo step when
/// one is pending, starts a fresh chain when in melee range, and otherwise
/// falls back to the zero-cost filler. Combo spenders respect the mana
/// floor; the filler is always free.
pub(super) fn offense(ctx: &TickContext) -> Option<ActionRequest> {
    if !ctx.profile.toggles.offense {
        return None;
    }

    let enemy = nearest_enemy(ctx)?;
    let above_floor =
        ctx.input.actor.mana_fraction() > ctx.profile.thresholds.offense_mana_floor;

    if let Some(combo) = &ctx.agent.combo {
        let step_action = match combo.next_step {
            ComboStep::Laceration => actions::LACERATION,
            ComboStep::Suture => actions::SUTURE,
        };
        if above_floor
            && let Some(info) = ctx.guard(true, step_action)
            && ctx.input.actor.position.within(&enemy.position, info.range)
        {
            return Some(ActionRequest::at_entity(info.id, enemy.id));
        }
        // Step not usable this tick (range, mana, timing) - fall through to
        // the filler; the chain stays alive until its window lapses.
    } else if above_floor
        && let Some(info) = ctx.guard(true, actions::INCISION)
        && ctx.input.actor.position.within(&enemy.position, info.range)
    {
        return Some(ActionRequest::at_entity(info.id, enemy.id));
    }

    let info = ctx.guard(true, actions::RIFLE_SHOT)?;
    if !ctx.input.actor.position.within(&enemy.position, info.range) {
        return None;
    }
    Some(ActionRequest::at_entity(info.id, enemy.id))
}

/// Nearest living enemy by squared distance; ties keep input order.
fn nearest_enemy<'a>(ctx: &TickContext<'a>) -> Option<&'a EntitySnapshot> {
    let origin = ctx.input.actor.position;
    let mut best: Option<(&EntitySnapshot, f32)> = None;
    for enemy in &ctx.input.enemies {
        if !enemy.alive {
            continue;
        }
        let dist_sq = origin.dist_sq(&enemy.position);
        match best {
            Some((_, best_dist)) if dist_sq >= best_dist => {}
            _ => best = Some((enemy, dist_sq)),
        }
    }
    best.map(|(enemy, _)| enemy)
}
