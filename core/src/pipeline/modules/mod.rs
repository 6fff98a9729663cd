//! Decision module implementations
//!
//! One function per concern, dispatched from the closed [`ModuleKind`] list.
//! Every function is a pure predicate over the tick context: it either
//! returns a fully-formed [`ActionRequest`] or `None`, and a `None` leaves
//! no trace observable by later modules in the same tick.

mod emergency;
mod healing;
mod mitigation;
mod offense;
mod recovery;
mod upkeep;

use super::context::{ActionRequest, TickContext};
use super::module::ModuleKind;

/// Dispatch one module's commit attempt.
pub(crate) fn try_commit(kind: &ModuleKind, ctx: &TickContext) -> Option<ActionRequest> {
    match kind {
        ModuleKind::Resuscitate => recovery::resuscitate(ctx),
        ModuleKind::GaugeUpkeep => upkeep::probe_upkeep(ctx),
        ModuleKind::EmergencyResponse => emergency::emergency_medpac(ctx),
        ModuleKind::ProactiveBuff => upkeep::stim_boost(ctx),
        ModuleKind::Mitigation => mitigation::protective_screen(ctx),
        ModuleKind::FreeSpend => healing::surgical_probe(ctx),
        ModuleKind::AreaHeal => healing::nanotech_cloud(ctx),
        ModuleKind::SingleHeal => healing::kolto_injection(ctx),
        ModuleKind::Offense => offense::offense(ctx),
    }
}
