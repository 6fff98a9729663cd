//! Decision module pipeline
//!
//! An ordered table of decision modules, one per concern, assembled once at
//! startup per agent archetype. Each tick the modules run in ascending
//! priority order; the first one whose guard chain passes commits an action
//! and the rest never run. Declines are side-effect free.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ priority 10  resuscitate        "anyone to raise?"           │
//! │ priority 20  probe_upkeep       "probe still on the tank?"   │
//! │ priority 30  emergency_medpac   "anyone about to die?"       │
//! │     ...                                                      │
//! │ priority 90  offense            "spend the cycle on damage"  │
//! └──────────────────────────────────────────────────────────────┘
//!                 first commit stops the walk
//! ```
//!
//! Assembly validates the ordering invariants (unique priorities, known
//! action IDs); nothing can fail at tick time.

mod context;
mod module;
mod modules;

#[cfg(test)]
mod pipeline_tests;

pub use context::{
    ActionRequest, AgentState, ComboState, ComboStep, TickContext, COMBO_WINDOW_SECS,
};
pub use module::{
    field_medic_modules, AssemblyError, Commitment, ModuleDescriptor, ModuleKind, Pipeline,
};
