use thiserror::Error;

use crate::catalogue::{actions, ActionCatalogue};

use super::context::{ActionRequest, TickContext};
use super::modules;

/// The concern a module implements. A closed tagged list rather than trait
/// objects: the flat table keeps ordering invariants checkable at assembly
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// Resurrection of fallen allies
    Resuscitate,
    /// Essential gauge placement (probe upkeep on the tank)
    GaugeUpkeep,
    /// Emergency single-target response
    EmergencyResponse,
    /// Proactive self buffs
    ProactiveBuff,
    /// Pre-mitigation on the tank
    Mitigation,
    /// Free/zero-cost gauge spends
    FreeSpend,
    /// Ground-targeted area healing
    AreaHeal,
    /// Single-target healing
    SingleHeal,
    /// Combo chain and filler offense
    Offense,
}

impl ModuleKind {
    /// Actions this module may issue; validated against the catalogue at
    /// assembly time.
    pub fn required_actions(&self) -> &'static [u64] {
        match self {
            Self::Resuscitate => &[actions::RESUSCITATE],
            Self::GaugeUpkeep => &[actions::KOLTO_PROBE],
            Self::EmergencyResponse => &[actions::EMERGENCY_MEDPAC],
            Self::ProactiveBuff => &[actions::STIM_BOOST],
            Self::Mitigation => &[actions::PROTECTIVE_SCREEN],
            Self::FreeSpend => &[actions::SURGICAL_PROBE],
            Self::AreaHeal => &[actions::NANOTECH_CLOUD],
            Self::SingleHeal => &[actions::KOLTO_INJECTION],
            Self::Offense => &[
                actions::INCISION,
                actions::LACERATION,
                actions::SUTURE,
                actions::RIFLE_SHOT,
            ],
        }
    }
}

/// One entry in the ordered module table.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    /// Ascending = earlier. Must be unique within one pipeline.
    pub priority: u16,
    pub name: &'static str,
    pub kind: ModuleKind,
}

/// Errors detected while assembling a pipeline. These are configuration
/// errors and abort initialization; nothing here can occur at tick time.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("duplicate module priority {priority}: {first} and {second}")]
    DuplicatePriority {
        priority: u16,
        first: &'static str,
        second: &'static str,
    },

    #[error("module {module} references unregistered action {action_id}")]
    UnknownAction {
        module: &'static str,
        action_id: u64,
    },
}

/// The ordered module table for one agent archetype.
///
/// Assembled once at startup; per tick, modules run in ascending priority
/// order and the first commit wins.
#[derive(Debug, Clone)]
pub struct Pipeline {
    modules: Vec<ModuleDescriptor>,
}

/// A winning module's proposal, handed to the engine for execution.
#[derive(Debug, Clone)]
pub struct Commitment {
    pub module: &'static str,
    pub priority: u16,
    pub request: ActionRequest,
}

impl Pipeline {
    /// Validate and order a module list.
    pub fn assemble(
        mut modules: Vec<ModuleDescriptor>,
        catalogue: &ActionCatalogue,
    ) -> Result<Self, AssemblyError> {
        modules.sort_by_key(|m| m.priority);

        for pair in modules.windows(2) {
            if pair[0].priority == pair[1].priority {
                return Err(AssemblyError::DuplicatePriority {
                    priority: pair[0].priority,
                    first: pair[0].name,
                    second: pair[1].name,
                });
            }
        }

        for module in &modules {
            for &action_id in module.kind.required_actions() {
                if !catalogue.contains(action_id) {
                    return Err(AssemblyError::UnknownAction {
                        module: module.name,
                        action_id,
                    });
                }
            }
        }

        Ok(Self { modules })
    }

    /// Run the tick: first module to commit wins, the rest never run.
    ///
    /// While a combo chain is in progress, modules with a priority number
    /// greater than the chain owner's are skipped — they cannot preempt it.
    /// Higher-urgency modules (lower numbers) still run normally.
    pub fn run(&self, ctx: &TickContext) -> Option<Commitment> {
        for descriptor in &self.modules {
            if let Some(combo) = &ctx.agent.combo
                && descriptor.priority > combo.owner_priority
            {
                continue;
            }

            if let Some(request) = modules::try_commit(&descriptor.kind, ctx) {
                tracing::debug!(
                    "[PIPELINE] {} (priority {}) committed action {}",
                    descriptor.name,
                    descriptor.priority,
                    request.action_id
                );
                return Some(Commitment {
                    module: descriptor.name,
                    priority: descriptor.priority,
                    request,
                });
            }
        }
        None
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }
}

/// The standard field-medic module table. Priority bands, lower runs first:
/// resurrection, gauge placement, emergency response, proactive buffs,
/// mitigation, free spends, area healing, single-target healing, offense.
pub fn field_medic_modules() -> Vec<ModuleDescriptor> {
    vec![
        ModuleDescriptor {
            priority: 10,
            name: "resuscitate",
            kind: ModuleKind::Resuscitate,
        },
        ModuleDescriptor {
            priority: 20,
            name: "probe_upkeep",
            kind: ModuleKind::GaugeUpkeep,
        },
        ModuleDescriptor {
            priority: 30,
            name: "emergency_medpac",
            kind: ModuleKind::EmergencyResponse,
        },
        ModuleDescriptor {
            priority: 40,
            name: "stim_boost",
            kind: ModuleKind::ProactiveBuff,
        },
        ModuleDescriptor {
            priority: 50,
            name: "protective_screen",
            kind: ModuleKind::Mitigation,
        },
        ModuleDescriptor {
            priority: 60,
            name: "surgical_probe",
            kind: ModuleKind::FreeSpend,
        },
        ModuleDescriptor {
            priority: 70,
            name: "nanotech_cloud",
            kind: ModuleKind::AreaHeal,
        },
        ModuleDescriptor {
            priority: 80,
            name: "kolto_injection",
            kind: ModuleKind::SingleHeal,
        },
        ModuleDescriptor {
            priority: 90,
            name: "offense",
            kind: ModuleKind::Offense,
        },
    ]
}
