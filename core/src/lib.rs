pub mod catalogue;
pub mod config;
pub mod engine;
pub mod gateway;
pub mod pipeline;
pub mod prediction;
pub mod signals;
pub mod snapshot;
pub mod timing;
pub mod triage;


// Re-exports for convenience
pub use engine::{Engine, IssuedAction, TickDecision};
pub use gateway::{ExecutionGateway, TargetRef};
pub use prediction::HealthLedger;
pub use signals::EngineSignal;
pub use snapshot::{ActorState, EntitySnapshot, Position, Role, TickInput, TimingSample};
pub use timing::{CyclePhase, CycleTracker};
