//! Per-tick snapshot types
//!
//! This module provides the read-only views the engine consumes each tick:
//! - **EntitySnapshot**: one party/enemy member as observed by the
//!   environment reader
//! - **ActorState**: the controlled agent itself (resources, readiness)
//! - **TickInput**: the full per-tick bundle (timing sample + snapshots)
//!
//! Snapshots are produced fresh every tick by the environment reader and
//! never mutated by the engine. The engine makes no assumption about where
//! they come from: a live client poll, a test fixture, or a replay log all
//! look the same here.

mod actor;
mod entity;
mod input;
mod position;

pub use actor::{ActionReadiness, ActorState};
pub use entity::{EntitySnapshot, Role, StatusEffect};
pub use input::{TickInput, TimingSample};
pub use position::Position;
