//! Predictive health model
//!
//! The ledger tracks heals that were issued but have not landed yet, so
//! triage can reason about *future* health instead of stale raw values. A
//! target that already has a big heal in flight stops looking like the most
//! urgent patient, which is what prevents two heals from being committed to
//! the same near-full target back to back.
//!
//! Records are pruned when the real heal is observed to have landed, when
//! the target dies or fills up, and unconditionally after a fixed expiry
//! window; a heal that never reconciles (overwritten, target died mid-cast)
//! must not distort prediction forever.

mod ledger;


pub use ledger::{HealthLedger, PendingHeal, ReconcileOutcome, PENDING_EXPIRY_SECS};
