//! Target triage library
//!
//! Pure functions that rank or cluster candidate recipients of an action:
//! - [`lowest_health`]: smallest predicted-health fraction in range
//! - [`find_tank`]: role-tagged tank, with an aggro-holder fallback
//! - [`most_endangered`]: weighted urgency scoring in a single pass
//! - [`best_cluster_center`]: stacked-target clustering for area effects
//!
//! All selection runs on *predicted* health from the ledger, never raw
//! values. Empty entity sets and all-full-health sets yield no result,
//! never a forced pick. Everything here is recomputed fresh each tick;
//! nothing is cached.

mod cluster;
mod scoring;
mod select;


pub use cluster::{best_cluster_center, ClusterPick};
pub use scoring::most_endangered;
pub use select::{find_tank, injured_count, lowest_health};
