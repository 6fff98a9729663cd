//! Tests for the cycle tracker
//!
//! Weave legality, rollover resets, and conservative no-data defaults.

use crate::snapshot::TimingSample;

use super::{CyclePhase, CycleTracker};

fn sample(cycle_total: f32, cycle_elapsed: f32, lock_remaining: f32) -> TimingSample {
    TimingSample {
        elapsed_secs: 0.1,
        in_cast: false,
        cycle_total,
        cycle_elapsed,
        lock_remaining,
    }
}

#[test]
fn test_no_data_reports_ready() {
    let mut tracker = CycleTracker::new();
    tracker.observe(&TimingSample::default());

    assert_eq!(tracker.phase(), CyclePhase::Ready);
    assert_eq!(tracker.cycle_remaining(), 0.0);
    assert!(tracker.can_issue_primary());
    assert!(!tracker.can_issue_secondary());
}

#[test]
fn test_weave_legality_boundary() {
    // cycle_total=2.5, per_weave_lock=0.6, buffer=0.1:
    // secondary legal while cycle_remaining >= 0.7, illegal below
    let mut tracker = CycleTracker::new();

    tracker.observe(&sample(2.5, 1.8, 0.0)); // remaining = 0.7
    assert!(tracker.can_issue_secondary());
    assert_eq!(tracker.phase(), CyclePhase::WeaveWindow);

    tracker.observe(&sample(2.5, 1.85, 0.0)); // remaining = 0.65
    assert!(!tracker.can_issue_secondary());
    assert_eq!(tracker.phase(), CyclePhase::Rolling);
}

#[test]
fn test_two_weave_cap() {
    let mut tracker = CycleTracker::new();
    tracker.observe(&sample(2.5, 0.1, 0.0)); // remaining = 2.4, budget = 2

    assert_eq!(tracker.weave_budget(), 2);
    assert!(tracker.can_issue_secondary());

    tracker.note_secondary_issued(0.0);
    assert!(tracker.can_issue_secondary());

    tracker.note_secondary_issued(0.0);
    assert!(
        !tracker.can_issue_secondary(),
        "third weave must be refused even with cycle time left"
    );
    assert_eq!(tracker.weaves_used_this_cycle(), 2);
}

#[test]
fn test_rollover_resets_weave_count() {
    let mut tracker = CycleTracker::new();
    tracker.observe(&sample(2.5, 0.2, 0.0));
    tracker.note_secondary_issued(0.0);
    tracker.note_secondary_issued(0.0);
    assert_eq!(tracker.weaves_used_this_cycle(), 2);

    // Remaining time increased: a new primary action started between samples
    tracker.observe(&sample(2.5, 0.1, 0.0));
    assert_eq!(tracker.weaves_used_this_cycle(), 0);
}

#[test]
fn test_cycle_end_resets_to_ready() {
    let mut tracker = CycleTracker::new();
    tracker.observe(&sample(2.5, 1.0, 0.0));
    tracker.note_secondary_issued(0.0);

    tracker.observe(&sample(2.5, 2.5, 0.0));
    assert_eq!(tracker.phase(), CyclePhase::Ready);
    assert!(tracker.can_issue_primary());
    assert_eq!(tracker.weaves_used_this_cycle(), 0);
}

#[test]
fn test_casting_blocks_everything() {
    let mut tracker = CycleTracker::new();
    let mut s = sample(2.5, 0.5, 0.0);
    s.in_cast = true;
    tracker.observe(&s);

    assert_eq!(tracker.phase(), CyclePhase::Casting);
    assert!(!tracker.can_issue_primary());
    assert!(!tracker.can_issue_secondary());
}

#[test]
fn test_animation_lock_blocks_weaving() {
    let mut tracker = CycleTracker::new();
    tracker.observe(&sample(2.5, 0.5, 0.5)); // lock well above buffer

    assert_eq!(tracker.phase(), CyclePhase::Locked);
    assert!(!tracker.can_issue_secondary());
}

#[test]
fn test_would_clip() {
    let mut tracker = CycleTracker::new();
    tracker.observe(&sample(2.5, 2.0, 0.0)); // remaining = 0.5

    assert!(tracker.would_clip(0.6));
    assert!(!tracker.would_clip(0.4));
}

#[test]
fn test_note_primary_starts_fresh_cycle() {
    let mut tracker = CycleTracker::new();
    tracker.observe(&sample(2.5, 2.5, 0.0));
    assert!(tracker.can_issue_primary());

    tracker.note_primary_issued(0.0);
    assert!(!tracker.can_issue_primary());
    assert_eq!(tracker.cycle_remaining(), 2.5);
    assert_eq!(tracker.phase(), CyclePhase::WeaveWindow);
}
