//! Tests for AssignmentRecord - persistence hand-off
//!
//! Covers:
//! - Record contents mirror the plan
//! - JSON save/load preserves the record
//! - Roster fingerprint is canonical and detects a different roster

use secret_santa_core::{
    compute_roster_hash, AssignmentPlanner, AssignmentRecord, ExclusionSemantics, Participant,
    PlannerConfig, RecordError, Roster,
};

fn party() -> Roster {
    Roster::from_entries([
        ("alice", vec!["bob"]),
        ("bob", vec!["alice"]),
        ("carol", vec![]),
        ("dave", vec!["carol"]),
    ])
    .unwrap()
}

fn plan_record(roster: &Roster, seed: u64) -> AssignmentRecord {
    let mut planner = AssignmentPlanner::from_config(PlannerConfig {
        rng_seed: seed,
        ..Default::default()
    })
    .unwrap();
    let plan = planner.plan(roster).unwrap();
    AssignmentRecord::from_plan(&plan, roster).unwrap()
}

#[test]
fn test_record_mirrors_plan() {
    let roster = party();
    let record = plan_record(&roster, 12345);

    assert_eq!(record.rng_seed, Some(12345));
    assert_eq!(record.exclusion_semantics, ExclusionSemantics::Symmetric);
    assert_eq!(record.order.len(), 4);
    assert_eq!(record.assignments.len(), 4);
    assert_eq!(record.attempts, record.relaxed.len() + 1);

    // assignment i is order[i] → order[i + 1], wrapping
    for (i, assignment) in record.assignments.iter().enumerate() {
        assert_eq!(assignment.giver, record.order[i]);
        assert_eq!(assignment.receiver, record.order[(i + 1) % record.order.len()]);
    }

    let cycle = record.cycle().unwrap();
    assert!(cycle.covers(&roster));
}

#[test]
fn test_record_json_roundtrip() {
    let roster = party();
    let record = plan_record(&roster, 7);

    let json = record.to_json().unwrap();
    let restored = AssignmentRecord::from_json(&json).unwrap();

    assert_eq!(record, restored);
    restored.verify_roster(&roster).unwrap();
}

#[test]
fn test_record_json_field_names() {
    let record = plan_record(&party(), 7);
    let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

    assert_eq!(value["exclusion_semantics"], "symmetric");
    assert!(value["order"].is_array());
    assert!(value["assignments"][0]["giver"].is_string());
    assert!(value["assignments"][0]["receiver"].is_string());
    assert_eq!(value["roster_hash"].as_str().map(str::len), Some(64));
}

#[test]
fn test_roster_hash_ignores_input_order() {
    let a = Roster::new(vec![
        Participant::new("x").with_exclusions(["y", "z"]),
        Participant::new("y"),
        Participant::new("z"),
    ])
    .unwrap();
    let b = Roster::new(vec![
        Participant::new("z"),
        Participant::new("y"),
        Participant::new("x").with_exclusions(["z", "y"]),
    ])
    .unwrap();

    assert_eq!(compute_roster_hash(&a).unwrap(), compute_roster_hash(&b).unwrap());
}

#[test]
fn test_roster_hash_changes_with_exclusions() {
    let a = Roster::from_entries([("x", vec!["y"]), ("y", vec![])]).unwrap();
    let b = Roster::from_entries([("x", Vec::<&str>::new()), ("y", vec![])]).unwrap();

    assert_ne!(compute_roster_hash(&a).unwrap(), compute_roster_hash(&b).unwrap());
}

#[test]
fn test_verify_rejects_other_roster() {
    let record = plan_record(&party(), 1);
    let other = Roster::from_entries([("alice", Vec::<&str>::new()), ("bob", vec![])]).unwrap();

    let err = record.verify_roster(&other).unwrap_err();
    match err {
        RecordError::RosterMismatch { expected, actual } => {
            assert_eq!(expected, record.roster_hash);
            assert_ne!(expected, actual);
        }
        other => panic!("Expected RosterMismatch, got {:?}", other),
    }
}

#[test]
fn test_record_hash_is_of_original_not_relaxed_roster() {
    // Every entry must be relaxed here, yet the record still matches the input
    let roster = Roster::from_entries([("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
    let record = plan_record(&roster, 5);

    assert_eq!(record.relaxed.len(), 2);
    record.verify_roster(&roster).unwrap();
}
