//! Assignment Record - hand-off to persistence
//!
//! Serializable summary of a successful planning run, stored by the
//! application as the event's assignment and used to dispatch one
//! notification per giver.
//!
//! # Critical Invariants
//!
//! - **Roster matching**: a record carries a SHA-256 fingerprint of the
//!   canonical input roster and can only be verified against that roster
//! - **Canonical form**: participant and exclusion order do not change the
//!   fingerprint

use crate::models::{Assignment, Cycle, ExclusionSemantics, ParticipantId, Roster};
use crate::planner::engine::{AssignmentPlan, RelaxedExclusion};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Roster mismatch: record was made for roster {expected}, got {actual}")]
    RosterMismatch { expected: String, actual: String },
}

/// Persisted outcome of a planning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub run_id: String,

    /// Generator seed, when known
    pub rng_seed: Option<u64>,

    pub exclusion_semantics: ExclusionSemantics,

    /// Cycle order; giver `i` buys for `i + 1`, last buys for first
    pub order: Vec<ParticipantId>,

    pub assignments: Vec<Assignment>,

    pub relaxed: Vec<RelaxedExclusion>,

    pub attempts: usize,

    /// SHA-256 of the canonical input roster
    pub roster_hash: String,
}

impl AssignmentRecord {
    /// Build a record for `plan`, fingerprinting the roster it was planned from
    pub fn from_plan(plan: &AssignmentPlan, roster: &Roster) -> Result<Self, RecordError> {
        Ok(Self {
            run_id: plan.run_id().to_string(),
            rng_seed: plan.rng_seed(),
            exclusion_semantics: plan.semantics(),
            order: plan.cycle().ids().to_vec(),
            assignments: plan.cycle().assignment_list(),
            relaxed: plan.relaxations().to_vec(),
            attempts: plan.attempts(),
            roster_hash: compute_roster_hash(roster)?,
        })
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        serde_json::to_string_pretty(self).map_err(|e| RecordError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        serde_json::from_str(json).map_err(|e| RecordError::Serialization(e.to_string()))
    }

    /// Rebuild the cycle from the stored order
    pub fn cycle(&self) -> Option<Cycle> {
        Cycle::from_order(self.order.clone())
    }

    /// Check that this record was produced from `roster`
    pub fn verify_roster(&self, roster: &Roster) -> Result<(), RecordError> {
        let actual = compute_roster_hash(roster)?;
        if actual != self.roster_hash {
            return Err(RecordError::RosterMismatch {
                expected: self.roster_hash.clone(),
                actual,
            });
        }
        Ok(())
    }
}

/// SHA-256 hex digest of the roster in canonical (sorted) form
pub fn compute_roster_hash(roster: &Roster) -> Result<String, RecordError> {
    let canonical: BTreeMap<&str, Vec<&str>> = roster
        .participants()
        .iter()
        .map(|p| {
            (
                p.id().as_str(),
                p.exclusions().iter().map(ParticipantId::as_str).collect(),
            )
        })
        .collect();

    let json = serde_json::to_string(&canonical)
        .map_err(|e| RecordError::Serialization(format!("Roster serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}
