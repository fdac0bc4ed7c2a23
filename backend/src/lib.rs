//! Secret Santa Core - Assignment Cycle Planner
//!
//! Constrained random gift-exchange assignment with deterministic execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Participant, Roster, Cycle, PlanEvent)
//! - **graph**: Exclusion graph and randomized Hamiltonian cycle search
//! - **planner**: Planning loop with exclusion relaxation, assignment records
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. A returned cycle visits every participant exactly once
//! 2. No cycle pair is blocked by the exclusions it was planned under
//! 3. All randomness is deterministic (injected, seeded RNG)
//! 4. The caller's roster is never modified by relaxation

// Module declarations
pub mod graph;
pub mod models;
pub mod planner;
pub mod rng;

// Re-exports for convenience
pub use graph::{ExclusionGraph, NoCycleFound, SearchError};
pub use models::{
    Assignment, Cycle, ExclusionSemantics, Participant, ParticipantId, PlanEvent, PlanLog, Roster,
    RosterError,
};
pub use planner::{
    compute_roster_hash, AssignmentPlan, AssignmentPlanner, AssignmentRecord, OutcomeSink,
    PlanError, PlannerConfig, RecordError, RelaxedExclusion,
};
pub use rng::{fresh_seed, RandomSource, RngManager};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn secret_santa_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::planner::plan_assignments, m)?)?;
    Ok(())
}
