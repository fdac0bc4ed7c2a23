//! Planner - repeated cycle search with exclusion relaxation
//!
//! See `engine.rs` for the planning loop and `record.rs` for the
//! persistence hand-off.

pub mod engine;
pub mod record;

// Re-export main types for convenience
pub use engine::{
    AssignmentPlan, AssignmentPlanner, OutcomeSink, PlanError, PlannerConfig, RelaxedExclusion,
};
pub use record::{compute_roster_hash, AssignmentRecord, RecordError};
