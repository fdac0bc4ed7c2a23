//! PyO3 entry point for the assignment planner
//!
//! # Example (from Python)
//!
//! ```python
//! from secret_santa_core import plan_assignments
//!
//! result = plan_assignments(
//!     {"alice": ["bob"], "bob": [], "carol": [], "dave": []},
//!     seed=12345,
//! )
//! for giver, receiver in result["assignments"].items():
//!     print(f"{giver} buys for {receiver}")
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_roster, plan_error_to_py, plan_to_py};
use crate::models::ExclusionSemantics;
use crate::planner::{AssignmentPlanner, PlannerConfig};
use crate::rng::fresh_seed;

/// Plan a gift-giving cycle
///
/// # Arguments
///
/// * `participants` - Dict of participant id to list of excluded ids
/// * `seed` - RNG seed; a fresh one is drawn when omitted
/// * `directional` - Only block the excluding participant's own giving edge
/// * `max_search_steps` - Optional cap on a single cycle search
///
/// # Errors
///
/// Raises ValueError for an invalid roster, RuntimeError when assignments
/// are not possible or the search budget runs out.
#[pyfunction]
#[pyo3(signature = (participants, seed=None, directional=false, max_search_steps=None))]
pub fn plan_assignments(
    py: Python<'_>,
    participants: &Bound<'_, PyDict>,
    seed: Option<u64>,
    directional: bool,
    max_search_steps: Option<u64>,
) -> PyResult<Py<PyDict>> {
    let roster = parse_roster(participants)?;

    let config = PlannerConfig {
        rng_seed: seed.unwrap_or_else(fresh_seed),
        exclusion_semantics: if directional {
            ExclusionSemantics::Directional
        } else {
            ExclusionSemantics::Symmetric
        },
        max_search_steps,
    };

    let mut planner = AssignmentPlanner::from_config(config).map_err(plan_error_to_py)?;
    let plan = planner.plan(&roster).map_err(plan_error_to_py)?;

    plan_to_py(py, &plan)
}
