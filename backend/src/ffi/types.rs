//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust planner types and Python dicts/lists.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::{Participant, Roster};
use crate::planner::{AssignmentPlan, PlanError};

/// Parse `{participant_id: [excluded_id, ...]}` into a validated roster
///
/// # Errors
/// Raises ValueError for non-string ids or an invalid roster
/// (self-exclusion, unknown excluded id).
pub fn parse_roster(participants: &Bound<'_, PyDict>) -> PyResult<Roster> {
    let mut entries = Vec::with_capacity(participants.len());
    for (key, value) in participants.iter() {
        let id: String = key.extract()?;
        let exclusions: Vec<String> = value.extract()?;
        entries.push(Participant::new(id).with_exclusions(exclusions));
    }

    Roster::new(entries).map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))
}

/// Convert a plan to a Python dict
///
/// Keys: `run_id`, `cycle`, `assignments` (giver → receiver), `relaxed`
/// (list of `(participant, excluded)` tuples), `attempts`.
pub fn plan_to_py(py: Python<'_>, plan: &AssignmentPlan) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("run_id", plan.run_id().to_string())?;

    let order: Vec<&str> = plan.cycle().ids().iter().map(|id| id.as_str()).collect();
    dict.set_item("cycle", PyList::new(py, order)?)?;

    let assignments = PyDict::new(py);
    for (giver, receiver) in plan.cycle().pairs() {
        assignments.set_item(giver.as_str(), receiver.as_str())?;
    }
    dict.set_item("assignments", assignments)?;

    let relaxed: Vec<(&str, &str)> = plan
        .relaxations()
        .iter()
        .map(|r| (r.participant.as_str(), r.excluded.as_str()))
        .collect();
    dict.set_item("relaxed", PyList::new(py, relaxed)?)?;

    dict.set_item("attempts", plan.attempts())?;

    Ok(dict.into())
}

/// Map planner errors onto Python exceptions
pub fn plan_error_to_py(err: PlanError) -> PyErr {
    match err {
        PlanError::InvalidConfig(_) | PlanError::InvalidRoster(_) => {
            PyErr::new::<PyValueError, _>(err.to_string())
        }
        PlanError::AssignmentsNotPossible { .. } | PlanError::SearchBudgetExceeded { .. } => {
            PyErr::new::<PyRuntimeError, _>(err.to_string())
        }
    }
}
