//! Python bindings (enabled with the `pyo3` feature)

pub mod planner;
pub mod types;
