//! Application layer for provcheck.
//!
//! Use cases in this layer orchestrate the domain types from `provcheck_core`
//! and depend on the [`SystemProbe`](validate::SystemProbe) trait rather than
//! on concrete command runners, so every phase can be tested with canned
//! answers.  The production probe lives in the infrastructure layer.
//!
//! # Sub-modules
//!
//! - **`validate`** – Runs the five validation phases in a fixed order and
//!   enforces the root precondition.
//!
//! - **`report`** – The per-phase and overall report produced by a run.

pub mod report;
pub mod validate;
