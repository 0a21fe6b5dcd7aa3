//! Company Safety Rating engine for rope access service companies.
//!
//! This crate computes a penalty-based compliance score (0-100) and colour
//! tier from a company's compliance facts: core documents, project
//! documentation, harness inspections, and employee acknowledgments. It
//! also projects the result for differently privileged viewers and keeps
//! per-company facts that are rescored on every change.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod telemetry;
pub mod visibility;
