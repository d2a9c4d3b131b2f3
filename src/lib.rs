//! Care Shift Scheduling and Payroll Computation Engine
//!
//! This crate generates concrete care shifts from recurring coverage
//! templates, tracks the shift and work-log lifecycles, and computes
//! differential payroll (regular, weekend and holiday rates) with
//! reimbursable expenses when a work log is approved.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod scheduling;
pub mod store;
