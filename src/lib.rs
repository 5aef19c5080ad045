//! Leave Engine for multi-tenant organization payroll
//!
//! This crate computes what a paid leave day is worth for an employee, from
//! their historical work sessions and the organization's leave pay policy,
//! along with the hour summaries and time-entry checks that feed payroll.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
