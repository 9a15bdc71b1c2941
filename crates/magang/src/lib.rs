//! Application intake and review workflow for the agency's internship
//! program, plus the ambient configuration, telemetry, and error plumbing
//! shared by the HTTP service.

pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;
