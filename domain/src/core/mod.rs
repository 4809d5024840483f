//! Core domain concepts shared across all subdomains.
//!
//! - [`problem::Problem`] - a validated problem statement
//! - [`problem::ProblemRecord`] - a problem with its reference answer
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod problem;
