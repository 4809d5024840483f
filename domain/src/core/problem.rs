//! Problem value objects

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A problem the agents negotiate an answer to (Value Object)
///
/// The statement is sent verbatim to every agent's reasoner at solve time and
/// included as context in every debate step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Problem {
    statement: String,
}

impl Problem {
    /// Create a problem, rejecting empty or whitespace-only statements
    pub fn new(statement: impl Into<String>) -> Result<Self, DomainError> {
        let statement = statement.into();
        if statement.trim().is_empty() {
            return Err(DomainError::EmptyProblem);
        }
        Ok(Self { statement })
    }

    /// Get the problem statement
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// Consume and return the inner statement
    pub fn into_statement(self) -> String {
        self.statement
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.statement)
    }
}

/// A problem paired with its reference answer
///
/// Records come from a dataset (1-based `index`) or from a single
/// problem given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// 1-based position in the problem set
    pub index: usize,
    pub problem: Problem,
    /// Reference answer used for correctness assessment
    pub reference: String,
}

impl ProblemRecord {
    pub fn new(index: usize, problem: Problem, reference: impl Into<String>) -> Self {
        Self {
            index,
            problem,
            reference: reference.into(),
        }
    }
}
