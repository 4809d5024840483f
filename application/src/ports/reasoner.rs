//! Reasoner port
//!
//! Defines the capability the debate protocol delegates all semantic work to.
//! Implementations (adapters) live in the infrastructure layer; agent "kinds"
//! are different reasoner implementations, not different agent types.

use agora_domain::{AgentProfile, Problem, Transcript, UpdateVerdict, VerdictParseError};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during reasoner calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReasonerError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response")]
    EmptyResponse,

    /// The response did not follow the expected structure
    #[error("Malformed output: {0}")]
    MalformedOutput(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl ReasonerError {
    /// Check if this error is a structural parse failure rather than a
    /// transport failure
    pub fn is_malformed(&self) -> bool {
        matches!(self, ReasonerError::MalformedOutput(_))
    }
}

impl From<VerdictParseError> for ReasonerError {
    fn from(e: VerdictParseError) -> Self {
        ReasonerError::MalformedOutput(e.to_string())
    }
}

/// Text generation and judgment capability consumed by the debate protocol
///
/// Every call is a fallible, possibly slow request/response. The core applies
/// no retry policy. `speaker` identifies the agent on whose behalf the call is
/// made so implementations can route by capability rank.
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Produce an initial answer with no prior context
    async fn solve(&self, speaker: &AgentProfile, problem: &Problem)
    -> Result<String, ReasonerError>;

    /// Open a debate round
    async fn generate_message(
        &self,
        speaker: &AgentProfile,
        problem: &Problem,
        own_answer: &str,
        other_answer: &str,
        history: &Transcript,
    ) -> Result<String, ReasonerError>;

    /// Respond to the other participant's message
    async fn generate_reply(
        &self,
        speaker: &AgentProfile,
        problem: &Problem,
        own_answer: &str,
        other_answer: &str,
        incoming: &str,
        history: &Transcript,
    ) -> Result<String, ReasonerError>;

    /// Decide whether the speaker's answer changes after the exchange.
    ///
    /// Output that violates the verdict contract must be reported as
    /// [`ReasonerError::MalformedOutput`]; the protocol treats it as no change.
    async fn evaluate_update(
        &self,
        speaker: &AgentProfile,
        problem: &Problem,
        current_answer: &str,
        history: &Transcript,
    ) -> Result<UpdateVerdict, ReasonerError>;

    /// Whether two answers denote the same value
    async fn compare_equivalence(
        &self,
        answer_a: &str,
        answer_b: &str,
    ) -> Result<bool, ReasonerError>;

    /// Whether an agent's answer matches the reference answer
    async fn assess_correctness(
        &self,
        agent_answer: &str,
        reference_answer: &str,
    ) -> Result<bool, ReasonerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_parse_error_maps_to_malformed() {
        let error: ReasonerError = VerdictParseError::NoJson.into();
        assert!(error.is_malformed());
        assert_eq!(
            error.to_string(),
            "Malformed output: response contains no JSON object"
        );
    }

    #[test]
    fn test_transport_errors_are_not_malformed() {
        assert!(!ReasonerError::Timeout.is_malformed());
        assert!(!ReasonerError::RequestFailed("503".to_string()).is_malformed());
    }
}
