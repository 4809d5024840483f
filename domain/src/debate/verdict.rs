//! Structured update verdict.
//!
//! After each exchange a reasoner decides whether an agent's answer should
//! change. The decision must follow this JSON contract:
//!
//! ```json
//! {
//!   "changed": true,
//!   "new_answer": "18",
//!   "confidence": 85,
//!   "reasoning": "The other agent caught a carry error"
//! }
//! ```
//!
//! `new_answer` may be omitted when `changed` is `false`. `confidence` must be
//! an integer in `0..=100`. Anything else is a [`VerdictParseError`], which
//! the debate protocol treats as "no change".

use super::parsing::extract_json_object;
use crate::agent::value_objects::Confidence;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a response does not honour the verdict contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerdictParseError {
    #[error("response contains no JSON object")]
    NoJson,

    #[error("invalid verdict JSON: {0}")]
    InvalidJson(String),

    #[error("confidence {0} is outside 0..=100")]
    ConfidenceOutOfRange(u64),

    #[error("verdict reports a change but new_answer is empty")]
    MissingAnswer,
}

/// Outcome of an update evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVerdict {
    /// Whether the answer changes to a value not equivalent to the old one
    pub changed: bool,
    /// The replacement answer (empty when unchanged)
    pub new_answer: String,
    pub confidence: Confidence,
    pub reasoning: String,
}

impl UpdateVerdict {
    /// A verdict that keeps the current answer.
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            new_answer: String::new(),
            confidence: Confidence::default(),
            reasoning: String::new(),
        }
    }

    /// A verdict that replaces the current answer.
    pub fn changed(
        new_answer: impl Into<String>,
        confidence: Confidence,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            changed: true,
            new_answer: new_answer.into(),
            confidence,
            reasoning: reasoning.into(),
        }
    }

    /// The answer to adopt, if this verdict actually changes anything.
    pub fn proposed_answer(&self) -> Option<&str> {
        (self.changed && !self.new_answer.trim().is_empty()).then_some(self.new_answer.as_str())
    }
}

#[derive(Deserialize)]
struct RawVerdict {
    changed: bool,
    #[serde(default, alias = "newAnswer")]
    new_answer: Option<String>,
    confidence: u64,
    #[serde(default)]
    reasoning: String,
}

/// Parse a reasoner response into an [`UpdateVerdict`].
///
/// # Examples
///
/// ```
/// use agora_domain::debate::verdict::parse_update_verdict;
///
/// let verdict = parse_update_verdict(
///     r#"{"changed": true, "new_answer": "18", "confidence": 80, "reasoning": "recount"}"#,
/// ).unwrap();
/// assert_eq!(verdict.proposed_answer(), Some("18"));
///
/// assert!(parse_update_verdict("I will keep my answer").is_err());
/// ```
pub fn parse_update_verdict(response: &str) -> Result<UpdateVerdict, VerdictParseError> {
    let json = extract_json_object(response).ok_or(VerdictParseError::NoJson)?;
    let raw: RawVerdict =
        serde_json::from_str(json).map_err(|e| VerdictParseError::InvalidJson(e.to_string()))?;

    let confidence = u8::try_from(raw.confidence)
        .ok()
        .and_then(Confidence::new)
        .ok_or(VerdictParseError::ConfidenceOutOfRange(raw.confidence))?;

    let new_answer = raw.new_answer.unwrap_or_default();
    if raw.changed && new_answer.trim().is_empty() {
        return Err(VerdictParseError::MissingAnswer);
    }

    Ok(UpdateVerdict {
        changed: raw.changed,
        new_answer,
        confidence,
        reasoning: raw.reasoning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_changed_verdict() {
        let verdict = parse_update_verdict(
            r#"{"changed": true, "new_answer": "1/2", "confidence": 70, "reasoning": "convinced"}"#,
        )
        .unwrap();

        assert!(verdict.changed);
        assert_eq!(verdict.proposed_answer(), Some("1/2"));
        assert_eq!(verdict.confidence.value(), 70);
        assert_eq!(verdict.reasoning, "convinced");
    }

    #[test]
    fn test_parse_unchanged_without_answer() {
        let verdict = parse_update_verdict(r#"{"changed": false, "confidence": 95}"#).unwrap();
        assert!(!verdict.changed);
        assert_eq!(verdict.proposed_answer(), None);
    }

    #[test]
    fn test_parse_fenced_with_camel_case() {
        let response = r#"
My evaluation:
```json
{"changed": true, "newAnswer": "50%", "confidence": 60, "reasoning": "ok"}
```
"#;
        let verdict = parse_update_verdict(response).unwrap();
        assert_eq!(verdict.new_answer, "50%");
    }

    #[test]
    fn test_parse_rejects_missing_json() {
        assert_eq!(
            parse_update_verdict("I keep my answer."),
            Err(VerdictParseError::NoJson)
        );
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let result = parse_update_verdict(r#"{"changed": "yes", "confidence": 50}"#);
        assert!(matches!(result, Err(VerdictParseError::InvalidJson(_))));

        let result = parse_update_verdict(r#"{"changed": true, "new_answer": "2", "confidence": 50.5}"#);
        assert!(matches!(result, Err(VerdictParseError::InvalidJson(_))));

        let result = parse_update_verdict(r#"{"changed": false, "confidence": -3}"#);
        assert!(matches!(result, Err(VerdictParseError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_rejects_confidence_out_of_range() {
        assert_eq!(
            parse_update_verdict(r#"{"changed": false, "confidence": 150}"#),
            Err(VerdictParseError::ConfidenceOutOfRange(150))
        );
    }

    #[test]
    fn test_parse_rejects_change_without_answer() {
        assert_eq!(
            parse_update_verdict(r#"{"changed": true, "new_answer": " ", "confidence": 10}"#),
            Err(VerdictParseError::MissingAnswer)
        );
    }

    #[test]
    fn test_unchanged_has_no_proposal() {
        assert!(UpdateVerdict::unchanged().proposed_answer().is_none());
    }
}
