//! Per-pair conversation record.

use crate::agent::value_objects::AgentId;
use serde::{Deserialize, Serialize};

/// Kind of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Opening argument of a round, from the initiating agent
    Message,
    /// Response from the other participant
    Reply,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Message => "message",
            EntryKind::Reply => "reply",
        }
    }
}

/// One exchange in a debate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: AgentId,
    pub kind: EntryKind,
    pub content: String,
}

/// Shared conversation between the two participants of a single debate.
///
/// Used as reasoner context for that pair only; it is dropped when the
/// debate ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: AgentId, kind: EntryKind, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            speaker,
            kind,
            content: content.into(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the transcript as prompt context.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "(no prior discussion)".to_string();
        }
        self.entries
            .iter()
            .map(|e| format!("Agent {} ({}): {}", e.speaker, e.kind.as_str(), e.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_render() {
        let t = Transcript::new();
        assert!(t.is_empty());
        assert_eq!(t.render(), "(no prior discussion)");
    }

    #[test]
    fn test_render_in_order() {
        let mut t = Transcript::new();
        t.push(AgentId::new(1), EntryKind::Message, "I think 42");
        t.push(AgentId::new(2), EntryKind::Reply, "I think 41");

        assert_eq!(t.len(), 2);
        assert_eq!(
            t.render(),
            "Agent 1 (message): I think 42\n\nAgent 2 (reply): I think 41"
        );
    }
}
