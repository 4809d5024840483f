//! Debate domain
//!
//! Data types shared by the pairwise debate protocol:
//!
//! - [`transcript::Transcript`] - conversation record for one pair
//! - [`verdict::UpdateVerdict`] - strict structured result of an update evaluation
//! - [`outcome::DebateResult`] - how a debate ended
//! - [`parsing`] - text parsing for reasoner judgments

pub mod outcome;
pub mod parsing;
pub mod transcript;
pub mod verdict;

pub use outcome::{DebateEnd, DebateResult, TieBreak};
pub use parsing::{extract_json_object, parse_yes_no};
pub use transcript::{EntryKind, Transcript, TranscriptEntry};
pub use verdict::{UpdateVerdict, VerdictParseError, parse_update_verdict};
