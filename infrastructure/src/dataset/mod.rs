//! Problem set loading.
//!
//! Provides [`load_gsm8k`], a reader for GSM8K-style JSONL files where each
//! line holds a `question` and an `answer` whose final value follows `####`.

mod gsm8k;

pub use gsm8k::{DatasetError, load_gsm8k, parse_gsm8k, reference_answer};
