//! Dataset configuration from TOML (`[dataset]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// GSM8K-style JSONL problem set
///
/// # Example
///
/// ```toml
/// [dataset]
/// path = "data/gsm8k_test.jsonl"
/// limit = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatasetConfig {
    pub path: Option<PathBuf>,
    /// Load at most this many problems
    pub limit: Option<usize>,
}
