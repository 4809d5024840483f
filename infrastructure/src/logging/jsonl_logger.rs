//! JSONL debate transcript.
//!
//! Every [`ConversationEvent`] becomes one JSON line stamped with `type`,
//! `timestamp`, a run-wide `seq` and the `topology`/`index` of the problem it
//! belongs to (taken from the most recent `problem_start`). Lines are buffered
//! and flushed when a debate or a problem closes, so a crash loses at most the
//! exchanges of the debate in flight.

use agora_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Events after which buffered lines are written out.
const FLUSH_AFTER: [&str; 2] = ["debate_result", "problem_result"];

struct Transcript {
    writer: BufWriter<File>,
    seq: u64,
    topology: Option<Value>,
    index: Option<Value>,
}

impl Transcript {
    fn stamp(&mut self, event: ConversationEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        if event.event_type == "problem_start" {
            self.topology = map.get("topology").cloned();
            self.index = map.get("index").cloned();
        }

        self.seq += 1;
        map.insert("seq".to_string(), Value::from(self.seq));
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert(
            "timestamp".to_string(),
            Value::from(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        // The payload's own fields win over the carried context
        if let Some(topology) = &self.topology {
            map.entry("topology").or_insert_with(|| topology.clone());
        }
        if let Some(index) = &self.index {
            map.entry("index").or_insert_with(|| index.clone());
        }
        Value::Object(map)
    }
}

/// Conversation logger writing a debate transcript, one JSON object per line.
///
/// Shared between the concurrent solve tasks and the debate loop, so the
/// transcript sits behind a `Mutex`. Flushes on `Drop`.
pub struct JsonlConversationLogger {
    transcript: Mutex<Transcript>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Create the transcript file (and its parent directories).
    ///
    /// Returns `None` if the file cannot be created; the run then goes on
    /// without a transcript.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not create conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            transcript: Mutex::new(Transcript {
                writer: BufWriter::new(file),
                seq: 0,
                topology: None,
                index: None,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut transcript) = self.transcript.lock() else {
            return;
        };

        let boundary = FLUSH_AFTER.contains(&event.event_type);
        let record = transcript.stamp(event);
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Err(e) = writeln!(transcript.writer, "{}", line) {
            warn!("Conversation log write failed: {}", e);
            return;
        }
        if boundary && let Err(e) = transcript.writer.flush() {
            warn!("Conversation log flush failed: {}", e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut transcript) = self.transcript.lock() {
            let _ = transcript.writer.flush();
        }
    }
}
