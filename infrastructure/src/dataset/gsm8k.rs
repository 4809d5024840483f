//! GSM8K JSONL reader.

use agora_domain::{Problem, ProblemRecord};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Marker preceding the final numeric answer in GSM8K solutions
const FINAL_ANSWER_MARKER: &str = "####";

/// Errors that can occur while reading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: invalid JSON: {message}")]
    Parse { line: usize, message: String },

    #[error("Line {line}: missing or empty field '{field}'")]
    MissingField { line: usize, field: &'static str },
}

#[derive(Deserialize)]
struct RawRecord {
    question: Option<String>,
    answer: Option<String>,
}

/// Extract the reference answer from a GSM8K solution.
///
/// Returns the trimmed text after the last `####`, or the whole solution
/// trimmed when no marker is present.
pub fn reference_answer(solution: &str) -> &str {
    match solution.rfind(FINAL_ANSWER_MARKER) {
        Some(pos) => solution[pos + FINAL_ANSWER_MARKER.len()..].trim(),
        None => solution.trim(),
    }
}

/// Load at most `limit` problems from a JSONL file.
pub fn load_gsm8k(
    path: impl AsRef<Path>,
    limit: Option<usize>,
) -> Result<Vec<ProblemRecord>, DatasetError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_gsm8k(BufReader::new(file), limit).map_err(|e| match e {
        DatasetError::Io { source, .. } => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!("Loaded {} problems from {}", records.len(), path.display());
    Ok(records)
}

/// Parse JSONL records from any reader. Blank lines are skipped; record
/// indices are 1-based and count only non-blank lines.
pub fn parse_gsm8k(
    reader: impl BufRead,
    limit: Option<usize>,
) -> Result<Vec<ProblemRecord>, DatasetError> {
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        if limit.is_some_and(|max| records.len() >= max) {
            break;
        }
        let line_no = i + 1;
        let line = line.map_err(|source| DatasetError::Io {
            path: PathBuf::new(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let raw: RawRecord = serde_json::from_str(&line).map_err(|e| DatasetError::Parse {
            line: line_no,
            message: e.to_string(),
        })?;
        let question = raw
            .question
            .filter(|q| !q.trim().is_empty())
            .ok_or(DatasetError::MissingField {
                line: line_no,
                field: "question",
            })?;
        let answer = raw
            .answer
            .filter(|a| !a.trim().is_empty())
            .ok_or(DatasetError::MissingField {
                line: line_no,
                field: "answer",
            })?;

        let problem = Problem::new(question).map_err(|_| DatasetError::MissingField {
            line: line_no,
            field: "question",
        })?;
        let reference = reference_answer(&answer).to_string();
        debug!("Problem {}: reference '{}'", records.len() + 1, reference);
        records.push(ProblemRecord::new(records.len() + 1, problem, reference));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const SAMPLE: &str = r#"{"question": "Natalia sold clips to 48 of her friends in April, and then she sold half as many clips in May. How many clips did Natalia sell altogether in April and May?", "answer": "Natalia sold 48/2 = <<48/2=24>>24 clips in May.\nNatalia sold 48+24 = <<48+24=72>>72 clips altogether in April and May.\n#### 72"}

{"question": "Weng earns $12 an hour for babysitting. Yesterday, she just did 50 minutes of babysitting. How much did she earn?", "answer": "Weng earns 12/60 = $<<12/60=0.2>>0.2 per minute.\nWorking 50 minutes, she earned 0.2 x 50 = $<<0.2*50=10>>10.\n#### 10"}
{"question": "What is 2 + 2?", "answer": "4"}
"#;

    #[test]
    fn test_reference_answer_after_marker() {
        assert_eq!(reference_answer("work\n#### 72"), "72");
        assert_eq!(reference_answer("  18  "), "18");
        assert_eq!(reference_answer("a #### 1 #### 2"), "2");
    }

    #[test]
    fn test_parse_skips_blank_lines_and_numbers_records() {
        let records = parse_gsm8k(Cursor::new(SAMPLE), None).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].index, 1);
        assert_eq!(records[0].reference, "72");
        assert_eq!(records[1].index, 2);
        assert_eq!(records[1].reference, "10");
        assert_eq!(records[2].reference, "4");
        assert!(records[1].problem.statement().starts_with("Weng earns"));
    }

    #[test]
    fn test_parse_respects_limit() {
        let records = parse_gsm8k(Cursor::new(SAMPLE), Some(2)).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_reports_line_of_bad_json() {
        let input = "{\"question\": \"q\", \"answer\": \"1\"}\nnot json\n";
        match parse_gsm8k(Cursor::new(input), None) {
            Err(DatasetError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_reports_missing_field() {
        let input = "{\"question\": \"What is 1 + 1?\"}\n";
        match parse_gsm8k(Cursor::new(input), None) {
            Err(DatasetError::MissingField { line, field }) => {
                assert_eq!(line, 1);
                assert_eq!(field, "answer");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let records = load_gsm8k(file.path(), Some(1)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reference, "72");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_gsm8k("/definitely/not/here.jsonl", None).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
