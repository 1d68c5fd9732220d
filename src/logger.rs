use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use answergrade::task::Task;
use answergrade::GradingResult;

#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub ts: String,
    pub custom_id: Option<String>,
    pub task: Task,
    pub extracted_answer: Option<String>,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Append a log entry. Errors are printed to stderr but do not fail the process.
pub fn log_grade_to(entry: &LogEntry, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("answergrade: failed to create log directory: {e}");
            return;
        }
    }

    let json = match serde_json::to_string(entry) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("answergrade: failed to serialize log entry: {e}");
            return;
        }
    };

    let mut file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("answergrade: failed to open log file: {e}");
            return;
        }
    };

    if let Err(e) = writeln!(file, "{json}") {
        eprintln!("answergrade: failed to write log entry: {e}");
    }
}

/// Create a log entry from a grading result. `response` is truncated to
/// `max_response_bytes` on a char boundary.
pub fn make_entry(
    custom_id: Option<&str>,
    result: &GradingResult,
    response: Option<&str>,
    max_response_bytes: usize,
) -> LogEntry {
    LogEntry {
        ts: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        custom_id: custom_id.map(str::to_string),
        task: result.task,
        extracted_answer: result.extracted_answer.clone(),
        is_correct: result.is_correct,
        response: response.map(|r| truncate(r, max_response_bytes)),
    }
}

fn truncate(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
