//! Locating the final answer inside a free-form model response.
//!
//! Each strategy tries its own conventions in order and then falls back to
//! reading the whole response as its canonical rendering, so extracting from
//! a candidate's `Display` output yields the same candidate.

use std::fmt;

use crate::number::CanonicalNumber;
use crate::task::{Strategy, Task};
use crate::types::Leg;

mod count;
mod logic;
mod numeric;
mod travel;
mod unpuzzle;
mod utils;

pub use travel::insert_quotes_in_tuples;

/// Placeholder strings models echo back from the prompt template.
pub const DEFAULT_PLACEHOLDERS: [&str; 2] = ["answer", "your answer"];

/// An answer located in a response, typed by strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// One entry per counted item; `None` where the entry was unreadable.
    Counts(Vec<Option<u64>>),
    Integer(i64),
    Number(CanonicalNumber),
    Choice(char),
    Text(String),
    Plan(Vec<Leg>),
}

/// Per-call extraction settings.
#[derive(Debug, Clone)]
pub struct ExtractContext {
    /// Items a count response must report. Required for the count strategy.
    pub count_items: Option<usize>,
    /// Captures ignored by the unpuzzle strategy, compared case-insensitively.
    pub placeholders: Vec<String>,
}

impl Default for ExtractContext {
    fn default() -> Self {
        Self {
            count_items: None,
            placeholders: DEFAULT_PLACEHOLDERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExtractContext {
    pub fn with_count_items(mut self, k: usize) -> Self {
        self.count_items = Some(k);
        self
    }
}

/// Extract a candidate answer for `task` from `response`.
///
/// Never fails: a response with nothing recognizable yields `None`.
pub fn extract(task: Task, response: &str, ctx: &ExtractContext) -> Option<Candidate> {
    match task.strategy() {
        Strategy::Count => count::extract(response, ctx.count_items?),
        Strategy::Mathgap => numeric::extract_boxed_integer(response),
        Strategy::Arithmetic => numeric::extract_last_number(response),
        Strategy::Logic => logic::extract(response),
        Strategy::Travel => travel::extract(response),
        Strategy::Unpuzzle => unpuzzle::extract(response, &ctx.placeholders),
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Counts(counts) if counts.len() == 1 => write_count(f, counts[0]),
            Candidate::Counts(counts) => {
                f.write_str("[")?;
                for (i, c) in counts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_count(f, *c)?;
                }
                f.write_str("]")
            }
            Candidate::Integer(n) => write!(f, "{n}"),
            Candidate::Number(n) => write!(f, "{n}"),
            Candidate::Choice(c) => write!(f, "{c}"),
            Candidate::Text(s) => f.write_str(s),
            Candidate::Plan(legs) => {
                f.write_str("[")?;
                for (i, leg) in legs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "('{}', '{}', '{}')", leg.from, leg.to, leg.mode)?;
                }
                f.write_str("]")
            }
        }
    }
}

fn write_count(f: &mut fmt::Formatter<'_>, count: Option<u64>) -> fmt::Result {
    match count {
        Some(n) => write!(f, "{n}"),
        None => f.write_str("?"),
    }
}
