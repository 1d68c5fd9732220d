//! Grading entry points.

use serde::Serialize;

use crate::dataset::Question;
use crate::extract::{self, ExtractContext};
use crate::score;
use crate::task::Task;
use crate::types::{GradingResult, Reference};

/// Grade `response` against `reference` using the rules for `task`.
///
/// Total over its inputs: unreadable responses and mismatched references
/// grade as incorrect, never as errors.
pub fn grade(response: &str, reference: &Reference, task: Task) -> GradingResult {
    grade_with(response, reference, task, &ExtractContext::default())
}

/// Like [`grade`], with explicit extraction settings. A missing count item
/// total is taken from the reference.
pub fn grade_with(
    response: &str,
    reference: &Reference,
    task: Task,
    ctx: &ExtractContext,
) -> GradingResult {
    let ctx = match (ctx.count_items, reference.count_len()) {
        (None, Some(k)) => ctx.clone().with_count_items(k),
        _ => ctx.clone(),
    };
    match extract::extract(task, response, &ctx) {
        Some(candidate) => GradingResult {
            extracted_answer: Some(candidate.to_string()),
            is_correct: score::score(&candidate, reference),
            task,
        },
        None => GradingResult::unparseable(task),
    }
}

/// Grade a response to a dataset question.
pub fn grade_question(question: &Question, response: &str, ctx: &ExtractContext) -> GradingResult {
    let ctx = match question.count_items {
        Some(k) => ctx.clone().with_count_items(k),
        None => ctx.clone(),
    };
    grade_with(response, &question.reference, question.task, &ctx)
}

/// How a model fared on the same puzzle in its original and shifted contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Consistency {
    ConsistentCorrect,
    OriginalOnly,
    ShiftedOnly,
    ConsistentIncorrect,
}

impl Consistency {
    pub fn from_verdicts(original_correct: bool, shifted_correct: bool) -> Self {
        match (original_correct, shifted_correct) {
            (true, true) => Consistency::ConsistentCorrect,
            (true, false) => Consistency::OriginalOnly,
            (false, true) => Consistency::ShiftedOnly,
            (false, false) => Consistency::ConsistentIncorrect,
        }
    }

    /// Whether correctness changed with the surface context.
    pub fn is_context_sensitive(self) -> bool {
        matches!(self, Consistency::OriginalOnly | Consistency::ShiftedOnly)
    }
}

impl std::fmt::Display for Consistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Consistency::ConsistentCorrect => "consistent_correct",
            Consistency::OriginalOnly => "original_only",
            Consistency::ShiftedOnly => "shifted_only",
            Consistency::ConsistentIncorrect => "consistent_incorrect",
        })
    }
}

/// Both gradings of a shifted-unpuzzle pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftedGrade {
    pub original: GradingResult,
    pub shifted: GradingResult,
    pub consistency: Consistency,
}

/// Grade the original-context and shifted-context responses independently
/// against one shared reference.
pub fn grade_shifted(
    original_response: &str,
    shifted_response: &str,
    reference: &Reference,
    ctx: &ExtractContext,
) -> ShiftedGrade {
    let original = grade_with(original_response, reference, Task::Unpuzzle, ctx);
    let shifted = grade_with(shifted_response, reference, Task::ShiftedUnpuzzle, ctx);
    let consistency = Consistency::from_verdicts(original.is_correct, shifted.is_correct);
    ShiftedGrade {
        original,
        shifted,
        consistency,
    }
}
