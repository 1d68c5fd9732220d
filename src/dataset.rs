//! Loading the evaluation datasets.
//!
//! Records are validated as they are loaded: a missing field, an unknown task
//! tag, an answer that does not fit its task, or a duplicate `custom_id` fails
//! the whole load.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::task::Task;
use crate::types::Reference;

/// A simple-reasoning question with its answer shaped for grading.
#[derive(Debug, Clone)]
pub struct Question {
    pub question: String,
    pub task: Task,
    pub custom_id: String,
    pub hyperparameters: serde_json::Map<String, serde_json::Value>,
    pub reference: Reference,
    /// Items a count response must report, when the record states it.
    pub count_items: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    answer: serde_json::Value,
    task: Task,
    custom_id: String,
    #[serde(default)]
    hyperparameters: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    k: Option<usize>,
}

/// An original puzzle and its unpuzzled rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnpuzzlePair {
    pub original_puzzle: String,
    pub unpuzzled_version: String,
}

/// An unpuzzle, the same puzzle in a different surface context, and the
/// shared answer both are graded against.
#[derive(Debug, Clone)]
pub struct ShiftedUnpuzzle {
    pub original_puzzle: String,
    pub unpuzzle: String,
    pub shifted_unpuzzle: String,
    pub reference: Option<Reference>,
}

#[derive(Debug, Deserialize)]
struct RawShiftedUnpuzzle {
    original_puzzle: String,
    unpuzzle: String,
    shifted_unpuzzle: String,
    #[serde(default)]
    answer: Option<serde_json::Value>,
}

/// The simple-reasoning dataset, indexed by `custom_id`.
#[derive(Debug, Clone, Default)]
pub struct QuestionSet {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
}

impl QuestionSet {
    pub fn get(&self, custom_id: &str) -> Option<&Question> {
        self.by_id.get(custom_id).map(|&i| &self.questions[i])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Record count per task tag, in first-seen order.
    pub fn task_counts(&self) -> Vec<(Task, usize)> {
        let mut counts: Vec<(Task, usize)> = Vec::new();
        for q in &self.questions {
            match counts.iter_mut().find(|(t, _)| *t == q.task) {
                Some((_, n)) => *n += 1,
                None => counts.push((q.task, 1)),
            }
        }
        counts
    }
}

fn read_records(path: &Path) -> Result<Vec<serde_json::Value>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read dataset {}: {e}", path.display()))?;
    parse_records(&content, &path.display().to_string())
}

fn parse_records(content: &str, source: &str) -> Result<Vec<serde_json::Value>, String> {
    serde_json::from_str(content)
        .map_err(|e| format!("Failed to parse dataset {source}: expected a JSON array of records: {e}"))
}

/// Load `simple_reasoning.json`.
pub fn load_simple_reasoning(path: &Path) -> Result<QuestionSet, String> {
    let records = read_records(path)?;
    build_question_set(records, &path.display().to_string())
}

/// Parse simple-reasoning records from an in-memory JSON string.
pub fn parse_simple_reasoning(content: &str) -> Result<QuestionSet, String> {
    build_question_set(parse_records(content, "<input>")?, "<input>")
}

fn build_question_set(records: Vec<serde_json::Value>, source: &str) -> Result<QuestionSet, String> {
    let mut set = QuestionSet::default();
    for (index, value) in records.into_iter().enumerate() {
        let raw: RawQuestion = serde_json::from_value(value)
            .map_err(|e| format!("{source}: record {index}: {e}"))?;
        let question = build_question(raw)
            .map_err(|e| format!("{source}: record {index}: {e}"))?;
        if set.by_id.contains_key(&question.custom_id) {
            return Err(format!(
                "{source}: record {index}: duplicate custom_id '{}'",
                question.custom_id
            ));
        }
        set.by_id.insert(question.custom_id.clone(), set.questions.len());
        set.questions.push(question);
    }
    Ok(set)
}

fn build_question(raw: RawQuestion) -> Result<Question, String> {
    let reference = Reference::for_task(raw.task, &raw.answer)
        .map_err(|e| format!("custom_id '{}': {e}", raw.custom_id))?;

    let from_hyperparameters = raw
        .hyperparameters
        .get("k")
        .and_then(|v| v.as_u64())
        .map(|k| k as usize);
    let count_items = match reference.count_len() {
        Some(expected) => {
            let k = raw.k.or(from_hyperparameters).unwrap_or(expected);
            if k != expected {
                return Err(format!(
                    "custom_id '{}': k = {k} but the answer lists {expected} counts",
                    raw.custom_id
                ));
            }
            Some(k)
        }
        None => None,
    };

    Ok(Question {
        question: raw.question,
        task: raw.task,
        custom_id: raw.custom_id,
        hyperparameters: raw.hyperparameters,
        reference,
        count_items,
    })
}

/// Load `unpuzzles.json`.
pub fn load_unpuzzles(path: &Path) -> Result<Vec<UnpuzzlePair>, String> {
    let source = path.display().to_string();
    read_records(path)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| format!("{source}: record {index}: {e}"))
        })
        .collect()
}

/// Load `shifted_unpuzzles.json`.
pub fn load_shifted_unpuzzles(path: &Path) -> Result<Vec<ShiftedUnpuzzle>, String> {
    let source = path.display().to_string();
    read_records(path)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let raw: RawShiftedUnpuzzle = serde_json::from_value(value)
                .map_err(|e| format!("{source}: record {index}: {e}"))?;
            let reference = raw
                .answer
                .as_ref()
                .map(|a| Reference::for_task(Task::ShiftedUnpuzzle, a))
                .transpose()
                .map_err(|e| format!("{source}: record {index}: {e}"))?;
            Ok(ShiftedUnpuzzle {
                original_puzzle: raw.original_puzzle,
                unpuzzle: raw.unpuzzle,
                shifted_unpuzzle: raw.shifted_unpuzzle,
                reference,
            })
        })
        .collect()
}
