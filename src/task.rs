use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Task category tag carried by every dataset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    CharacterCount,
    WordCount,
    MathgapDiverse,
    MathgapIrrelevant,
    Travel,
    LogicNegation,
    LogicEvaluation,
    Arithmetic,
    Unpuzzle,
    ShiftedUnpuzzle,
}

/// The extraction/comparison pair a task is graded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Count,
    Mathgap,
    Travel,
    Logic,
    Arithmetic,
    Unpuzzle,
}

impl Task {
    pub const ALL: [Task; 10] = [
        Task::CharacterCount,
        Task::WordCount,
        Task::MathgapDiverse,
        Task::MathgapIrrelevant,
        Task::Travel,
        Task::LogicNegation,
        Task::LogicEvaluation,
        Task::Arithmetic,
        Task::Unpuzzle,
        Task::ShiftedUnpuzzle,
    ];

    pub fn strategy(self) -> Strategy {
        match self {
            Task::CharacterCount | Task::WordCount => Strategy::Count,
            Task::MathgapDiverse | Task::MathgapIrrelevant => Strategy::Mathgap,
            Task::Travel => Strategy::Travel,
            Task::LogicNegation | Task::LogicEvaluation => Strategy::Logic,
            Task::Arithmetic => Strategy::Arithmetic,
            Task::Unpuzzle | Task::ShiftedUnpuzzle => Strategy::Unpuzzle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Task::CharacterCount => "character_count",
            Task::WordCount => "word_count",
            Task::MathgapDiverse => "mathgap_diverse",
            Task::MathgapIrrelevant => "mathgap_irrelevant",
            Task::Travel => "travel",
            Task::LogicNegation => "logic_negation",
            Task::LogicEvaluation => "logic_evaluation",
            Task::Arithmetic => "arithmetic",
            Task::Unpuzzle => "unpuzzle",
            Task::ShiftedUnpuzzle => "shifted_unpuzzle",
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown task tag '{s}'"))
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Strategy::Count => "count",
            Strategy::Mathgap => "mathgap",
            Strategy::Travel => "travel",
            Strategy::Logic => "logic",
            Strategy::Arithmetic => "arithmetic",
            Strategy::Unpuzzle => "unpuzzle",
        })
    }
}
