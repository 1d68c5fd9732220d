//! Answer extraction and grading for the simple-reasoning, unpuzzle, and
//! context-shifted unpuzzle evaluation sets.
//!
//! The entry point is [`grade`]: a pure function of a response, a reference
//! answer and a [`task::Task`], returning a [`GradingResult`].

pub mod config;
pub mod dataset;
pub mod extract;
pub mod grader;
pub mod number;
pub mod score;
pub mod task;
pub mod types;

pub use grader::{grade, grade_question, grade_shifted, grade_with};
pub use types::{GradingResult, Reference};
