mod common;

use answergrade::dataset;
use answergrade::extract::ExtractContext;
use answergrade::grader::{self, Consistency};
use answergrade::task::Task;
use assert_fs::prelude::*;
use common::fixture_path;

#[test]
fn test_load_simple_reasoning_fixture() {
    let set = dataset::load_simple_reasoning(&fixture_path("simple_reasoning.json")).unwrap();
    assert_eq!(set.len(), 8);
    let tasks: Vec<Task> = set.questions().iter().map(|q| q.task).collect();
    assert!(tasks.contains(&Task::Travel));
    assert_eq!(set.get("wc-0").unwrap().count_items, Some(3));
}

#[test]
fn test_grade_fixture_question() {
    let set = dataset::load_simple_reasoning(&fixture_path("simple_reasoning.json")).unwrap();
    let q = set.get("ar-0").unwrap();
    let result = grader::grade_question(q, "The result is 1000.", &ExtractContext::default());
    assert!(result.is_correct);
    assert_eq!(result.extracted_answer.as_deref(), Some("1000"));
}

#[test]
fn test_load_unpuzzles_fixture() {
    let pairs = dataset::load_unpuzzles(&fixture_path("unpuzzles.json")).unwrap();
    assert_eq!(pairs.len(), 2);
    assert!(pairs[1].unpuzzled_version.contains("two pounds"));
}

#[test]
fn test_load_shifted_fixture() {
    let sets = dataset::load_shifted_unpuzzles(&fixture_path("shifted_unpuzzles.json")).unwrap();
    assert_eq!(sets.len(), 3);
    assert!(sets[0].reference.is_some());
    assert!(sets[2].reference.is_none());
}

#[test]
fn test_shifted_pair_detects_context_sensitivity() {
    let sets = dataset::load_shifted_unpuzzles(&fixture_path("shifted_unpuzzles.json")).unwrap();
    let reference = sets[1].reference.as_ref().unwrap();
    let graded = grader::grade_shifted(
        "The answer is \\boxed{9}.",
        "They all remain, so the answer is: 17.",
        reference,
        &ExtractContext::default(),
    );
    assert_eq!(graded.original.extracted_answer.as_deref(), Some("9"));
    assert_eq!(graded.shifted.extracted_answer.as_deref(), Some("17"));
    assert_eq!(graded.consistency, Consistency::OriginalOnly);
}

#[test]
fn test_missing_dataset_file() {
    let err = dataset::load_simple_reasoning(&fixture_path("nope.json")).unwrap_err();
    assert!(err.contains("Failed to read dataset"), "{err}");
}

#[test]
fn test_unpuzzle_missing_field_fails_fast() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("unpuzzles.json");
    file.write_str(r#"[{"original_puzzle": "p"}]"#).unwrap();
    let err = dataset::load_unpuzzles(file.path()).unwrap_err();
    assert!(err.contains("record 0"), "{err}");
    assert!(err.contains("unpuzzled_version"), "{err}");
}

#[test]
fn test_shifted_bad_answer_fails_fast() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("shifted.json");
    file.write_str(
        r#"[{"original_puzzle": "p", "unpuzzle": "u", "shifted_unpuzzle": "s", "answer": {"x": 1}}]"#,
    )
    .unwrap();
    let err = dataset::load_shifted_unpuzzles(file.path()).unwrap_err();
    assert!(err.contains("record 0"), "{err}");
}

#[test]
fn test_dataset_length_is_not_fixed() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("simple_reasoning.json");
    let records: Vec<serde_json::Value> = (0..1240)
        .map(|i| {
            serde_json::json!({
                "question": format!("What is {i} + 0?"),
                "answer": i,
                "task": "arithmetic",
                "custom_id": format!("ar-{i}"),
                "hyperparameters": {}
            })
        })
        .collect();
    file.write_str(&serde_json::to_string(&records).unwrap()).unwrap();
    let set = dataset::load_simple_reasoning(file.path()).unwrap();
    assert_eq!(set.len(), 1240);
}
