use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::number::CanonicalNumber;
use crate::task::{Strategy, Task};

/// Outcome of grading one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    pub extracted_answer: Option<String>,
    pub is_correct: bool,
    pub task: Task,
}

impl GradingResult {
    pub fn unparseable(task: Task) -> Self {
        Self {
            extracted_answer: None,
            is_correct: false,
            task,
        }
    }
}

/// One leg of a travel plan: `(from, to, mode)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub from: String,
    pub to: String,
    pub mode: String,
}

impl Leg {
    pub fn new(from: &str, to: &str, mode: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            mode: mode.to_string(),
        }
    }

    /// Key used by the cost table.
    pub fn cost_key(&self) -> String {
        format!("{}{}{}", self.from, self.to, self.mode)
    }
}

/// Constraints a travel plan must satisfy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TravelConstraints {
    pub city_start: String,
    pub city_end: String,
    pub total_budget: f64,
    /// Minimum number of distinct cities visited, endpoints included.
    pub steps: usize,
    /// `graph[from][to]` lists the modes available on that connection.
    pub graph: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    pub costs: BTreeMap<String, f64>,
}

/// A reference answer, already shaped for its task's strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// Expected counts in the dataset's item order.
    Counts(Vec<u64>),
    Integer(i64),
    Number(CanonicalNumber),
    Choice(char),
    /// Acceptable phrasings; the first is the canonical one.
    Text(Vec<String>),
    Travel(TravelConstraints),
}

impl Reference {
    /// Shape a raw dataset answer for `task`. Fails on answers that cannot
    /// belong to that task, which indicates a corrupted dataset.
    pub fn for_task(task: Task, raw: &serde_json::Value) -> Result<Self, String> {
        use serde_json::Value;

        match task.strategy() {
            Strategy::Count => match raw {
                Value::Object(map) => map
                    .iter()
                    .map(|(item, count)| {
                        count
                            .as_u64()
                            .ok_or_else(|| format!("count for '{item}' is not a non-negative integer"))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .and_then(|counts| {
                        if counts.is_empty() {
                            Err("count answer has no entries".to_string())
                        } else {
                            Ok(Reference::Counts(counts))
                        }
                    }),
                Value::Number(n) => n
                    .as_u64()
                    .map(|c| Reference::Counts(vec![c]))
                    .ok_or_else(|| format!("count answer {n} is not a non-negative integer")),
                other => Err(format!("count answer must be a mapping, got {other}")),
            },
            Strategy::Mathgap => CanonicalNumber::from_json(raw)
                .and_then(|n| n.as_integer())
                .map(Reference::Integer)
                .ok_or_else(|| format!("mathgap answer must be an integer, got {raw}")),
            Strategy::Arithmetic => CanonicalNumber::from_json(raw)
                .map(Reference::Number)
                .ok_or_else(|| format!("arithmetic answer must be a number, got {raw}")),
            Strategy::Logic => match raw.as_str().map(str::trim) {
                Some(s) if s.len() == 1 && matches!(s.as_bytes()[0], b'A'..=b'D' | b'a'..=b'd') => {
                    Ok(Reference::Choice(s.as_bytes()[0].to_ascii_uppercase() as char))
                }
                _ => Err(format!("logic answer must be one of A-D, got {raw}")),
            },
            Strategy::Unpuzzle => match raw {
                Value::String(s) => Ok(Reference::Text(vec![s.clone()])),
                Value::Number(n) => Ok(Reference::Text(vec![n.to_string()])),
                Value::Array(items) if !items.is_empty() => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s.clone()),
                        Value::Number(n) => Ok(n.to_string()),
                        other => Err(format!("unpuzzle answer entries must be strings, got {other}")),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Reference::Text),
                other => Err(format!("unpuzzle answer must be a string or list, got {other}")),
            },
            Strategy::Travel => serde_json::from_value::<TravelConstraints>(raw.clone())
                .map(Reference::Travel)
                .map_err(|e| format!("travel answer is malformed: {e}")),
        }
    }

    /// Number of items a count reference expects.
    pub fn count_len(&self) -> Option<usize> {
        match self {
            Reference::Counts(c) => Some(c.len()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_count_reference_keeps_item_order() {
        let raw: serde_json::Value =
            serde_json::from_str(r#"{"zebra": 3, "apple": 1, "mango": 2}"#).unwrap();
        let reference = Reference::for_task(Task::WordCount, &raw).unwrap();
        assert_eq!(reference, Reference::Counts(vec![3, 1, 2]));
        assert_eq!(reference.count_len(), Some(3));
    }

    #[test]
    fn test_count_reference_rejects_negative() {
        let err = Reference::for_task(Task::CharacterCount, &json!({"a": -1})).unwrap_err();
        assert!(err.contains("'a'"), "{err}");
    }

    #[test]
    fn test_mathgap_reference_accepts_numeric_string() {
        assert_eq!(
            Reference::for_task(Task::MathgapDiverse, &json!("1,024")).unwrap(),
            Reference::Integer(1024)
        );
        assert!(Reference::for_task(Task::MathgapDiverse, &json!("1.5")).is_err());
    }

    #[test]
    fn test_logic_reference_normalizes_case() {
        assert_eq!(
            Reference::for_task(Task::LogicEvaluation, &json!("c")).unwrap(),
            Reference::Choice('C')
        );
        assert!(Reference::for_task(Task::LogicEvaluation, &json!("E")).is_err());
        assert!(Reference::for_task(Task::LogicEvaluation, &json!("AB")).is_err());
    }

    #[test]
    fn test_unpuzzle_reference_equivalence_set() {
        assert_eq!(
            Reference::for_task(Task::Unpuzzle, &json!(["Tuesday", "tues"])).unwrap(),
            Reference::Text(vec!["Tuesday".into(), "tues".into()])
        );
        assert!(Reference::for_task(Task::Unpuzzle, &json!([])).is_err());
    }

    #[test]
    fn test_travel_reference_requires_fields() {
        let err = Reference::for_task(Task::Travel, &json!({"city_start": "Austin"})).unwrap_err();
        assert!(err.contains("travel answer is malformed"), "{err}");
    }

    #[test]
    fn test_leg_cost_key() {
        assert_eq!(Leg::new("Fresno", "Irvine", "car").cost_key(), "FresnoIrvinecar");
    }

    #[test]
    fn test_grading_result_serialization() {
        let result = GradingResult::unparseable(Task::Arithmetic);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"extracted_answer\":null"));
        assert!(json.contains("\"is_correct\":false"));
        assert!(json.contains("\"task\":\"arithmetic\""));
    }
}
