//! Deciding whether an extracted candidate matches a reference answer.

use std::collections::HashSet;

use crate::extract::Candidate;
use crate::number::CanonicalNumber;
use crate::types::{Leg, Reference, TravelConstraints};

/// Compare a candidate with a reference. Mismatched shapes never match.
pub fn score(candidate: &Candidate, reference: &Reference) -> bool {
    match (candidate, reference) {
        (Candidate::Counts(got), Reference::Counts(want)) => score_counts(got, want),
        (Candidate::Integer(got), Reference::Integer(want)) => got == want,
        (Candidate::Number(got), Reference::Number(want)) => got == want,
        (Candidate::Choice(got), Reference::Choice(want)) => got.eq_ignore_ascii_case(want),
        (Candidate::Text(got), Reference::Text(accepted)) => score_text(got, accepted),
        (Candidate::Plan(legs), Reference::Travel(constraints)) => score_travel(legs, constraints),
        _ => false,
    }
}

fn score_counts(got: &[Option<u64>], want: &[u64]) -> bool {
    got.len() == want.len()
        && got
            .iter()
            .zip(want)
            .all(|(g, w)| g.is_some_and(|g| g == *w))
}

/// True if `got` matches any accepted phrasing after normalization, or both
/// denote the same number.
pub fn score_text(got: &str, accepted: &[String]) -> bool {
    let got_norm = normalize_text(got);
    if got_norm.is_empty() {
        return false;
    }
    let got_num = CanonicalNumber::parse(&got_norm);
    accepted.iter().any(|a| {
        let a_norm = normalize_text(a);
        a_norm == got_norm
            || (got_num.is_some() && got_num == CanonicalNumber::parse(&a_norm))
    })
}

/// Case-fold, collapse whitespace, and strip surrounding punctuation and
/// markdown emphasis.
pub fn normalize_text(s: &str) -> String {
    const EDGE: &[char] = &['.', ',', ';', ':', '!', '?', '*', '"', '\'', '`', '_', '$'];
    let collapsed = s
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed
        .trim_matches(|c: char| EDGE.contains(&c) || c.is_whitespace())
        .to_string()
}

/// Check a plan against the travel constraints: ends at `city_end`, starts at
/// `city_start` and is continuous, uses only existing connections, visits
/// enough distinct cities, and stays within budget.
pub fn score_travel(legs: &[Leg], constraints: &TravelConstraints) -> bool {
    let Some(last) = legs.last() else {
        return false;
    };
    if last.to != constraints.city_end {
        return false;
    }
    validate_connectivity(legs, constraints) && validate_budget(legs, constraints)
}

fn validate_connectivity(legs: &[Leg], constraints: &TravelConstraints) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = constraints.city_start.as_str();
    for leg in legs {
        let connected = constraints
            .graph
            .get(&leg.from)
            .and_then(|dests| dests.get(&leg.to))
            .is_some_and(|modes| modes.iter().any(|m| *m == leg.mode));
        if !connected || leg.from != current {
            return false;
        }
        visited.insert(leg.from.as_str());
        visited.insert(leg.to.as_str());
        current = leg.to.as_str();
    }
    visited.len() >= constraints.steps
}

fn validate_budget(legs: &[Leg], constraints: &TravelConstraints) -> bool {
    let mut total = 0.0;
    for leg in legs {
        match constraints.costs.get(&leg.cost_key()) {
            Some(cost) => total += cost,
            None => return false,
        }
    }
    total <= constraints.total_budget
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn constraints() -> TravelConstraints {
        let mut graph: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
        let mut add = |from: &str, to: &str, modes: &[&str]| {
            graph
                .entry(from.to_string())
                .or_default()
                .insert(to.to_string(), modes.iter().map(|m| m.to_string()).collect());
        };
        add("Austin", "Denver", &["car", "flight"]);
        add("Denver", "Boise", &["car"]);
        add("Austin", "Boise", &["flight"]);

        let costs = [
            ("AustinDenvercar", 100.0),
            ("AustinDenverflight", 300.0),
            ("DenverBoisecar", 80.0),
            ("AustinBoiseflight", 150.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        TravelConstraints {
            city_start: "Austin".into(),
            city_end: "Boise".into(),
            total_budget: 200.0,
            steps: 3,
            graph,
            costs,
        }
    }

    #[test]
    fn test_valid_travel_plan() {
        let plan = vec![Leg::new("Austin", "Denver", "car"), Leg::new("Denver", "Boise", "car")];
        assert!(score_travel(&plan, &constraints()));
    }

    #[test]
    fn test_travel_wrong_destination() {
        let plan = vec![Leg::new("Austin", "Denver", "car")];
        assert!(!score_travel(&plan, &constraints()));
    }

    #[test]
    fn test_travel_over_budget() {
        let plan = vec![
            Leg::new("Austin", "Denver", "flight"),
            Leg::new("Denver", "Boise", "car"),
        ];
        assert!(!score_travel(&plan, &constraints()));
    }

    #[test]
    fn test_travel_too_few_cities() {
        let plan = vec![Leg::new("Austin", "Boise", "flight")];
        assert!(!score_travel(&plan, &constraints()));
    }

    #[test]
    fn test_travel_missing_connection_mode() {
        let plan = vec![
            Leg::new("Austin", "Denver", "hyperloop"),
            Leg::new("Denver", "Boise", "car"),
        ];
        assert!(!score_travel(&plan, &constraints()));
    }

    #[test]
    fn test_travel_discontinuous() {
        let plan = vec![Leg::new("Denver", "Boise", "car")];
        assert!(!score_travel(&plan, &constraints()));
    }

    #[test]
    fn test_travel_missing_cost_entry() {
        let mut c = constraints();
        c.costs.remove("DenverBoisecar");
        let plan = vec![Leg::new("Austin", "Denver", "car"), Leg::new("Denver", "Boise", "car")];
        assert!(!score_travel(&plan, &c));
    }

    #[test]
    fn test_travel_empty_plan() {
        assert!(!score_travel(&[], &constraints()));
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  The  Doctor. "), "the doctor");
        assert_eq!(normalize_text("**Tuesday**"), "tuesday");
        assert_eq!(normalize_text("\"yes\"!"), "yes");
        assert_eq!(normalize_text("$42$"), "42");
    }

    #[test]
    fn test_score_text_case_and_whitespace() {
        assert!(score_text(" BLUE ", &["blue".into()]));
        assert!(score_text("blue", &["Navy".into(), "Blue".into()]));
        assert!(!score_text("green", &["blue".into()]));
        assert!(!score_text("...", &["".into()]));
    }

    #[test]
    fn test_score_text_numeric_equivalence() {
        assert!(score_text("1,000", &["1000".into()]));
        assert!(!score_text("1001", &["1000".into()]));
    }

    #[test]
    fn test_score_counts() {
        assert!(score(&Candidate::Counts(vec![Some(3), Some(4)]), &Reference::Counts(vec![3, 4])));
        assert!(!score(&Candidate::Counts(vec![Some(3), None]), &Reference::Counts(vec![3, 4])));
        assert!(!score(&Candidate::Counts(vec![Some(3)]), &Reference::Counts(vec![3, 4])));
    }

    #[test]
    fn test_score_choice_ignores_case() {
        assert!(score(&Candidate::Choice('b'), &Reference::Choice('B')));
    }

    #[test]
    fn test_score_shape_mismatch() {
        assert!(!score(&Candidate::Integer(4), &Reference::Choice('A')));
    }
}
