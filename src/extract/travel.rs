use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::Candidate;
use crate::types::Leg;

static PYTHON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```python\n(.*?)```").unwrap());

/// A parenthesized group with no nested parentheses.
static TUPLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^()]+)\)").unwrap());

/// Optional `plan = ` prefix in front of the literal.
static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\s*=\s*").unwrap());

/// Read the plan from the last ```python block, or from the whole response
/// when it is itself a plan literal.
pub(super) fn extract(response: &str) -> Option<Candidate> {
    let literal = match PYTHON_BLOCK.captures_iter(response).last() {
        Some(caps) => caps.get(1)?.as_str().trim().to_string(),
        None => response.trim().to_string(),
    };
    parse_plan(&literal).map(Candidate::Plan)
}

/// Quote every bare item inside parenthesized groups.
///
/// `(Fort Wayne, Boise, flight)` becomes `('Fort Wayne', 'Boise', 'flight')`;
/// items that are already quoted are kept as written.
pub fn insert_quotes_in_tuples(candidate: &str) -> String {
    TUPLE
        .replace_all(candidate, |caps: &Captures| {
            let quoted: Vec<String> = caps[1]
                .split(',')
                .map(str::trim)
                .map(|p| {
                    if is_quoted(p) {
                        p.to_string()
                    } else {
                        format!("'{p}'")
                    }
                })
                .collect();
            format!("({})", quoted.join(", "))
        })
        .into_owned()
}

fn is_quoted(p: &str) -> bool {
    p.len() >= 2
        && ((p.starts_with('\'') && p.ends_with('\'')) || (p.starts_with('"') && p.ends_with('"')))
}

fn unquote(p: &str) -> &str {
    if is_quoted(p) {
        &p[1..p.len() - 1]
    } else {
        p
    }
}

/// Parse `[(a, b, c), ...]` or a lone `(a, b, c)` into legs.
///
/// Everything outside the tuples must be brackets, commas or whitespace, and
/// every tuple must have exactly three items.
fn parse_plan(literal: &str) -> Option<Vec<Leg>> {
    let literal = ASSIGNMENT.replace(literal, "");
    let literal = literal.trim();
    let body = match literal.strip_prefix('[') {
        Some(rest) => rest.strip_suffix(']')?,
        None => literal,
    };

    let mut legs = Vec::new();
    let mut last_end = 0;
    for caps in TUPLE.captures_iter(body) {
        let whole = caps.get(0)?;
        if !is_separator(&body[last_end..whole.start()]) {
            return None;
        }
        last_end = whole.end();

        let items: Vec<&str> = caps[1].split(',').map(str::trim).map(unquote).collect();
        let [from, to, mode] = items.as_slice() else {
            return None;
        };
        if from.is_empty() || to.is_empty() || mode.is_empty() {
            return None;
        }
        legs.push(Leg::new(from, to, mode));
    }
    if legs.is_empty() || !is_separator(&body[last_end..]) {
        return None;
    }
    Some(legs)
}

fn is_separator(s: &str) -> bool {
    s.chars().all(|c| c == ',' || c.is_whitespace())
}
