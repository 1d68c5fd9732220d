use regex::Regex;
use std::sync::LazyLock;

use super::Candidate;

/// Answer markers, tried in order. Within one pattern the first capture that
/// is not a placeholder wins.
static ANSWER_PATTERNS: LazyLock<[Regex; 7]> = LazyLock::new(|| {
    [
        Regex::new(r"boxed\{(.+?)\}").unwrap(),
        Regex::new(r"Answer.*\*{2}(.+)\*{2}").unwrap(),
        Regex::new(r"\*{2}Answer:? (.+)\*{2}").unwrap(),
        Regex::new(r"(?m)answer is:? (.+?)\.?[ \t]*$").unwrap(),
        Regex::new(r"\*{2}answer is:? (.+)\*{2}").unwrap(),
        Regex::new(r"(?m)Answer: (.+?)\.?[ \t]*$").unwrap(),
        Regex::new(r"\$(.+?)\$").unwrap(),
    ]
});

pub(super) fn extract(response: &str, placeholders: &[String]) -> Option<Candidate> {
    let is_placeholder = |s: &str| {
        placeholders
            .iter()
            .any(|p| p.trim().eq_ignore_ascii_case(s.trim()))
    };

    for re in ANSWER_PATTERNS.iter() {
        let found = re
            .captures_iter(response)
            .filter_map(|caps| caps.get(1))
            .map(|m| strip_math(m.as_str()))
            .find(|s| !s.is_empty() && !is_placeholder(s));
        if let Some(s) = found {
            return Some(Candidate::Text(s.to_string()));
        }
    }

    // A one-line reply is taken as the answer itself.
    let trimmed = strip_math(response);
    if trimmed.is_empty() || trimmed.contains('\n') || is_placeholder(trimmed) {
        return None;
    }
    Some(Candidate::Text(trimmed.to_string()))
}

/// Trim, then drop one surrounding `$...$` pair.
fn strip_math(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('$')
        .and_then(|inner| inner.strip_suffix('$'))
        .map(str::trim)
        .unwrap_or(s)
}
