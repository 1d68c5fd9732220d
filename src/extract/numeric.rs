use regex::Regex;
use std::sync::LazyLock;

use super::Candidate;
use crate::number::CanonicalNumber;

static BOXED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"boxed\{([^}]*)\}").unwrap());

/// Number-looking runs: `42`, `-3.5`, `1,000`, `+7`, `.25`. Commas are taken
/// greedily so a malformed group like `1,0000` stays one run and fails to parse.
static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[+-]?\d(?:,?\d)*(?:\.\d+)?|[+-]?\.\d+").unwrap()
});

/// The last `\boxed{...}` value, which must be an integer.
pub(super) fn extract_boxed_integer(response: &str) -> Option<Candidate> {
    let raw = match BOXED.captures_iter(response).last() {
        Some(caps) => caps.get(1)?.as_str().to_string(),
        None => response.trim().to_string(),
    };
    CanonicalNumber::parse(&raw)?
        .as_integer()
        .map(Candidate::Integer)
}

/// The last number-looking token anywhere in the response.
///
/// A sign glued to a preceding word or digit is a hyphen or operator, not a
/// sign: `3-5` reads as `5`.
pub(super) fn extract_last_number(response: &str) -> Option<Candidate> {
    let token = NUMBER_TOKEN.find_iter(response).last()?;
    let mut raw = token.as_str();
    let glued = response[..token.start()]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric);
    if glued {
        raw = raw.trim_start_matches(['+', '-']);
    }
    CanonicalNumber::parse(raw).map(Candidate::Number)
}
