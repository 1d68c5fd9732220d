use regex::Regex;
use std::sync::LazyLock;

use super::Candidate;

/// Multiple-choice conventions, strongest first.
static CHOICE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r".*<answer>([A-D])</answer>").unwrap(),
        Regex::new(r"boxed\{([A-D])\}").unwrap(),
        Regex::new(r"(?i:answer):? ([A-D])").unwrap(),
        Regex::new(r"(?i:answer).*?([A-D])").unwrap(),
    ]
});

static BARE_CHOICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W*([A-D])\W*$").unwrap());

pub(super) fn extract(response: &str) -> Option<Candidate> {
    CHOICE_PATTERNS
        .iter()
        .chain(std::iter::once(&*BARE_CHOICE))
        .find_map(|re| re.captures(response.trim()))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .map(Candidate::Choice)
}
