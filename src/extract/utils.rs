use regex::Regex;
use std::sync::LazyLock;

static HASH_BEFORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\d+)").unwrap());
static HASH_AFTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)#").unwrap());
static BOLD_BEFORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(\d+)").unwrap());
static BOLD_AFTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\*\*").unwrap());
static SLASH_BEFORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\(\d+)").unwrap());
static SLASH_AFTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\\").unwrap());

/// Strip `#`, `**` and `\` markers glued to either side of a number.
pub(super) fn remove_text_formatting(s: &str) -> String {
    let mut out = s.to_string();
    for re in [
        &*HASH_BEFORE,
        &*HASH_AFTER,
        &*BOLD_BEFORE,
        &*BOLD_AFTER,
        &*SLASH_BEFORE,
        &*SLASH_AFTER,
    ] {
        out = re.replace_all(&out, "$1").into_owned();
    }
    out
}

/// English number word to value, `zero` through `twenty`.
pub(super) fn text_to_int(s: &str) -> Option<u64> {
    const WORDS: [&str; 21] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
        "nineteen", "twenty",
    ];
    let s = s.trim().to_ascii_lowercase();
    WORDS.iter().position(|w| *w == s).map(|i| i as u64)
}

/// Parse a count as digits or a number word.
pub(super) fn parse_count(s: &str) -> Option<u64> {
    let cleaned = remove_text_formatting(s);
    let trimmed = cleaned.trim();
    trimmed.parse::<u64>().ok().or_else(|| text_to_int(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_int() {
        assert_eq!(text_to_int("zero"), Some(0));
        assert_eq!(text_to_int("five"), Some(5));
        assert_eq!(text_to_int("Twenty"), Some(20));
        assert_eq!(text_to_int("twenty-one"), None);
    }

    #[test]
    fn test_remove_text_formatting() {
        assert_eq!(remove_text_formatting("**12**"), "12");
        assert_eq!(remove_text_formatting("#3#"), "3");
        assert_eq!(remove_text_formatting("\\7\\"), "7");
        assert_eq!(remove_text_formatting("**bold**"), "**bold**");
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(" 3 "), Some(3));
        assert_eq!(parse_count("**4"), Some(4));
        assert_eq!(parse_count(" seven"), Some(7));
        assert_eq!(parse_count("lots"), None);
    }
}
