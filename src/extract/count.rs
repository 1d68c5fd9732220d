use regex::Regex;
use std::sync::LazyLock;

use super::utils::parse_count;
use super::Candidate;

static SINGLE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"appear.*?(\d+).*?time").unwrap());

static MULTI_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*appear \**\\?\[(.+)?\\?\]\** time").unwrap());

/// Extract `k` counts, e.g. "appears **12** times" or "appear [3, 4, 5] times".
pub(super) fn extract(response: &str, k: usize) -> Option<Candidate> {
    if k == 0 {
        return None;
    }
    let from_sentence = if k == 1 {
        SINGLE_COUNT
            .captures(response)
            .and_then(|caps| caps.get(1))
            .map(|m| vec![parse_count(m.as_str())])
    } else {
        MULTI_COUNT
            .captures(response)
            .and_then(|caps| caps.get(1))
            .map(|m| split_counts(m.as_str()))
    };

    let counts = from_sentence.or_else(|| canonical_form(response.trim(), k))?;
    if counts.len() != k {
        return None;
    }
    Some(Candidate::Counts(counts))
}

fn split_counts(inner: &str) -> Vec<Option<u64>> {
    inner.split(',').map(parse_count).collect()
}

/// `12` for a single item, `[3, 4, ?]` for several.
fn canonical_form(s: &str, k: usize) -> Option<Vec<Option<u64>>> {
    if k == 1 {
        return s.parse::<u64>().ok().map(|n| vec![Some(n)]);
    }
    let inner = s.strip_prefix('[')?.strip_suffix(']')?;
    Some(split_counts(inner))
}
