//! String similarity algorithms.
//!
//! Every function returns a similarity in `0.0..=100.0`. The base measure is
//! the normalized Indel similarity (`1 - indel_distance / (len_a + len_b)`)
//! from `rapidfuzz`; the other algorithms combine it over substrings or
//! token rearrangements. Lengths are counted in Unicode scalar values.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;

/// Weight applied to token-based scores inside [`weighted_ratio`].
const UNBASE_SCALE: f64 = 0.95;
/// Length ratio below which [`weighted_ratio`] skips the partial algorithms.
const PARTIAL_LENGTH_RATIO: f64 = 1.5;
/// Length ratio from which partial scores are weighted down harder.
const LONG_LENGTH_RATIO: f64 = 8.0;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    100.0 * indel::normalized_similarity(a.iter().copied(), b.iter().copied())
}

/// Edit-distance ratio of the two strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    ratio_chars(&chars(a), &chars(b))
}

/// Best [`ratio`] of the shorter string against any same-length window of
/// the longer one.
///
/// Windows that only partly overlap the longer string at either end are
/// included. With equal lengths both directions are tried.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    partial_ratio_chars(&chars(a), &chars(b))
}

fn partial_ratio_chars(a: &[char], b: &[char]) -> f64 {
    let (needle, haystack) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if needle.is_empty() {
        return if haystack.is_empty() { 100.0 } else { 0.0 };
    }
    let best = best_window(needle, haystack);
    if a.len() == b.len() && best < 100.0 {
        return best.max(best_window(haystack, needle));
    }
    best
}

fn best_window(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let m = haystack.len();
    let mut best = 0.0_f64;

    let windows = (1..n)
        .map(|end| &haystack[..end])
        .chain((0..=m - n).map(|start| &haystack[start..start + n]))
        .chain((m - n + 1..m).map(|start| &haystack[start..]));

    for window in windows {
        best = best.max(ratio_chars(needle, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// [`ratio`] after sorting whitespace-separated tokens.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

struct TokenSets<'a> {
    intersection: Vec<&'a str>,
    diff_ab: Vec<&'a str>,
    diff_ba: Vec<&'a str>,
}

impl<'a> TokenSets<'a> {
    /// Returns `None` when either side has no tokens.
    fn split(a: &'a str, b: &'a str) -> Option<Self> {
        let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
        let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
        if tokens_a.is_empty() || tokens_b.is_empty() {
            return None;
        }
        Some(Self {
            intersection: tokens_a.intersection(&tokens_b).copied().collect(),
            diff_ab: tokens_a.difference(&tokens_b).copied().collect(),
            diff_ba: tokens_b.difference(&tokens_a).copied().collect(),
        })
    }

    fn one_side_contained(&self) -> bool {
        !self.intersection.is_empty() && (self.diff_ab.is_empty() || self.diff_ba.is_empty())
    }
}

fn join_parts(head: &str, tail: &[&str]) -> String {
    let tail = tail.join(" ");
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail,
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

/// Set-based token comparison, insensitive to token order and repetition.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let Some(sets) = TokenSets::split(a, b) else {
        return 0.0;
    };
    if sets.one_side_contained() {
        return 100.0;
    }
    let sect = sets.intersection.join(" ");
    let combined_ab = join_parts(&sect, &sets.diff_ab);
    let combined_ba = join_parts(&sect, &sets.diff_ba);

    ratio(&sect, &combined_ab)
        .max(ratio(&sect, &combined_ba))
        .max(ratio(&combined_ab, &combined_ba))
}

fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let Some(sets) = TokenSets::split(a, b) else {
        return 0.0;
    };
    if !sets.intersection.is_empty() {
        return 100.0;
    }
    let sorted = partial_ratio(&sorted_tokens(a), &sorted_tokens(b));
    sorted.max(partial_ratio(&sets.diff_ab.join(" "), &sets.diff_ba.join(" ")))
}

/// Weighted blend of the other algorithms, chosen by the length ratio of
/// the inputs.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let base = ratio(a, b);

    if len_ratio < PARTIAL_LENGTH_RATIO {
        let token = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return base.max(token * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < LONG_LENGTH_RATIO {
        0.9
    } else {
        0.6
    };
    base.max(partial_ratio(a, b) * partial_scale)
        .max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}
