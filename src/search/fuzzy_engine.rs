//! Weighted string similarity used to rank food names.
//!
//! Scores are on a 0–100 scale. The blend follows the widely used "WRatio"
//! scorer: a plain indel ratio for similar-length strings boosted by
//! token-order-insensitive ratios, and a partial (substring) ratio when one
//! string is much longer than the other.

use std::collections::BTreeSet;

/// Weight applied to token-based ratios.
pub const UNBASE_SCALE: f64 = 0.95;
/// Length ratio under which strings are compared whole.
const WHOLE_MATCH_LEN_RATIO: f64 = 1.5;
/// Length ratio under which partial matches keep most of their weight.
const LONG_PARTIAL_LEN_RATIO: f64 = 8.0;

#[derive(Debug, Clone, Copy)]
pub struct FuzzyEngine {
    preprocess: bool,
}

impl Default for FuzzyEngine {
    fn default() -> Self {
        Self { preprocess: true }
    }
}

impl FuzzyEngine {
    pub fn new(preprocess: bool) -> Self {
        Self { preprocess }
    }

    /// Prepares a string the way [`FuzzyEngine::score_prepared`] expects it.
    pub fn prepare(&self, text: &str) -> String {
        if self.preprocess {
            normalize(text)
        } else {
            text.to_string()
        }
    }

    pub fn score(&self, query: &str, choice: &str) -> f64 {
        self.score_prepared(&self.prepare(query), &self.prepare(choice))
    }

    /// Scores two strings that already went through [`FuzzyEngine::prepare`].
    pub fn score_prepared(&self, query: &str, choice: &str) -> f64 {
        weighted_ratio(query, choice)
    }
}

/// Lower-cases and replaces every non-alphanumeric character with a space,
/// then trims the ends.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .chars()
        .flat_map(|c| {
            let replacement = if c.is_alphanumeric() { c } else { ' ' };
            replacement.to_lowercase()
        })
        .collect();
    mapped.trim().to_string()
}

pub fn weighted_ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (a.len(), b.len()) } else { (b.len(), a.len()) };
    let len_ratio = longer as f64 / shorter as f64;
    let end_ratio = indel_ratio(&a, &b);

    if len_ratio < WHOLE_MATCH_LEN_RATIO {
        return end_ratio.max(token_ratio(s1, s2) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < LONG_PARTIAL_LEN_RATIO { 0.9 } else { 0.6 };
    let end_ratio = end_ratio.max(partial_ratio_chars(&a, &b) * partial_scale);
    end_ratio.max(partial_token_ratio(s1, s2) * UNBASE_SCALE * partial_scale)
}

/// Normalised indel similarity: `100 * 2 * lcs / (len1 + len2)`.
pub fn ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    indel_ratio(&a, &b)
}

fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let matched = 2 * lcs_len(a, b);
    100.0 * matched as f64 / total as f64
}

fn indel_distance(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * lcs_len(a, b)
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Best [`ratio`] of the shorter string against any same-length window of
/// the longer one, including windows clipped at either end.
pub fn partial_ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    partial_ratio_chars(&a, &b)
}

fn partial_ratio_chars(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.len() < b.len() {
        best_window_ratio(a, b)
    } else if a.len() > b.len() {
        best_window_ratio(b, a)
    } else {
        best_window_ratio(a, b).max(best_window_ratio(b, a))
    }
}

fn best_window_ratio(short: &[char], long: &[char]) -> f64 {
    let n = short.len();
    let m = long.len();
    let mut best = 0.0_f64;

    let head = (1..n).map(|end| &long[..end]);
    let full = (0..=m - n).map(|start| &long[start..start + n]);
    let tail = (m - n + 1..m).map(|start| &long[start..]);

    for window in head.chain(full).chain(tail) {
        best = best.max(indel_ratio(short, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

pub fn token_sort_ratio(s1: &str, s2: &str) -> f64 {
    ratio(&sorted_tokens(s1).join(" "), &sorted_tokens(s2).join(" "))
}

pub fn token_set_ratio(s1: &str, s2: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = s1.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = s2.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // One side is a subset of the other.
    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab_joined: Vec<char> = diff_ab.join(" ").chars().collect();
    let diff_ba_joined: Vec<char> = diff_ba.join(" ").chars().collect();
    let ab_len = diff_ab_joined.len();
    let ba_len = diff_ba_joined.len();
    let sect_len = intersection.join(" ").chars().count();
    let separator = usize::from(sect_len > 0);

    let sect_ab_len = sect_len + separator + ab_len;
    let sect_ba_len = sect_len + separator + ba_len;

    let dist = indel_distance(&diff_ab_joined, &diff_ba_joined);
    let result = normalized_similarity(dist, sect_ab_len + sect_ba_len);
    if sect_len == 0 {
        return result;
    }

    // The intersection is a prefix of both "intersection + rest" strings, so
    // their distance to it is just the length of the rest.
    let sect_ab_ratio = normalized_similarity(separator + ab_len, sect_len + sect_ab_len);
    let sect_ba_ratio = normalized_similarity(separator + ba_len, sect_len + sect_ba_len);
    result.max(sect_ab_ratio).max(sect_ba_ratio)
}

fn normalized_similarity(distance: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    100.0 * (total - distance.min(total)) as f64 / total as f64
}

fn token_ratio(s1: &str, s2: &str) -> f64 {
    token_sort_ratio(s1, s2).max(token_set_ratio(s1, s2))
}

pub fn partial_token_ratio(s1: &str, s2: &str) -> f64 {
    let tokens_s1 = sorted_tokens(s1);
    let tokens_s2 = sorted_tokens(s2);
    let set_a: BTreeSet<&str> = tokens_s1.iter().copied().collect();
    let set_b: BTreeSet<&str> = tokens_s2.iter().copied().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    // A shared word is a perfect partial match.
    if set_a.intersection(&set_b).next().is_some() {
        return 100.0;
    }

    let result = partial_ratio(&tokens_s1.join(" "), &tokens_s2.join(" "));
    // Without duplicate words the difference sets equal the token lists.
    if set_a.len() == tokens_s1.len() && set_b.len() == tokens_s2.len() {
        return result;
    }

    let diff_ab = set_a.iter().copied().collect::<Vec<_>>().join(" ");
    let diff_ba = set_b.iter().copied().collect::<Vec<_>>().join(" ");
    result.max(partial_ratio(&diff_ab, &diff_ba))
}
