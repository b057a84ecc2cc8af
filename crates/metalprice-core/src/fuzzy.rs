//! Scored fuzzy matching for names that drift between data sources.
//!
//! Vendor names (and correction keys) are not guaranteed to be spelled the
//! same way in every file: full-width vs half-width spaces and brackets,
//! stray suffixes, or partially garbled encodings all occur. Every lookup
//! collects all candidates that match at some tier and picks the best one,
//! so the answer does not depend on map iteration order.

/// Exact equality after trimming.
const EXACT_SCORE: usize = 3000;
/// Equality after [`squash`].
const SQUASHED_SCORE: usize = 2000;
/// One side contains the other (after [`squash`]).
const CONTAINS_SCORE: usize = 1000;

/// Removes half-/full-width spaces and folds full-width brackets to ASCII.
#[must_use]
pub fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            other => other,
        })
        .collect()
}

/// Score of `candidate` as a match for `needle`, or `None` when they do not
/// match at all.
///
/// Within a tier, longer candidates score higher: they are more specific.
/// Empty strings never match anything.
#[must_use]
pub fn match_score(needle: &str, candidate: &str) -> Option<usize> {
    let needle = needle.trim();
    let candidate = candidate.trim();
    if needle.is_empty() || candidate.is_empty() {
        return None;
    }

    let len = candidate.chars().count();
    if needle == candidate {
        return Some(EXACT_SCORE + len);
    }

    let needle_sq = squash(needle);
    let candidate_sq = squash(candidate);
    if needle_sq.is_empty() || candidate_sq.is_empty() {
        return None;
    }
    if needle_sq == candidate_sq {
        return Some(SQUASHED_SCORE + len);
    }
    if needle_sq.contains(&candidate_sq) || candidate_sq.contains(&needle_sq) {
        return Some(CONTAINS_SCORE + len);
    }
    None
}

/// `true` when `a` and `b` are the same name, exactly or after [`squash`].
/// Containment does not count.
#[must_use]
pub fn same_name(a: &str, b: &str) -> bool {
    match_score(a, b).is_some_and(|score| score >= SQUASHED_SCORE)
}

/// Index of the best-scoring candidate for `needle`.
///
/// Ties keep the earliest candidate.
pub fn best_match<'a, I>(needle: &str, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, usize)> = None;
    for (idx, candidate) in candidates.into_iter().enumerate() {
        if let Some(score) = match_score(needle, candidate) {
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }
    }
    best.map(|(idx, _)| idx)
}
