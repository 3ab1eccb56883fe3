//! Wrong-answer sampling for multiple-choice questions.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Placeholder prefix used when the meaning pool runs dry.
pub const DEFINITION_FALLBACK: &str = "Definition";
/// Placeholder prefix used when the term pool runs dry.
pub const TERM_FALLBACK: &str = "Word";

/// Draw `count` distinct wrong answers for `correct` from `pool`.
///
/// Values equal to `correct` and repeated pool values are dropped before a
/// uniform sample without replacement. When fewer than `count` remain, the
/// result is padded with `"{fallback_prefix} {k}"` for increasing `k`,
/// skipping any placeholder that would repeat `correct` or an earlier entry.
/// Placeholders are not checked against unused pool values.
pub fn sample<R, S>(
    rng: &mut R,
    correct: &str,
    pool: &[S],
    count: usize,
    fallback_prefix: &str,
) -> Vec<String>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut candidates: Vec<&str> = pool
        .iter()
        .map(|v| v.as_ref())
        .filter(|v| *v != correct && seen.insert(*v))
        .collect();

    candidates.shuffle(rng);
    candidates.truncate(count);

    let mut picked: Vec<String> = candidates.into_iter().map(str::to_string).collect();

    if picked.len() < count {
        tracing::debug!(
            correct,
            available = picked.len(),
            count,
            "distractor pool too small, padding with placeholders"
        );
    }

    let mut k = 1;
    while picked.len() < count {
        let placeholder = format!("{fallback_prefix} {k}");
        k += 1;
        if placeholder != correct && !picked.contains(&placeholder) {
            picked.push(placeholder);
        }
    }

    picked
}

/// Insert `correct` at a uniformly random position among `distractors`.
pub fn with_correct<R: Rng + ?Sized>(
    rng: &mut R,
    correct: &str,
    mut distractors: Vec<String>,
) -> Vec<String> {
    let at = rng.random_range(0..=distractors.len());
    distractors.insert(at, correct.to_string());
    distractors
}
