//! Answer matching for typed submissions.
//!
//! A card's raw `answer` field may hold several accepted variants separated
//! by commas. Both the user input and each variant are normalized before
//! comparison so spacing and case never decide correctness.

/// Normalize an answer fragment: trim, lowercase, strip all internal
/// whitespace.
pub fn normalize(value: &str) -> String {
    value.to_lowercase().split_whitespace().collect()
}

/// Split a raw answer field into normalized accepted variants, dropping
/// variants that are empty after normalization. A literal empty answer
/// yields zero usable variants.
pub fn answer_variants(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(normalize)
        .filter(|variant| !variant.is_empty())
        .collect()
}

/// Whether a submission is correct against a card's raw answer field.
///
/// A submission matches a variant when either one is a prefix of the other,
/// which covers both exact full-string submission and live partial-match
/// submission. An empty (post-normalization) input is never correct.
pub fn is_correct_answer(input: &str, answer: &str) -> bool {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return false;
    }
    answer_variants(answer)
        .iter()
        .any(|variant| variant.starts_with(&normalized) || normalized.starts_with(variant))
}

/// Whether in-progress input already satisfies the prefix relation against
/// some accepted variant, allowing auto-submit before an explicit submit.
///
/// This is an affordance only; the explicit submit path re-validates with
/// [`is_correct_answer`]. The first matching variant wins.
pub fn is_live_match(input: &str, answer: &str) -> bool {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return false;
    }
    answer_variants(answer)
        .iter()
        .any(|variant| variant.starts_with(&normalized))
}
