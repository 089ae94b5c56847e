//! Pluggable name-matching strategies for the compatibility evaluator.
//!
//! A matcher decides whether one token from a companion/incompatible list
//! refers to a given plant. All inputs arrive already lower-cased; the
//! partition algorithm owns normalization so every strategy sees the same
//! view of the data.

/// Strategy for deciding whether a list token refers to a plant.
///
/// `token`, `name`, and `id` are all lower-case by the time they get here.
pub trait NameMatcher: Send + Sync {
    fn matches(&self, token: &str, name: &str, id: &str) -> bool;
}

/// Substring containment against the plant's name or id.
///
/// The default strategy: tolerant of multi-word and latin-vs-common naming
/// ("tomato" finds "cherry tomato"), at the cost of false positives when
/// short tokens coincide. That tradeoff is deliberate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl NameMatcher for SubstringMatcher {
    fn matches(&self, token: &str, name: &str, id: &str) -> bool {
        name.contains(token) || id.contains(token)
    }
}

/// Exact equality against the plant's name or id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl NameMatcher for ExactMatcher {
    fn matches(&self, token: &str, name: &str, id: &str) -> bool {
        token == name || token == id
    }
}

/// Whole-word equality: the token must equal one whitespace-separated word
/// of the name, or the full id.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordMatcher;

impl NameMatcher for WordMatcher {
    fn matches(&self, token: &str, name: &str, id: &str) -> bool {
        name.split_whitespace().any(|word| word == token) || token == id
    }
}
