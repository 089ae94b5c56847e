//! Plant compatibility evaluator.
//!
//! Partitions a set of already-placed plants into companions and
//! incompatibles of a candidate plant. Relationships are declared as lists
//! of species names on each side and need not be declared on both sides:
//! the check runs bidirectionally, so either party's list can establish the
//! link.
//!
//! Contradictory data (a plant listed as both companion and incompatible)
//! is surfaced in both result lists; no precedence rule is applied.

pub mod matcher;

pub use matcher::{ExactMatcher, NameMatcher, SubstringMatcher, WordMatcher};

use trellis_db::models::{Placement, Plant};

/// A plant-like value the evaluator can read: an identifier, a display
/// name, and the declared companion/incompatible name lists.
///
/// Implemented by both catalog [`Plant`]s and user [`Placement`]s so a
/// candidate from either source can be checked against placed plants.
pub trait CompatSubject {
    fn subject_id(&self) -> &str;
    fn subject_name(&self) -> &str;
    fn companions(&self) -> &[String];
    fn incompatibles(&self) -> &[String];
}

impl CompatSubject for Plant {
    fn subject_id(&self) -> &str {
        &self.id
    }
    fn subject_name(&self) -> &str {
        &self.name
    }
    fn companions(&self) -> &[String] {
        &self.companions
    }
    fn incompatibles(&self) -> &[String] {
        &self.incompatibles
    }
}

impl CompatSubject for Placement {
    fn subject_id(&self) -> &str {
        &self.plant_id
    }
    fn subject_name(&self) -> &str {
        &self.name
    }
    fn companions(&self) -> &[String] {
        &self.companions
    }
    fn incompatibles(&self) -> &[String] {
        &self.incompatibles
    }
}

/// Result of partitioning placed plants against a candidate.
///
/// Both lists preserve the input order of `existing`. A placed plant may
/// appear in both lists when the underlying data is contradictory.
#[derive(Debug, Clone)]
pub struct CompatReport<'a, P> {
    pub companions: Vec<&'a P>,
    pub incompatibles: Vec<&'a P>,
}

/// A subject with id, name, and both token lists lower-cased once up front.
struct Lowered {
    id: String,
    name: String,
    companions: Vec<String>,
    incompatibles: Vec<String>,
}

impl Lowered {
    fn of(subject: &impl CompatSubject) -> Self {
        let lower_list = |list: &[String]| -> Vec<String> {
            list.iter().map(|s| s.trim().to_lowercase()).collect()
        };
        Self {
            id: subject.subject_id().to_lowercase(),
            name: subject.subject_name().to_lowercase(),
            companions: lower_list(subject.companions()),
            incompatibles: lower_list(subject.incompatibles()),
        }
    }
}

/// True when any token in `tokens` refers to `other` under `matcher`.
///
/// Empty tokens are skipped: a blank list entry must not match everything.
fn any_match(tokens: &[String], other: &Lowered, matcher: &dyn NameMatcher) -> bool {
    tokens
        .iter()
        .filter(|token| !token.is_empty())
        .any(|token| matcher.matches(token, &other.name, &other.id))
}

/// Partition `existing` placed plants into companions and incompatibles of
/// `candidate`.
///
/// A placed plant is a companion when any of the candidate's companion
/// tokens matches the placed plant's name or id, or any of the placed
/// plant's own companion tokens matches the candidate's name or id. The
/// incompatible rule is symmetric. Pure: no I/O, deterministic,
/// order-preserving.
pub fn partition<'a, C, P>(
    candidate: &C,
    existing: &'a [P],
    matcher: &dyn NameMatcher,
) -> CompatReport<'a, P>
where
    C: CompatSubject,
    P: CompatSubject,
{
    let cand = Lowered::of(candidate);

    let mut report = CompatReport {
        companions: Vec::new(),
        incompatibles: Vec::new(),
    };

    for placed in existing {
        let other = Lowered::of(placed);

        let companion = any_match(&cand.companions, &other, matcher)
            || any_match(&other.companions, &cand, matcher);
        let incompatible = any_match(&cand.incompatibles, &other, matcher)
            || any_match(&other.incompatibles, &cand, matcher);

        if companion {
            report.companions.push(placed);
        }
        if incompatible {
            report.incompatibles.push(placed);
        }
    }

    report
}

/// [`partition`] with the default [`SubstringMatcher`].
pub fn partition_default<'a, C, P>(candidate: &C, existing: &'a [P]) -> CompatReport<'a, P>
where
    C: CompatSubject,
    P: CompatSubject,
{
    partition(candidate, existing, &SubstringMatcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal in-memory subject for exercising the partition algorithm.
    struct Subject {
        id: String,
        name: String,
        companions: Vec<String>,
        incompatibles: Vec<String>,
    }

    impl Subject {
        fn new(id: &str, name: &str) -> Self {
            Self {
                id: id.to_owned(),
                name: name.to_owned(),
                companions: Vec::new(),
                incompatibles: Vec::new(),
            }
        }

        fn with_companions(mut self, list: &[&str]) -> Self {
            self.companions = list.iter().map(|s| (*s).to_owned()).collect();
            self
        }

        fn with_incompatibles(mut self, list: &[&str]) -> Self {
            self.incompatibles = list.iter().map(|s| (*s).to_owned()).collect();
            self
        }
    }

    impl CompatSubject for Subject {
        fn subject_id(&self) -> &str {
            &self.id
        }
        fn subject_name(&self) -> &str {
            &self.name
        }
        fn companions(&self) -> &[String] {
            &self.companions
        }
        fn incompatibles(&self) -> &[String] {
            &self.incompatibles
        }
    }

    #[test]
    fn substring_companion_case_insensitive() {
        let candidate = Subject::new("basil", "Basil").with_companions(&["tomato"]);
        let existing = vec![Subject::new("cherry-tomato", "Cherry Tomato")];

        let report = partition_default(&candidate, &existing);
        assert_eq!(report.companions.len(), 1);
        assert_eq!(report.companions[0].id, "cherry-tomato");
        assert!(report.incompatibles.is_empty());
    }

    #[test]
    fn bidirectional_incompatible_from_placed_side() {
        // The candidate declares nothing; only the placed plant's list
        // establishes the relationship.
        let candidate = Subject::new("fennel", "Fennel");
        let existing = vec![Subject::new("tomato", "Tomato").with_incompatibles(&["fennel"])];

        let report = partition_default(&candidate, &existing);
        assert!(report.companions.is_empty());
        assert_eq!(report.incompatibles.len(), 1);
        assert_eq!(report.incompatibles[0].id, "tomato");
    }

    #[test]
    fn contradictory_data_lands_in_both_lists() {
        let candidate = Subject::new("mint", "Mint")
            .with_companions(&["chamomile"])
            .with_incompatibles(&["chamomile"]);
        let existing = vec![Subject::new("chamomile", "Chamomile")];

        let report = partition_default(&candidate, &existing);
        assert_eq!(report.companions.len(), 1);
        assert_eq!(report.incompatibles.len(), 1);
    }

    #[test]
    fn match_against_id_not_just_name() {
        let candidate = Subject::new("carrot", "Carrot").with_companions(&["allium"]);
        let existing = vec![Subject::new("allium-cepa", "Onion")];

        let report = partition_default(&candidate, &existing);
        assert_eq!(report.companions.len(), 1);
    }

    #[test]
    fn empty_tokens_match_nothing() {
        let candidate = Subject::new("kale", "Kale").with_companions(&["", "  "]);
        let existing = vec![Subject::new("beet", "Beet")];

        let report = partition_default(&candidate, &existing);
        assert!(report.companions.is_empty());
    }

    #[test]
    fn order_of_existing_is_preserved() {
        let candidate = Subject::new("basil", "Basil").with_companions(&["tomato", "pepper"]);
        let existing = vec![
            Subject::new("pepper", "Bell Pepper"),
            Subject::new("carrot", "Carrot"),
            Subject::new("tomato", "Tomato"),
        ];

        let report = partition_default(&candidate, &existing);
        let ids: Vec<&str> = report.companions.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["pepper", "tomato"]);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let candidate = Subject::new("basil", "Basil").with_companions(&["tomato"]);
        let existing = vec![
            Subject::new("cherry-tomato", "Cherry Tomato"),
            Subject::new("fennel", "Fennel").with_incompatibles(&["basil"]),
        ];

        let first = partition_default(&candidate, &existing);
        let second = partition_default(&candidate, &existing);
        let ids = |report: &CompatReport<'_, Subject>| -> (Vec<String>, Vec<String>) {
            (
                report.companions.iter().map(|p| p.id.clone()).collect(),
                report.incompatibles.iter().map(|p| p.id.clone()).collect(),
            )
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn exact_matcher_rejects_partial_tokens() {
        let candidate = Subject::new("basil", "Basil").with_companions(&["tomato"]);
        let existing = vec![Subject::new("cherry-tomato", "Cherry Tomato")];

        let report = partition(&candidate, &existing, &ExactMatcher);
        assert!(report.companions.is_empty());
    }
}
