use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{QuestionType, RawAnswer};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("alphanumeric pattern is valid"));

/// Canonical comparable form of a submitted answer. Produced only here;
/// the evaluator compares these against the stored correct-answer
/// definition using the same key functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NormalizedAnswer {
    /// Single choice: the scalar as a choice identifier plus its
    /// alphanumeric text key, so either representation of the stored
    /// correct marker can match.
    Selection { id: String, text_key: String },
    /// Multiple choice: unordered sets. Order carries no meaning.
    SelectionSet {
        ids: BTreeSet<String>,
        text_keys: BTreeSet<String>,
    },
    /// Identification: trimmed, lower-cased, inner whitespace collapsed.
    Text(String),
    /// True/false reduced to a strict boolean.
    Truth(bool),
    /// Input that cannot be normalized for the question type. Always
    /// evaluates incorrect, never an error.
    Ungradable,
}

/// Lower-cased, all non-alphanumeric characters stripped. Used for
/// choice-text matching on both sides of the comparison.
pub fn selection_text_key(text: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(&text.to_lowercase(), "")
        .into_owned()
}

/// Trimmed, lower-cased, internal whitespace runs collapsed to single
/// spaces. Applied identically to student answers and stored correct
/// answers.
pub fn identification_key(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// Boolean interpretation of a stored or submitted text value.
pub fn truthy(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

pub fn normalize(question_type: QuestionType, raw: &RawAnswer) -> NormalizedAnswer {
    match question_type {
        QuestionType::Single => normalize_single(raw),
        QuestionType::Multi => normalize_multi(raw),
        QuestionType::Identification => normalize_identification(raw),
        QuestionType::TrueFalse => normalize_true_false(raw),
    }
}

fn normalize_single(raw: &RawAnswer) -> NormalizedAnswer {
    match raw.as_scalar_string() {
        Some(value) => NormalizedAnswer::Selection {
            id: value.trim().to_string(),
            text_key: selection_text_key(&value),
        },
        None => NormalizedAnswer::Ungradable,
    }
}

fn normalize_multi(raw: &RawAnswer) -> NormalizedAnswer {
    let entries = match raw {
        RawAnswer::List(items) => {
            let mut entries = Vec::with_capacity(items.len());
            for item in items {
                match item.as_scalar_string() {
                    Some(value) => entries.push(value),
                    None => return NormalizedAnswer::Ungradable,
                }
            }
            entries
        }
        // A JSON-encoded list sneaks through some clients as a string.
        RawAnswer::Text(value) => match serde_json::from_str::<Vec<serde_json::Value>>(value) {
            Ok(items) => {
                let mut entries = Vec::with_capacity(items.len());
                for item in items {
                    match json_scalar_to_string(&item) {
                        Some(value) => entries.push(value),
                        None => return NormalizedAnswer::Ungradable,
                    }
                }
                entries
            }
            Err(_) => vec![value.clone()],
        },
        // A bare scalar is coerced to a one-element selection.
        RawAnswer::Bool(value) => vec![value.to_string()],
        RawAnswer::Int(value) => vec![value.to_string()],
    };

    let ids: BTreeSet<String> = entries.iter().map(|e| e.trim().to_string()).collect();
    let text_keys: BTreeSet<String> = entries.iter().map(|e| selection_text_key(e)).collect();
    NormalizedAnswer::SelectionSet { ids, text_keys }
}

fn normalize_identification(raw: &RawAnswer) -> NormalizedAnswer {
    match raw.as_scalar_string() {
        Some(value) => NormalizedAnswer::Text(identification_key(&value)),
        None => NormalizedAnswer::Ungradable,
    }
}

fn normalize_true_false(raw: &RawAnswer) -> NormalizedAnswer {
    match raw {
        RawAnswer::Bool(value) => NormalizedAnswer::Truth(*value),
        RawAnswer::Int(value) => NormalizedAnswer::Truth(truthy(&value.to_string())),
        RawAnswer::Text(value) => NormalizedAnswer::Truth(truthy(value)),
        RawAnswer::List(_) => NormalizedAnswer::Ungradable,
    }
}

fn json_scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi_ids(raw: &RawAnswer) -> BTreeSet<String> {
        match normalize(QuestionType::Multi, raw) {
            NormalizedAnswer::SelectionSet { ids, .. } => ids,
            other => panic!("expected a selection set, got {:?}", other),
        }
    }

    #[test]
    fn single_produces_identifier_and_text_key() {
        let normalized = normalize(QuestionType::Single, &RawAnswer::Int(7));
        assert_eq!(
            normalized,
            NormalizedAnswer::Selection {
                id: "7".to_string(),
                text_key: "7".to_string(),
            }
        );

        let normalized = normalize(QuestionType::Single, &RawAnswer::from("The Mitochondria!"));
        assert_eq!(
            normalized,
            NormalizedAnswer::Selection {
                id: "The Mitochondria!".to_string(),
                text_key: "themitochondria".to_string(),
            }
        );
    }

    #[test]
    fn single_rejects_list_input() {
        let normalized = normalize(QuestionType::Single, &RawAnswer::List(vec![7.into()]));
        assert_eq!(normalized, NormalizedAnswer::Ungradable);
    }

    #[test]
    fn multi_set_is_order_independent() {
        let a = multi_ids(&RawAnswer::List(vec![3.into(), 5.into()]));
        let b = multi_ids(&RawAnswer::List(vec![5.into(), 3.into()]));
        assert_eq!(a, b);
    }

    #[test]
    fn multi_coerces_bare_scalar_to_single_entry() {
        let ids = multi_ids(&RawAnswer::Int(3));
        assert_eq!(ids, BTreeSet::from(["3".to_string()]));
    }

    #[test]
    fn multi_decodes_json_encoded_string_list() {
        let ids = multi_ids(&RawAnswer::from("[3, 5]"));
        assert_eq!(ids, BTreeSet::from(["3".to_string(), "5".to_string()]));

        let ids = multi_ids(&RawAnswer::from(r#"["c-1", "c-2"]"#));
        assert_eq!(ids, BTreeSet::from(["c-1".to_string(), "c-2".to_string()]));
    }

    #[test]
    fn multi_rejects_nested_lists() {
        let normalized = normalize(
            QuestionType::Multi,
            &RawAnswer::List(vec![RawAnswer::List(vec![3.into()])]),
        );
        assert_eq!(normalized, NormalizedAnswer::Ungradable);
    }

    #[test]
    fn identification_trims_lowercases_and_collapses_whitespace() {
        let normalized = normalize(
            QuestionType::Identification,
            &RawAnswer::from("  New   York \t City "),
        );
        assert_eq!(normalized, NormalizedAnswer::Text("new york city".to_string()));
    }

    #[test]
    fn true_false_accepts_polymorphic_truthy_forms() {
        for raw in [
            RawAnswer::Bool(true),
            RawAnswer::Int(1),
            RawAnswer::from("true"),
            RawAnswer::from("TRUE"),
            RawAnswer::from(" yes "),
            RawAnswer::from("1"),
        ] {
            assert_eq!(
                normalize(QuestionType::TrueFalse, &raw),
                NormalizedAnswer::Truth(true),
                "expected {:?} to normalize to true",
                raw
            );
        }

        for raw in [
            RawAnswer::Bool(false),
            RawAnswer::Int(0),
            RawAnswer::from("false"),
            RawAnswer::from("0"),
            RawAnswer::from(""),
            RawAnswer::from("no"),
        ] {
            assert_eq!(
                normalize(QuestionType::TrueFalse, &raw),
                NormalizedAnswer::Truth(false),
                "expected {:?} to normalize to false",
                raw
            );
        }
    }

    #[test]
    fn normalization_is_idempotent_on_canonical_forms() {
        // Re-normalizing a value already in canonical form reproduces it.
        let canonical = identification_key("  Mitochondria  ");
        assert_eq!(
            normalize(QuestionType::Identification, &RawAnswer::Text(canonical.clone())),
            NormalizedAnswer::Text(canonical)
        );

        let key = selection_text_key("The Mitochondria!");
        assert_eq!(selection_text_key(&key), key);

        assert_eq!(
            normalize(QuestionType::TrueFalse, &RawAnswer::from("true")),
            normalize(QuestionType::TrueFalse, &RawAnswer::Bool(true))
        );
    }
}
