use std::collections::BTreeSet;

use crate::grading::normalizer::{
    self, identification_key, selection_text_key, truthy, NormalizedAnswer,
};
use crate::models::domain::{Question, QuestionType, RawAnswer};

/// Decide correctness of a normalized answer against the question's stored
/// correct-answer definition. Ungradable questions and shape mismatches
/// evaluate to false; this function never fails a submission.
pub fn is_correct(question: &Question, answer: &NormalizedAnswer) -> bool {
    match (question.question_type, answer) {
        (QuestionType::Single, NormalizedAnswer::Selection { id, text_key }) => {
            // The stored correct marker may be a choice id in one code path
            // and a text value in another; match either representation.
            match question.correct_choices().next() {
                Some(choice) => {
                    *id == choice.id
                        || (!text_key.is_empty() && *text_key == selection_text_key(&choice.text))
                }
                None => false,
            }
        }
        (QuestionType::Multi, NormalizedAnswer::SelectionSet { ids, text_keys }) => {
            let correct_ids: BTreeSet<String> =
                question.correct_choices().map(|c| c.id.clone()).collect();
            if correct_ids.is_empty() {
                return false;
            }
            if *ids == correct_ids {
                return true;
            }
            // Partial overlap is simply incorrect, not partial credit.
            let correct_text_keys: BTreeSet<String> = question
                .correct_choices()
                .map(|c| selection_text_key(&c.text))
                .collect();
            *text_keys == correct_text_keys
        }
        (QuestionType::Identification, NormalizedAnswer::Text(text)) => {
            match question.correct_answer.as_deref() {
                Some(correct) => {
                    let correct_key = identification_key(correct);
                    !correct_key.is_empty() && *text == correct_key
                }
                None => false,
            }
        }
        (QuestionType::TrueFalse, NormalizedAnswer::Truth(value)) => {
            match question.correct_answer.as_deref() {
                Some(correct) if !correct.trim().is_empty() => *value == truthy(correct),
                _ => false,
            }
        }
        _ => false,
    }
}

/// Normalize-then-evaluate in one step. Both the ingestion pipeline and the
/// analytics read path go through here.
pub fn grade_answer(question: &Question, raw: &RawAnswer) -> bool {
    is_correct(question, &normalizer::normalize(question.question_type, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Choice;

    fn single_question() -> Question {
        Question::single(
            "q-1",
            "Which organelle produces ATP?",
            vec![
                Choice::new("7", "Mitochondria", true),
                Choice::new("8", "Nucleus", false),
            ],
        )
    }

    fn multi_question() -> Question {
        Question::multi(
            "q-2",
            "Select the prime numbers",
            vec![
                Choice::new("3", "Two", true),
                Choice::new("4", "Four", false),
                Choice::new("5", "Five", true),
            ],
        )
    }

    #[test]
    fn single_matches_correct_choice_id() {
        let question = single_question();
        assert!(grade_answer(&question, &RawAnswer::Int(7)));
        assert!(grade_answer(&question, &RawAnswer::from("7")));
        assert!(!grade_answer(&question, &RawAnswer::Int(8)));
    }

    #[test]
    fn single_falls_back_to_choice_text() {
        let question = single_question();
        assert!(grade_answer(&question, &RawAnswer::from("mitochondria")));
        assert!(grade_answer(&question, &RawAnswer::from("  Mitochondria ")));
        assert!(!grade_answer(&question, &RawAnswer::from("nucleus")));
    }

    #[test]
    fn single_without_correct_choice_is_always_incorrect() {
        let question = Question::single(
            "q-1",
            "Misconfigured",
            vec![Choice::new("1", "Only option", false)],
        );
        assert!(!grade_answer(&question, &RawAnswer::Int(1)));
    }

    #[test]
    fn multi_requires_exact_set_equality() {
        let question = multi_question();

        assert!(grade_answer(
            &question,
            &RawAnswer::List(vec![3.into(), 5.into()])
        ));
        assert!(grade_answer(
            &question,
            &RawAnswer::List(vec![5.into(), 3.into()])
        ));
        // Subset and superset are both incorrect.
        assert!(!grade_answer(&question, &RawAnswer::List(vec![3.into()])));
        assert!(!grade_answer(
            &question,
            &RawAnswer::List(vec![3.into(), 5.into(), 4.into()])
        ));
    }

    #[test]
    fn multi_falls_back_to_choice_texts() {
        let question = multi_question();
        assert!(grade_answer(
            &question,
            &RawAnswer::List(vec!["Two".into(), "five".into()])
        ));
        assert!(!grade_answer(
            &question,
            &RawAnswer::List(vec!["Two".into(), "four".into()])
        ));
    }

    #[test]
    fn multi_without_correct_choices_is_always_incorrect() {
        let question = Question::multi("q-2", "Misconfigured", vec![]);
        assert!(!grade_answer(&question, &RawAnswer::List(vec![])));
        assert!(!grade_answer(&question, &RawAnswer::List(vec![1.into()])));
    }

    #[test]
    fn identification_compares_normalized_text() {
        let question = Question::identification("q-3", "Capital of France?", "Paris");

        assert!(grade_answer(&question, &RawAnswer::from("paris")));
        assert!(grade_answer(&question, &RawAnswer::from("  Paris ")));
        assert!(grade_answer(&question, &RawAnswer::from("PARIS")));
        assert!(!grade_answer(&question, &RawAnswer::from("parris")));
    }

    #[test]
    fn identification_without_correct_answer_is_always_incorrect() {
        let mut question = Question::identification("q-3", "Misconfigured", "");
        assert!(!grade_answer(&question, &RawAnswer::from("")));

        question.correct_answer = None;
        assert!(!grade_answer(&question, &RawAnswer::from("anything")));
    }

    #[test]
    fn true_false_compares_boolean_interpretations() {
        let question = Question::true_false("q-4", "The earth orbits the sun.", "true");

        for raw in [
            RawAnswer::Bool(true),
            RawAnswer::from("true"),
            RawAnswer::from("TRUE"),
            RawAnswer::from("1"),
            RawAnswer::from("yes"),
        ] {
            assert!(grade_answer(&question, &raw), "expected {:?} correct", raw);
        }
        for raw in [
            RawAnswer::Bool(false),
            RawAnswer::from("false"),
            RawAnswer::from("0"),
            RawAnswer::from(""),
        ] {
            assert!(!grade_answer(&question, &raw), "expected {:?} incorrect", raw);
        }
    }

    #[test]
    fn true_false_with_false_correct_answer() {
        let question = Question::true_false("q-4", "The moon is a planet.", "false");
        assert!(grade_answer(&question, &RawAnswer::Bool(false)));
        assert!(grade_answer(&question, &RawAnswer::from("no")));
        assert!(!grade_answer(&question, &RawAnswer::Bool(true)));
    }

    #[test]
    fn mismatched_answer_shape_is_incorrect_not_an_error() {
        let question = single_question();
        // A list submitted for a single-choice question.
        assert!(!grade_answer(
            &question,
            &RawAnswer::List(vec![7.into(), 8.into()])
        ));
    }
}
