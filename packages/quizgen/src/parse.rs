//! Strict decoding of model replies into typed question shapes.
//!
//! Models are instructed to wrap their JSON in `<output>` tags, but
//! replies drift: missing tags, extra prose, mixed-case keys. The
//! extractor tolerates the wrapper being absent and key casing being
//! wrong; everything else about the shape is validated strictly and
//! rejected with the offending payload preserved for diagnostics.

use serde_json::Value;

use crate::error::{QuizError, Result};
use crate::question::{
    GeneratedQuestion, MultipleChoiceQuestion, OptionLetter, QuestionType,
    SingleChoiceQuestion, TrueOrFalseQuestion,
};

/// Cut the payload out of a model reply.
///
/// Takes the text between the first `<output>` and the first
/// `</output>` after it. A reply without the wrapper is used whole;
/// an unterminated wrapper is used to the end of the reply.
fn extract_payload(reply: &str) -> &str {
    let after_open = match reply.find("<output>") {
        Some(at) => &reply[at + "<output>".len()..],
        None => reply,
    };
    let payload = match after_open.find("</output>") {
        Some(at) => &after_open[..at],
        None => after_open,
    };
    payload.trim()
}

fn parse_failure(reason: impl Into<String>, payload: &str) -> QuizError {
    QuizError::ParseFailure {
        reason: reason.into(),
        raw: payload.to_string(),
    }
}

/// Decode the payload as a JSON object with lower-cased keys.
fn decode_object(payload: &str) -> Result<serde_json::Map<String, Value>> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| parse_failure(format!("invalid json: {e}"), payload))?;
    let object = match value {
        Value::Object(map) => map,
        _ => return Err(parse_failure("payload is not a json object", payload)),
    };
    Ok(object
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect())
}

fn question_text(
    object: &serde_json::Map<String, Value>,
    payload: &str,
) -> Result<String> {
    object
        .get("question")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| parse_failure("missing or non-string \"question\"", payload))
}

/// The four answer texts, in option order.
fn answer_texts(
    object: &serde_json::Map<String, Value>,
    payload: &str,
) -> Result<Vec<String>> {
    let answers = object
        .get("answers")
        .and_then(Value::as_array)
        .ok_or_else(|| parse_failure("missing or non-array \"answers\"", payload))?;
    if answers.len() != 4 {
        return Err(parse_failure(
            format!("expected 4 answers, got {}", answers.len()),
            payload,
        ));
    }
    answers
        .iter()
        .map(|a| {
            a.as_str()
                .map(str::to_string)
                .ok_or_else(|| parse_failure("non-string answer", payload))
        })
        .collect()
}

fn solution_letter(value: &Value, payload: &str) -> Result<OptionLetter> {
    value
        .as_str()
        .and_then(OptionLetter::parse)
        .ok_or_else(|| {
            parse_failure(format!("solution {value} is not one of A-D"), payload)
        })
}

/// Decode a model reply into the requested question shape.
pub fn parse_reply(
    reply: &str,
    question_type: QuestionType,
) -> Result<GeneratedQuestion> {
    let payload = extract_payload(reply);
    let object = decode_object(payload)?;
    let question = question_text(&object, payload)?;
    let solution = object
        .get("solution")
        .ok_or_else(|| parse_failure("missing \"solution\"", payload))?;

    match question_type {
        QuestionType::TrueOrFalse => {
            let correct_option = solution.as_bool().ok_or_else(|| {
                parse_failure("solution is not a boolean", payload)
            })?;
            Ok(GeneratedQuestion::TrueOrFalse(TrueOrFalseQuestion {
                question,
                correct_option,
            }))
        }
        QuestionType::SingleChoice => {
            let options = answer_texts(&object, payload)?;
            let correct_option = solution_letter(solution, payload)?;
            Ok(GeneratedQuestion::SingleChoice(SingleChoiceQuestion {
                question,
                options,
                correct_option,
            }))
        }
        QuestionType::MultipleChoice => {
            let options = answer_texts(&object, payload)?;
            let letters = solution.as_array().ok_or_else(|| {
                parse_failure("solution is not an array of letters", payload)
            })?;
            if letters.is_empty() {
                return Err(parse_failure("solution set is empty", payload));
            }
            let mut correct_options = Vec::with_capacity(letters.len());
            for letter in letters {
                let parsed = solution_letter(letter, payload)?;
                if correct_options.contains(&parsed) {
                    return Err(parse_failure(
                        format!("duplicate solution letter {}", parsed.as_str()),
                        payload,
                    ));
                }
                correct_options.push(parsed);
            }
            Ok(GeneratedQuestion::MultipleChoice(MultipleChoiceQuestion {
                question,
                options,
                correct_options,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_between_output_tags() {
        let reply = "Sure, here you go: <output>{\"a\":1}</output> hope that helps";
        assert_eq!(extract_payload(reply), "{\"a\":1}");
    }

    #[test]
    fn test_uses_whole_reply_without_tags() {
        assert_eq!(extract_payload("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn test_unterminated_wrapper_runs_to_the_end() {
        assert_eq!(extract_payload("<output>{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_stops_at_first_closing_tag() {
        let reply = "<output>{\"a\":1}</output><output>{\"a\":2}</output>";
        assert_eq!(extract_payload(reply), "{\"a\":1}");
    }

    #[test]
    fn test_parses_true_or_false() {
        let reply = r#"<output>{"question":"The sky is green.","solution":false}</output>"#;
        let parsed = parse_reply(reply, QuestionType::TrueOrFalse).unwrap();
        match parsed {
            GeneratedQuestion::TrueOrFalse(q) => {
                assert_eq!(q.question, "The sky is green.");
                assert!(!q.correct_option);
            }
            other => panic!("wrong shape: {other:?}"),
        }
    }

    #[test]
    fn test_mixed_case_keys_are_accepted() {
        let reply = r#"{"Question":"Q","Solution":true}"#;
        let parsed = parse_reply(reply, QuestionType::TrueOrFalse).unwrap();
        assert!(matches!(
            parsed,
            GeneratedQuestion::TrueOrFalse(TrueOrFalseQuestion {
                correct_option: true,
                ..
            })
        ));
    }

    #[test]
    fn test_parses_single_choice() {
        let reply = r#"{
            "question": "Q",
            "answers": ["w", "x", "y", "z"],
            "solution": "b"
        }"#;
        let parsed = parse_reply(reply, QuestionType::SingleChoice).unwrap();
        match parsed {
            GeneratedQuestion::SingleChoice(q) => {
                assert_eq!(q.options, vec!["w", "x", "y", "z"]);
                assert_eq!(q.correct_option, OptionLetter::B);
            }
            other => panic!("wrong shape: {other:?}"),
        }
    }

    #[test]
    fn test_parses_multiple_choice() {
        let reply = r#"{
            "question": "Q",
            "answers": ["w", "x", "y", "z"],
            "solution": ["A", "C", "D"]
        }"#;
        let parsed = parse_reply(reply, QuestionType::MultipleChoice).unwrap();
        match parsed {
            GeneratedQuestion::MultipleChoice(q) => {
                assert_eq!(
                    q.correct_options,
                    vec![OptionLetter::A, OptionLetter::C, OptionLetter::D]
                );
            }
            other => panic!("wrong shape: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = parse_reply("not json at all", QuestionType::TrueOrFalse)
            .unwrap_err();
        match err {
            QuizError::ParseFailure { reason, raw } => {
                assert!(reason.contains("invalid json"));
                assert_eq!(raw, "not json at all");
            }
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_boolean_solution_for_true_or_false() {
        let reply = r#"{"question":"Q","solution":"true"}"#;
        let err = parse_reply(reply, QuestionType::TrueOrFalse).unwrap_err();
        assert!(matches!(err, QuizError::ParseFailure { .. }));
    }

    #[test]
    fn test_rejects_wrong_answer_count() {
        let reply = r#"{"question":"Q","answers":["w","x","y"],"solution":"A"}"#;
        let err = parse_reply(reply, QuestionType::SingleChoice).unwrap_err();
        match err {
            QuizError::ParseFailure { reason, .. } => {
                assert!(reason.contains("expected 4 answers"));
            }
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_out_of_range_letter() {
        let reply = r#"{"question":"Q","answers":["w","x","y","z"],"solution":"E"}"#;
        let err = parse_reply(reply, QuestionType::SingleChoice).unwrap_err();
        assert!(matches!(err, QuizError::ParseFailure { .. }));
    }

    #[test]
    fn test_rejects_empty_solution_set() {
        let reply = r#"{"question":"Q","answers":["w","x","y","z"],"solution":[]}"#;
        let err = parse_reply(reply, QuestionType::MultipleChoice).unwrap_err();
        match err {
            QuizError::ParseFailure { reason, .. } => {
                assert!(reason.contains("empty"));
            }
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_duplicate_solution_letters() {
        let reply =
            r#"{"question":"Q","answers":["w","x","y","z"],"solution":["A","A"]}"#;
        let err = parse_reply(reply, QuestionType::MultipleChoice).unwrap_err();
        match err {
            QuizError::ParseFailure { reason, .. } => {
                assert!(reason.contains("duplicate"));
            }
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }
}
