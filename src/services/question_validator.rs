use crate::error::{Error, Result};
use crate::models::question::{GeneratedQuestion, PracticeQuestion};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

const REQUIRED_FIELDS: [&str; 4] = ["question", "options", "solution_steps", "explanation"];

/// Structural check on a parsed model payload: the four required fields, at least two
/// options that each carry `text` and `is_correct`, and exactly one correct option.
pub fn validate_question_response(data: &JsonValue) -> bool {
    if !REQUIRED_FIELDS.iter().all(|field| data.get(field).is_some()) {
        return false;
    }

    let options = match data["options"].as_array() {
        Some(options) if options.len() >= 2 => options,
        _ => return false,
    };

    let well_formed = options.iter().all(|opt| {
        opt.get("text").map_or(false, JsonValue::is_string)
            && opt.get("is_correct").map_or(false, JsonValue::is_boolean)
    });
    if !well_formed {
        return false;
    }

    let correct = options
        .iter()
        .filter(|opt| opt["is_correct"].as_bool() == Some(true))
        .count();
    correct == 1
}

pub fn parse_generated_question(data: JsonValue) -> Result<GeneratedQuestion> {
    if !validate_question_response(&data) {
        return Err(Error::InvalidQuestionFormat(
            "expected question, options (at least two, exactly one correct), solution_steps and explanation"
                .to_string(),
        ));
    }

    let question: GeneratedQuestion = serde_json::from_value(data)
        .map_err(|e| Error::InvalidQuestionFormat(e.to_string()))?;

    if question.question.trim().is_empty() {
        return Err(Error::InvalidQuestionFormat(
            "question text is empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = question
        .options
        .iter()
        .find(|opt| !seen.insert(opt.text.as_str()))
    {
        return Err(Error::InvalidQuestionFormat(format!(
            "duplicate option text '{}'",
            dup.text
        )));
    }

    debug_assert_eq!(question.options.iter().filter(|o| o.is_correct).count(), 1);
    Ok(question)
}

pub fn parse_practice_question(data: JsonValue) -> Result<PracticeQuestion> {
    let question: PracticeQuestion = serde_json::from_value(data)
        .map_err(|e| Error::InvalidQuestionFormat(e.to_string()))?;

    if question.question.trim().is_empty() || question.answer.trim().is_empty() {
        return Err(Error::InvalidQuestionFormat(
            "question and answer must not be empty".to_string(),
        ));
    }
    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> JsonValue {
        json!({
            "question": "Solve for x: 4x + 6 = 26",
            "options": [
                {"text": "x = 5", "is_correct": true},
                {"text": "x = 4", "is_correct": false},
                {"text": "x = 6", "is_correct": false}
            ],
            "solution_steps": ["Subtract 6: 4x = 20", "Divide by 4: x = 5"],
            "explanation": "Linear equation."
        })
    }

    #[test]
    fn accepts_well_formed_payload() {
        assert!(validate_question_response(&payload()));
        let question = parse_generated_question(payload()).unwrap();
        assert_eq!(question.correct_answer(), "x = 5");
        assert_eq!(question.solution_steps.len(), 2);
    }

    #[test]
    fn rejects_missing_fields() {
        for field in REQUIRED_FIELDS {
            let mut data = payload();
            data.as_object_mut().unwrap().remove(field);
            assert!(!validate_question_response(&data), "missing {}", field);
        }
    }

    #[test]
    fn rejects_wrong_number_of_correct_options() {
        let mut two = payload();
        two["options"][1]["is_correct"] = json!(true);
        assert!(!validate_question_response(&two));

        let mut none = payload();
        none["options"][0]["is_correct"] = json!(false);
        assert!(!validate_question_response(&none));

        assert!(matches!(
            parse_generated_question(two),
            Err(Error::InvalidQuestionFormat(_))
        ));
    }

    #[test]
    fn rejects_too_few_or_malformed_options() {
        let mut single = payload();
        single["options"] = json!([{"text": "x = 5", "is_correct": true}]);
        assert!(!validate_question_response(&single));

        let mut not_a_list = payload();
        not_a_list["options"] = json!("x = 5");
        assert!(!validate_question_response(&not_a_list));

        let mut no_text = payload();
        no_text["options"][2] = json!({"is_correct": false});
        assert!(!validate_question_response(&no_text));

        let mut stringly_flag = payload();
        stringly_flag["options"][0]["is_correct"] = json!("true");
        assert!(!validate_question_response(&stringly_flag));
    }

    #[test]
    fn rejects_duplicate_option_texts() {
        let mut data = payload();
        data["options"][2]["text"] = json!("x = 4");
        assert!(validate_question_response(&data));
        let err = parse_generated_question(data).unwrap_err();
        assert!(matches!(err, Error::InvalidQuestionFormat(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn rejects_non_string_solution_steps() {
        let mut data = payload();
        data["solution_steps"] = json!([1, 2]);
        assert!(matches!(
            parse_generated_question(data),
            Err(Error::InvalidQuestionFormat(_))
        ));
    }

    #[test]
    fn practice_payload_requires_answer() {
        let ok = parse_practice_question(json!({
            "question": "2 + 2?",
            "answer": "4",
            "solution_steps": ["Add."]
        }))
        .unwrap();
        assert_eq!(ok.answer, "4");

        assert!(parse_practice_question(json!({"question": "2 + 2?", "solution_steps": []})).is_err());
        assert!(parse_practice_question(json!({
            "question": "2 + 2?",
            "answer": "  ",
            "solution_steps": []
        }))
        .is_err());
    }
}
