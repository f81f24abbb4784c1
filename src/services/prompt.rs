use crate::models::question::{Difficulty, MathTopic};

/// Instruction for a multiple-choice question, with a worked example of the JSON shape the
/// extractor and validator expect back.
pub fn build_question_prompt(topic: MathTopic, difficulty: Difficulty) -> String {
    format!(
        r#"Create a {difficulty} level {topic} question with multiple choice options.
Format your response exactly like this example:
{{
    "question": "Solve for x: 4x + 6 = 26",
    "options": [
        {{"text": "x = 5", "is_correct": true}},
        {{"text": "x = 4", "is_correct": false}},
        {{"text": "x = 6", "is_correct": false}},
        {{"text": "x = 7", "is_correct": false}}
    ],
    "solution_steps": [
        "1. Subtract 6 from both sides: 4x = 20",
        "2. Divide both sides by 4: x = 5"
    ],
    "explanation": "This is a linear equation. We isolate x by first moving all non-x terms to the right side, then dividing both sides by the coefficient of x."
}}
Exactly one option must have "is_correct": true and every option text must be different."#,
        difficulty = difficulty.as_str(),
        topic = topic.as_str(),
    )
}

pub fn build_practice_prompt(topic: MathTopic, difficulty: Difficulty) -> String {
    format!(
        r#"Create a {difficulty} level {topic} question.
Format your response exactly like this example:
{{
    "question": "Solve for x: 4x + 6 = 26",
    "answer": "x = 5",
    "solution_steps": [
        "1. Subtract 6 from both sides: 4x = 20",
        "2. Divide both sides by 4: x = 5"
    ]
}}"#,
        difficulty = difficulty.as_str(),
        topic = topic.as_str(),
    )
}
