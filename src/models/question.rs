use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MathTopic {
    Algebra,
    Geometry,
    Trigonometry,
    Calculus,
    Statistics,
}

impl MathTopic {
    pub const ALL: [MathTopic; 5] = [
        MathTopic::Algebra,
        MathTopic::Geometry,
        MathTopic::Trigonometry,
        MathTopic::Calculus,
        MathTopic::Statistics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MathTopic::Algebra => "algebra",
            MathTopic::Geometry => "geometry",
            MathTopic::Trigonometry => "trigonometry",
            MathTopic::Calculus => "calculus",
            MathTopic::Statistics => "statistics",
        }
    }
}

impl fmt::Display for MathTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MathTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MathTopic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown topic '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown difficulty '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub solution_steps: Vec<String>,
    pub explanation: String,
}

impl GeneratedQuestion {
    /// Text of the option flagged as correct; empty only for a question that never passed
    /// validation.
    pub fn correct_answer(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.is_correct)
            .map_or("", |o| o.text.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: i64,
    pub topic: MathTopic,
    pub difficulty: Difficulty,
    pub question_text: String,
    pub correct_answer: String,
    pub options: Vec<AnswerOption>,
    pub solution_steps: Vec<String>,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
}

/// The part of a stored question the grader needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerKey {
    pub correct_answer: String,
    pub solution_steps: Vec<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PracticeQuestion {
    pub question: String,
    pub answer: String,
    pub solution_steps: Vec<String>,
}
