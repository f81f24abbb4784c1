use crate::database::question_store::{NewQuestion, QuestionStore};
use crate::error::Result;
use crate::models::question::{Difficulty, MathTopic, Question};
use crate::services::ai_service::QuestionGenerator;
use crate::services::extraction::ResponseExtractor;
use crate::services::prompt::build_question_prompt;
use crate::services::question_validator::parse_generated_question;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct QuestionService {
    store: QuestionStore,
    generator: Arc<dyn QuestionGenerator>,
    extractor: Arc<dyn ResponseExtractor>,
}

impl QuestionService {
    pub fn new(
        store: QuestionStore,
        generator: Arc<dyn QuestionGenerator>,
        extractor: Arc<dyn ResponseExtractor>,
    ) -> Self {
        Self {
            store,
            generator,
            extractor,
        }
    }

    #[tracing::instrument(skip_all, fields(topic = %topic, difficulty = %difficulty))]
    pub async fn generate_question(
        &self,
        topic: MathTopic,
        difficulty: Difficulty,
    ) -> Result<Question> {
        let prompt = build_question_prompt(topic, difficulty);
        let raw = self.generator.generate_content(&prompt).await?;

        let payload = self.extractor.extract(&raw).map_err(|e| {
            tracing::warn!(error = %e, "Could not extract JSON from model response");
            e
        })?;
        let generated = parse_generated_question(payload).map_err(|e| {
            tracing::warn!(error = %e, "Model response failed validation");
            e
        })?;

        let correct_answer = generated.correct_answer().to_string();
        let created_at = Utc::now();

        let id = self
            .store
            .create_question(NewQuestion {
                topic,
                difficulty,
                question_text: &generated.question,
                correct_answer: &correct_answer,
                options: &generated.options,
                solution_steps: &generated.solution_steps,
                explanation: &generated.explanation,
                created_at,
            })
            .await?;

        tracing::info!(question_id = id, "Question generated");
        Ok(Question {
            id,
            topic,
            difficulty,
            question_text: generated.question,
            correct_answer,
            options: generated.options,
            solution_steps: generated.solution_steps,
            explanation: generated.explanation,
            created_at,
        })
    }
}
