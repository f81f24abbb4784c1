use crate::database::question_store::{NewPracticeAttempt, QuestionStore};
use crate::error::Result;
use crate::models::question::{Difficulty, MathTopic, PracticeQuestion};
use crate::services::ai_service::QuestionGenerator;
use crate::services::extraction::ResponseExtractor;
use crate::services::grading_service::AnswerMatch;
use crate::services::prompt::build_practice_prompt;
use crate::services::question_validator::parse_practice_question;
use chrono::Utc;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const MAX_GENERATION_FAILURES: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PracticeSummary {
    pub questions_answered: u32,
    pub correct_answers: u32,
}

#[derive(Clone)]
pub struct PracticeService {
    store: QuestionStore,
    generator: Arc<dyn QuestionGenerator>,
    extractor: Arc<dyn ResponseExtractor>,
    topic: MathTopic,
    difficulty: Difficulty,
}

impl PracticeService {
    pub fn new(
        store: QuestionStore,
        generator: Arc<dyn QuestionGenerator>,
        extractor: Arc<dyn ResponseExtractor>,
        topic: MathTopic,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            store,
            generator,
            extractor,
            topic,
            difficulty,
        }
    }

    pub async fn next_question(&self) -> Result<PracticeQuestion> {
        let prompt = build_practice_prompt(self.topic, self.difficulty);
        let raw = self.generator.generate_content(&prompt).await?;
        let payload = self.extractor.extract(&raw)?;
        parse_practice_question(payload)
    }

    pub async fn record_answer(&self, question: &PracticeQuestion, answer: &str) -> Result<bool> {
        let is_correct = AnswerMatch::Normalized.matches(answer, &question.answer);
        self.store
            .record_practice_attempt(NewPracticeAttempt {
                question_text: &question.question,
                student_answer: answer,
                correct_answer: &question.answer,
                is_correct,
                attempt_date: Utc::now(),
            })
            .await?;
        Ok(is_correct)
    }

    pub async fn run<R, W>(&self, input: R, output: W) -> Result<PracticeSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut term = Terminal { input, output };
        let mut summary = PracticeSummary::default();
        let mut failures = 0;

        term.say("\n=== Welcome to Interactive Math Tutor ===\n").await?;

        loop {
            let question = match self.next_question().await {
                Ok(question) => {
                    failures = 0;
                    question
                }
                Err(e) => {
                    failures += 1;
                    tracing::warn!(error = %e, failures, "Practice question generation failed");
                    term.say("Error generating question. Please try again.").await?;
                    if failures >= MAX_GENERATION_FAILURES {
                        term.say("The question service is unavailable right now. Goodbye!")
                            .await?;
                        break;
                    }
                    continue;
                }
            };

            term.say(&format!("\nQuestion: {}", question.question)).await?;

            let Some(mut answer) = term
                .ask("\nYour answer (or 'hint' for a hint, 'quit' to exit): ")
                .await?
            else {
                break;
            };

            if answer.eq_ignore_ascii_case("quit") {
                term.say("\nThanks for practicing! Goodbye!").await?;
                break;
            }

            if answer.eq_ignore_ascii_case("hint") {
                let hint = question
                    .solution_steps
                    .first()
                    .map(String::as_str)
                    .unwrap_or("No hint available for this question.");
                term.say(&format!("\nHint: {}", hint)).await?;
                match term.ask("\nYour answer: ").await? {
                    Some(next) => answer = next,
                    None => break,
                }
            }

            let is_correct = self.record_answer(&question, &answer).await?;
            summary.questions_answered += 1;
            if is_correct {
                summary.correct_answers += 1;
                term.say("\nCorrect! Well done!").await?;
            } else {
                term.say("\nNot quite right. Here's how to solve it:").await?;
                for step in &question.solution_steps {
                    term.say(step).await?;
                }
                term.say(&format!("The answer is: {}", question.answer)).await?;
            }

            let again = term
                .ask("\nWould you like another question? (yes/no): ")
                .await?;
            if !again.map_or(false, |a| a.eq_ignore_ascii_case("yes")) {
                term.say("\nThanks for practicing! Goodbye!").await?;
                break;
            }
        }

        tracing::info!(
            answered = summary.questions_answered,
            correct = summary.correct_answers,
            "Practice session finished"
        );
        Ok(summary)
    }
}

struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn say(&mut self, line: &str) -> Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    /// `None` at end of input.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
