//! Task-specific helpers that pair a prompt from the library with the right
//! model, instruction, and temperature.

use catalog_adapters::{CompletionClient, CompletionError, CompletionOptions};
use catalog_config::InstructionContext;
use catalog_primitives::Complexity;
use catalog_prompts::TemplateError;
use catalog_prompts::library;
use thiserror::Error;

const GRADING_TEMPERATURE: f32 = 0.5;
const REVIEW_TEMPERATURE: f32 = 0.3;

/// Errors returned by the agents.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The prompt could not be rendered.
    #[error(transparent)]
    Prompt(#[from] TemplateError),
    /// The completion failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Result alias for agent calls.
pub type AgentResult<T> = Result<T, AgentError>;

/// What a student wants explained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TutorRequest {
    /// Topic to explain.
    pub topic: String,
    /// Student level.
    pub level: Complexity,
    /// Optional extra context.
    pub context: Option<String>,
}

impl TutorRequest {
    /// Creates a request at intermediate level without extra context.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            level: Complexity::Intermediate,
            context: None,
        }
    }
}

/// Explains topics and answers questions using the fast model.
#[derive(Clone, Debug)]
pub struct TutorAgent {
    client: CompletionClient,
}

impl TutorAgent {
    /// Creates a tutor backed by `client`.
    #[must_use]
    pub const fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    fn options(&self) -> CompletionOptions {
        let settings = self.client.settings();
        CompletionOptions::new()
            .with_model(settings.models().flash())
            .with_system_instruction(settings.system_instructions().get(InstructionContext::ExamPrep))
    }

    /// Explains a topic at the student's level.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] if rendering or the completion fails.
    pub async fn explain(&self, request: &TutorRequest) -> AgentResult<String> {
        let prompt =
            library::tutor_explanation(&request.topic, request.level, request.context.as_deref())?;
        Ok(self.client.complete(&prompt, &self.options()).await?)
    }

    /// Answers a specific question.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] if rendering or the completion fails.
    pub async fn answer_question(&self, question: &str) -> AgentResult<String> {
        let prompt = library::question_answer(question)?;
        Ok(self.client.complete(&prompt, &self.options()).await?)
    }
}

/// An essay to grade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EssayEvaluationRequest {
    /// Essay topic.
    pub topic: String,
    /// Essay text.
    pub essay_text: String,
    /// Grading criteria; empty uses the default rubric.
    pub rubric: Vec<String>,
}

/// Grades essays and reviews legal documents using the reasoning model.
#[derive(Clone, Debug)]
pub struct EvaluatorAgent {
    client: CompletionClient,
}

impl EvaluatorAgent {
    /// Creates an evaluator backed by `client`.
    #[must_use]
    pub const fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    fn options(&self, context: InstructionContext, temperature: f32) -> CompletionOptions {
        let settings = self.client.settings();
        CompletionOptions::new()
            .with_model(settings.models().pro())
            .with_system_instruction(settings.system_instructions().get(context))
            .with_temperature(temperature)
    }

    /// Grades an essay against the rubric.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] if rendering or the completion fails.
    pub async fn evaluate_essay(&self, request: &EssayEvaluationRequest) -> AgentResult<String> {
        let prompt = library::essay_evaluation(&request.topic, &request.essay_text, &request.rubric)?;
        let options = self.options(InstructionContext::ExamPrep, GRADING_TEMPERATURE);
        Ok(self.client.complete(&prompt, &options).await?)
    }

    /// Reviews a legal document of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] if rendering or the completion fails.
    pub async fn review_legal_document(
        &self,
        document: &str,
        document_kind: &str,
    ) -> AgentResult<String> {
        let prompt = library::legal_review(document, document_kind)?;
        let options = self.options(InstructionContext::Legal, REVIEW_TEMPERATURE);
        Ok(self.client.complete(&prompt, &options).await?)
    }
}
