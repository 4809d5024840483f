//! [`Reasoner`] backed by a chat-completions model.

use super::chat_client::{ChatClient, ChatMessage, ChatRequest};
use super::routing::{ModelChoice, ModelRouter};
use agora_application::{Reasoner, ReasonerError};
use agora_domain::{
    AgentProfile, DebatePrompt, Problem, Transcript, UpdateVerdict, parse_update_verdict,
    parse_yes_no,
};
use async_trait::async_trait;
use tracing::debug;

/// Builds debate prompts, routes them to a model by the speaker's rank and
/// parses the structured replies.
pub struct LlmReasoner<C: ChatClient> {
    client: C,
    router: ModelRouter,
    max_rank: u8,
}

impl<C: ChatClient> LlmReasoner<C> {
    pub fn new(client: C, router: ModelRouter, max_rank: u8) -> Self {
        Self {
            client,
            router,
            max_rank,
        }
    }

    async fn ask_as(
        &self,
        speaker: &AgentProfile,
        user_prompt: String,
    ) -> Result<String, ReasonerError> {
        let rank = speaker.rank.value();
        let system = DebatePrompt::agent_system(rank, self.max_rank);
        self.send(self.router.for_rank(rank), system, user_prompt)
            .await
    }

    /// Ask the judge model a yes/no question. Unparseable output is `false`.
    async fn judge(&self, what: &str, user_prompt: String) -> Result<bool, ReasonerError> {
        let text = self
            .send(
                self.router.judge(),
                DebatePrompt::judge_system().to_string(),
                user_prompt,
            )
            .await?;
        match parse_yes_no(&text) {
            Some(verdict) => Ok(verdict),
            None => {
                debug!("Unparseable {} judgment, treating as no: {}", what, text);
                Ok(false)
            }
        }
    }

    async fn send(
        &self,
        choice: &ModelChoice,
        system: String,
        user_prompt: String,
    ) -> Result<String, ReasonerError> {
        let request = ChatRequest {
            model: choice.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user_prompt)],
            temperature: choice.temperature,
        };
        self.client.complete(&request).await
    }
}

#[async_trait]
impl<C: ChatClient> Reasoner for LlmReasoner<C> {
    async fn solve(
        &self,
        speaker: &AgentProfile,
        problem: &Problem,
    ) -> Result<String, ReasonerError> {
        self.ask_as(speaker, DebatePrompt::solve(problem.statement()))
            .await
    }

    async fn generate_message(
        &self,
        speaker: &AgentProfile,
        problem: &Problem,
        own_answer: &str,
        other_answer: &str,
        history: &Transcript,
    ) -> Result<String, ReasonerError> {
        let prompt = DebatePrompt::message(
            problem.statement(),
            own_answer,
            other_answer,
            &history.render(),
        );
        self.ask_as(speaker, prompt).await
    }

    async fn generate_reply(
        &self,
        speaker: &AgentProfile,
        problem: &Problem,
        own_answer: &str,
        other_answer: &str,
        incoming: &str,
        history: &Transcript,
    ) -> Result<String, ReasonerError> {
        let prompt = DebatePrompt::reply(
            problem.statement(),
            own_answer,
            other_answer,
            incoming,
            &history.render(),
        );
        self.ask_as(speaker, prompt).await
    }

    async fn evaluate_update(
        &self,
        speaker: &AgentProfile,
        problem: &Problem,
        current_answer: &str,
        history: &Transcript,
    ) -> Result<UpdateVerdict, ReasonerError> {
        let prompt = DebatePrompt::update(problem.statement(), current_answer, &history.render());
        let text = self.ask_as(speaker, prompt).await?;
        Ok(parse_update_verdict(&text)?)
    }

    async fn compare_equivalence(
        &self,
        answer_a: &str,
        answer_b: &str,
    ) -> Result<bool, ReasonerError> {
        self.judge("equivalence", DebatePrompt::equivalence(answer_a, answer_b))
            .await
    }

    async fn assess_correctness(
        &self,
        agent_answer: &str,
        reference_answer: &str,
    ) -> Result<bool, ReasonerError> {
        self.judge(
            "correctness",
            DebatePrompt::correctness(agent_answer, reference_answer),
        )
        .await
    }
}
