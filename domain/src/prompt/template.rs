//! Prompt templates for the debate flow

/// Templates for generating prompts at each debate step
pub struct DebatePrompt;

impl DebatePrompt {
    /// System prompt for a debating agent
    pub fn agent_system(rank: u8, max_rank: u8) -> String {
        format!(
            r#"You are a careful problem solver with proficiency level {} out of {}.
You are one of several agents working toward a shared, correct answer.
Show your reasoning briefly and always state a single final answer."#,
            rank, max_rank
        )
    }

    /// System prompt for impartial judgments (equivalence, correctness)
    pub fn judge_system() -> &'static str {
        r#"You are an impartial grader of mathematical answers.
Two answers are equivalent when they denote the same value, regardless of form
(for example 0.5, 1/2 and 50% are the same value).
Reply with YES or NO on the first line, nothing else is required."#
    }

    /// User prompt for the initial solve
    pub fn solve(problem: &str) -> String {
        format!(
            r#"Solve the following problem and provide the final answer:

{}"#,
            problem
        )
    }

    /// User prompt for opening a debate round
    pub fn message(problem: &str, own_answer: &str, other_answer: &str, history: &str) -> String {
        format!(
            r#"We are debating to solve the following problem:

{}

My solution:
{}

Your solution:
{}

Discussion so far:
{}

Discuss the differences between the two solutions. Point out any errors and give corrected steps where needed."#,
            problem, own_answer, other_answer, history
        )
    }

    /// User prompt for replying within a round
    pub fn reply(
        problem: &str,
        own_answer: &str,
        other_answer: &str,
        incoming: &str,
        history: &str,
    ) -> String {
        format!(
            r#"We are debating to solve the following problem:

{}

My solution:
{}

Your solution:
{}

Discussion so far:
{}

Your debate partner just said:
{}

Respond to their argument. Concede points that are correct and challenge points that are wrong."#,
            problem, own_answer, other_answer, history, incoming
        )
    }

    /// User prompt for the update evaluation (structured JSON output)
    pub fn update(problem: &str, current_answer: &str, history: &str) -> String {
        format!(
            r#"Problem:
{}

Your current answer:
{}

Debate transcript:
{}

Decide whether the debate should change your answer. Only report a change if the new
answer is NOT mathematically equivalent to your current one.

Respond with JSON only, in exactly this shape:
{{"changed": <true|false>, "new_answer": "<answer or empty>", "confidence": <0-100>, "reasoning": "<one sentence>"}}"#,
            problem, current_answer, history
        )
    }

    /// User prompt for the equivalence judgment
    pub fn equivalence(answer_a: &str, answer_b: &str) -> String {
        format!(
            r#"Solution 1:
{}

Solution 2:
{}

Do these solutions reach the same final answer? Answer YES or NO."#,
            answer_a, answer_b
        )
    }

    /// User prompt for the correctness judgment
    pub fn correctness(agent_answer: &str, reference_answer: &str) -> String {
        format!(
            r#"Reference answer:
{}

Candidate answer:
{}

Does the candidate reach the same final answer as the reference? Answer YES or NO."#,
            reference_answer, agent_answer
        )
    }
}
