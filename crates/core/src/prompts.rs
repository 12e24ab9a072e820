//! Prompt builders.
//!
//! Everything the engine ever says to the model is assembled here, along with
//! the fixed texts used when the model cannot be reached. The rest of the
//! crate treats these as opaque functions returning text.

use crate::catalog::Position;
use crate::evaluation::EvaluationTone;
use crate::session::Turn;

/// Closing line used when answer analysis falls back.
pub const NEUTRAL_CLOSING: &str = "Understood, thank you. Let's move on to the next topic.";

/// Feedback line used when answer analysis falls back.
pub const NEUTRAL_FEEDBACK: &str = "You answered with care and sincerity.";

/// Fixed final report used when no answers were recorded at all. Returned
/// without consulting the model.
pub const INSUFFICIENT_DATA_EVALUATION: &str = "\
[Final evaluation]

There is not enough recorded material to evaluate this interview.

1. Why no evaluation could be made
- No answers were recorded for the questions asked
- There is not enough information to judge technical ability

2. Suggestions
- Prepare for the technical interview and try again
- Build up fundamental knowledge and hands-on experience before a retake

3. Keep in mind
- Even for unfamiliar questions, explaining your own reasoning matters
- An imperfect answer beats no answer";

/// Fixed final report used when the model cannot be reached at all.
pub const EVALUATION_UNAVAILABLE: &str =
    "The final evaluation could not be generated. Please try again later.";

/// Formats a conversation the way every prompt embeds it: one line per turn,
/// labelled by speaker.
pub fn format_history<'a, I>(turns: I) -> String
where
    I: IntoIterator<Item = &'a Turn>,
{
    turns
        .into_iter()
        .map(|turn| format!("{}: {}", speaker_label(turn), turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn speaker_label(turn: &Turn) -> &'static str {
    match turn.role {
        crate::session::TurnRole::Interviewer => "Interviewer",
        crate::session::TurnRole::Candidate => "Candidate",
    }
}

/// First question for a freshly started topic.
pub fn opening_question(position: Position, topic: &str) -> String {
    format!(
        "You are a technical interviewer for a {position} developer role.\n\
         You are about to open the topic '{topic}'.\n\
         \n\
         Write the first question, satisfying all of the following:\n\
         1. Difficulty appropriate for a junior developer\n\
         2. Checks core concepts while leaving room to probe real-world experience\n\
         3. Open-ended, so it can grow into follow-up questions\n\
         4. Phrased naturally, the way an interviewer actually speaks\n\
         \n\
         Reply with the question only, asked in the interviewer's own voice."
    )
}

/// Fallback first question when the model is unavailable.
pub fn fallback_opening_question(topic: &str) -> String {
    format!("Could you walk me through {topic}?")
}

/// A different question on the same topic, replacing the conversation so far.
pub fn refresh_question(position: Position, topic: &str, history: &str) -> String {
    format!(
        "You are a technical interviewer for a {position} developer role.\n\
         You want to ask a different question about '{topic}'.\n\
         \n\
         Conditions:\n\
         1. Difficulty appropriate for a junior developer\n\
         2. A new angle that does not repeat the earlier questions\n\
         3. Suitable for probing hands-on experience\n\
         4. Natural, conversational phrasing\n\
         \n\
         Earlier questions:\n\
         {history}\n\
         \n\
         Ask exactly one question, naturally, as the interviewer."
    )
}

/// Fallback refresh question when the model is unavailable.
pub fn fallback_refresh_question(topic: &str) -> String {
    format!("Let's look at {topic} from another angle. How would you approach it in practice?")
}

/// Analysis prompt for a candidate answer. The reply must follow the
/// four-line shape the classifier parses: action, score, response, feedback.
pub fn analyze_answer(position: Position, topic: &str, history: &str, answer: &str) -> String {
    format!(
        "You are a technical interviewer for a {position} developer role.\n\
         Current topic: {topic}\n\
         Conversation so far:\n\
         {history}\n\
         \n\
         Candidate's answer: {answer}\n\
         \n\
         Analyze the answer and decide the next action.\n\
         \n\
         Guidance:\n\
         1. If the answer is clear and strong:\n\
            - Ask a deeper follow-up question\n\
            - Or ask for a concrete example or real experience\n\
         2. If the answer is vague or incomplete:\n\
            - Offer a hint or some guidance once, giving the candidate a chance\n\
            - If they still struggle, steer towards a different angle\n\
         3. If the answer is wrong or the candidate does not know:\n\
            - Do not dig deeper; wrap the topic up gently\n\
            - Close with positive feedback and move towards the next topic\n\
         \n\
         Reply in exactly this format:\n\
         Action: (FOLLOW_UP/HINT/CONCLUDE)\n\
         Score: (1-5)\n\
         Response: (the interviewer's natural next utterance)\n\
         Feedback: (one short remark on this answer)"
    )
}

/// Transition line used when the depth or weak-answer rule forces a topic to
/// close. Folds in whatever feedback the analysis produced.
pub fn conclude_transition(feedback: &str) -> String {
    let feedback = feedback.trim();
    if feedback.is_empty() {
        "I see, thank you. Let's move on to the next topic.".to_string()
    } else {
        format!("I see, thank you. {feedback} Let's move on to the next topic.")
    }
}

/// Detailed per-topic feedback request. The reply must use the four labelled
/// sections the feedback parser understands.
pub fn topic_feedback(position: Position, topic: &str, history: &str) -> String {
    format!(
        "As a technical interviewer for a {position} developer role, write detailed\n\
         feedback on the following conversation.\n\
         \n\
         Topic: {topic}\n\
         \n\
         Conversation:\n\
         {history}\n\
         \n\
         Write the feedback in exactly this format:\n\
         \n\
         Understanding:\n\
         - overall grasp of the concepts and ability to apply them\n\
         \n\
         Strengths:\n\
         - (2-3 concrete strengths with examples)\n\
         \n\
         Improvements:\n\
         - (2-3 concrete gaps with examples)\n\
         \n\
         Suggestions:\n\
         - (specific study directions for the gaps)\n\
         \n\
         Keep the tone positive and constructive, focus on how to improve rather\n\
         than what went wrong, and keep the suggestions realistic for the\n\
         candidate's current level."
    )
}

/// Final whole-interview evaluation request. The tone decides between a
/// celebratory and a balanced framing.
pub fn final_evaluation(
    position: Position,
    completed_topics: &[String],
    history: &str,
    tone: EvaluationTone,
) -> String {
    let topics_text = if completed_topics.is_empty() {
        "none".to_string()
    } else {
        completed_topics.join(", ")
    };
    let tone_text = match tone {
        EvaluationTone::Celebratory => {
            "The candidate performed strongly across most topics. Open with what went\n\
             well, acknowledge the strong performance explicitly, then cover the\n\
             remaining growth areas."
        }
        EvaluationTone::Balanced => {
            "Weigh strengths and gaps evenly. Be encouraging but do not overstate\n\
             what the answers actually showed."
        }
    };
    format!(
        "You are a technical interviewer for a {position} developer role.\n\
         Evaluate the candidate based only on the actual conversation below.\n\
         \n\
         Topics covered: {topics_text}\n\
         \n\
         Rules:\n\
         1. Judge only what was actually said\n\
         2. Point out clearly where answers were missing or thin\n\
         3. Name demonstrated strengths concretely\n\
         4. Base every improvement point on an actual answer\n\
         5. Neither overrate nor underrate\n\
         \n\
         {tone_text}\n\
         \n\
         Conversation:\n\
         {history}"
    )
}
