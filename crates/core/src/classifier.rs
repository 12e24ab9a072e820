//! Answer classification.
//!
//! Each candidate answer goes to the model together with the topic context
//! and comes back as a small semi-structured block: an action tag, a
//! completion score, the interviewer's next utterance, and a short feedback
//! remark. This module parses that block, substitutes a deterministic
//! fallback whenever the model misbehaves, and applies the depth override
//! that keeps any single topic from running on forever.

use crate::catalog::Position;
use crate::oracle::{CompletionClient, RetryPolicy, complete_with_retry};
use crate::prompts;
use crate::session::{TopicFeedback, Turn, TurnRole};
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// What the interviewer does next with the current topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerAction {
    FollowUp,
    Hint,
    Conclude,
}

impl AnswerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerAction::FollowUp => "follow_up",
            AnswerAction::Hint => "hint",
            AnswerAction::Conclude => "conclude",
        }
    }
}

impl FromStr for AnswerAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FOLLOW_UP" => Ok(AnswerAction::FollowUp),
            "HINT" => Ok(AnswerAction::Hint),
            "CONCLUDE" => Ok(AnswerAction::Conclude),
            other => Err(ParseError::UnknownAction(other.to_string())),
        }
    }
}

/// Parsed decision for one answer. Ephemeral: consumed by the dialogue
/// controller and discarded, only its consequences persist.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerAnalysis {
    pub action: AnswerAction,
    pub completion_score: u8,
    pub next_response: String,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected at least 3 labelled lines, got {0}")]
    TooFewLines(usize),
    #[error("line {0} is missing a ':' separator")]
    MissingSeparator(usize),
    #[error("unknown action tag: '{0}'")]
    UnknownAction(String),
    #[error("score is not an integer: '{0}'")]
    InvalidScore(String),
    #[error("score {0} is outside the 1-5 range")]
    ScoreOutOfRange(i64),
    #[error("feedback section '{0}' is missing or empty")]
    MissingSection(&'static str),
}

/// The text after the first ':' on a line, trimmed. Later colons are kept,
/// so "Response: note: be specific" yields "note: be specific".
fn value_after_colon(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, rest)| rest.trim())
}

/// Parses the four-line analysis block. Blank lines are skipped; the
/// remaining lines are read positionally: action, score, next utterance,
/// optional feedback.
pub fn parse_analysis(raw: &str) -> Result<AnswerAnalysis, ParseError> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 3 {
        return Err(ParseError::TooFewLines(lines.len()));
    }

    let action_raw = value_after_colon(lines[0]).ok_or(ParseError::MissingSeparator(1))?;
    let action = action_raw.parse::<AnswerAction>()?;

    let score_raw = value_after_colon(lines[1]).ok_or(ParseError::MissingSeparator(2))?;
    let score: i64 = score_raw
        .parse()
        .map_err(|_| ParseError::InvalidScore(score_raw.to_string()))?;
    if !(1..=5).contains(&score) {
        return Err(ParseError::ScoreOutOfRange(score));
    }

    let next_response = value_after_colon(lines[2])
        .ok_or(ParseError::MissingSeparator(3))?
        .to_string();

    let feedback = lines
        .get(3)
        .and_then(|line| value_after_colon(line))
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    Ok(AnswerAnalysis {
        action,
        completion_score: score as u8,
        next_response,
        feedback,
    })
}

/// Deterministic stand-in used whenever the model's analysis is unusable:
/// close the topic gently with a neutral score.
pub fn fallback_analysis() -> AnswerAnalysis {
    AnswerAnalysis {
        action: AnswerAction::Conclude,
        completion_score: 3,
        next_response: prompts::NEUTRAL_CLOSING.to_string(),
        feedback: Some(prompts::NEUTRAL_FEEDBACK.to_string()),
    }
}

/// Interviewer-turn count at which a topic is always closed.
pub const MAX_TOPIC_DEPTH: usize = 3;

/// Scores at or below this, after at least one question, close the topic.
pub const WEAK_SCORE_CUTOFF: u8 = 2;

/// Applies the depth bound after parsing: once three questions have been
/// asked, or as soon as a weak answer follows the first question, the action
/// becomes `Conclude` no matter what the model suggested, and the utterance
/// is rewritten to a polite transition carrying the extracted feedback.
pub fn apply_depth_override(mut analysis: AnswerAnalysis, current_depth: usize) -> AnswerAnalysis {
    let weak_answer = analysis.completion_score <= WEAK_SCORE_CUTOFF && current_depth >= 1;
    if current_depth >= MAX_TOPIC_DEPTH || weak_answer {
        analysis.action = AnswerAction::Conclude;
        analysis.next_response =
            prompts::conclude_transition(analysis.feedback.as_deref().unwrap_or(""));
    }
    analysis
}

/// Parses the labelled four-section feedback block produced at topic
/// conclusion. Section headers are lines ending in ':'; bullet markers are
/// stripped from the lines beneath them.
pub fn parse_topic_feedback(raw: &str) -> Result<TopicFeedback, ParseError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Section {
        Understanding,
        Strengths,
        Improvements,
        Suggestions,
    }

    let mut current: Option<Section> = None;
    let mut understanding: Vec<String> = Vec::new();
    let mut strengths: Vec<String> = Vec::new();
    let mut improvements: Vec<String> = Vec::new();
    let mut suggestions: Vec<String> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_suffix(':') {
            let header = header.to_lowercase();
            current = if header.contains("understanding") {
                Some(Section::Understanding)
            } else if header.contains("strength") {
                Some(Section::Strengths)
            } else if header.contains("improvement") {
                Some(Section::Improvements)
            } else if header.contains("suggestion") {
                Some(Section::Suggestions)
            } else {
                current
            };
            continue;
        }
        let item = line
            .trim_start_matches(['-', '*', '•'])
            .trim()
            .to_string();
        if item.is_empty() {
            continue;
        }
        match current {
            Some(Section::Understanding) => understanding.push(item),
            Some(Section::Strengths) => strengths.push(item),
            Some(Section::Improvements) => improvements.push(item),
            Some(Section::Suggestions) => suggestions.push(item),
            None => {}
        }
    }

    if understanding.is_empty() {
        return Err(ParseError::MissingSection("understanding"));
    }
    if strengths.is_empty() {
        return Err(ParseError::MissingSection("strengths"));
    }
    if improvements.is_empty() {
        return Err(ParseError::MissingSection("improvements"));
    }
    if suggestions.is_empty() {
        return Err(ParseError::MissingSection("suggestions"));
    }

    Ok(TopicFeedback {
        understanding: understanding.join(" "),
        strengths,
        improvements,
        suggestions,
    })
}

/// All-positive generic feedback used when feedback generation fails.
pub fn fallback_feedback() -> TopicFeedback {
    TopicFeedback {
        understanding: "Showed a basic understanding of the topic.".to_string(),
        strengths: vec!["Answered with a sincere, engaged attitude.".to_string()],
        improvements: vec!["Add more concrete examples to your answers.".to_string()],
        suggestions: vec![
            "Build hands-on experience with this topic in a real project.".to_string(),
        ],
    }
}

/// Stateless classification service over a completion client. Total: all
/// oracle and parsing failures collapse into the deterministic fallback, so
/// callers never see an error from here.
pub struct AnswerClassifier {
    client: Arc<dyn CompletionClient>,
    retry: RetryPolicy,
}

impl AnswerClassifier {
    pub fn new(client: Arc<dyn CompletionClient>, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Classifies one answer against the conversation so far. `history` is
    /// the topic's turns *before* this answer; the depth rule counts the
    /// interviewer turns in it.
    pub async fn classify(
        &self,
        position: Position,
        topic: &str,
        history: &[Turn],
        answer: &str,
    ) -> AnswerAnalysis {
        let current_depth = history
            .iter()
            .filter(|t| t.role == TurnRole::Interviewer)
            .count();

        let prompt =
            prompts::analyze_answer(position, topic, &prompts::format_history(history), answer);

        let analysis = match complete_with_retry(self.client.as_ref(), &prompt, self.retry).await {
            Ok(raw) => match parse_analysis(&raw) {
                Ok(analysis) => analysis,
                Err(err) => {
                    warn!(error = %err, "discarding malformed analysis response");
                    fallback_analysis()
                }
            },
            Err(err) => {
                warn!(error = %err, "answer analysis failed after retries");
                fallback_analysis()
            }
        };

        apply_depth_override(analysis, current_depth)
    }
}
