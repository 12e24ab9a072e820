//! Final-evaluation aggregation.
//!
//! Before the closing report is requested, completed topics are bucketed into
//! strong and weak using a deterministic heuristic over what the session
//! already recorded: how much the candidate actually said, how the feedback
//! rated their understanding, and how many strengths the feedback listed.
//! When enough topics land in the strong bucket the report is framed
//! celebratory instead of balanced.

use crate::session::{InterviewSession, Turn, TurnRole};

/// Framing for the final evaluation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationTone {
    Celebratory,
    Balanced,
}

/// Share of strong topics required for the celebratory framing.
const STRONG_SHARE: f64 = 0.6;

/// Strength score at or above which a topic counts as strong.
const STRONG_CUTOFF: u32 = 8;

const ANSWER_CAP: usize = 5;
const STRENGTHS_CAP: usize = 3;

const HIGH_TIER_MARKERS: [&str; 5] = ["strong", "excellent", "deep", "thorough", "confident"];
const MID_TIER_MARKERS: [&str; 5] = ["good", "solid", "reasonable", "decent", "fair"];

/// Crude keyword tiering of the understanding text: 2 for clearly strong
/// wording, 1 for middling wording, 0 otherwise.
fn understanding_tier(understanding: &str) -> u32 {
    let lowered = understanding.to_lowercase();
    if HIGH_TIER_MARKERS.iter().any(|m| lowered.contains(m)) {
        2
    } else if MID_TIER_MARKERS.iter().any(|m| lowered.contains(m)) {
        1
    } else {
        0
    }
}

/// Deterministic strength score for one topic's conversation: capped answer
/// count, understanding tier (weight 3), capped strengths count (weight 2).
pub fn topic_strength(turns: &[Turn]) -> u32 {
    let answers = turns
        .iter()
        .filter(|t| t.role == TurnRole::Candidate && !t.content.trim().is_empty())
        .count()
        .min(ANSWER_CAP) as u32;

    let (tier, strengths) = turns
        .iter()
        .rev()
        .find_map(|t| t.feedback.as_ref())
        .map(|f| {
            (
                understanding_tier(&f.understanding),
                f.strengths.len().min(STRENGTHS_CAP) as u32,
            )
        })
        .unwrap_or((0, 0));

    answers + tier * 3 + strengths * 2
}

pub fn is_strong_topic(turns: &[Turn]) -> bool {
    topic_strength(turns) >= STRONG_CUTOFF
}

/// Picks the framing for the final report: celebratory when at least 60% of
/// completed topics are strong, balanced otherwise (including the degenerate
/// no-completed-topics case).
pub fn choose_tone(session: &InterviewSession) -> EvaluationTone {
    let completed = session.completed_topics();
    if completed.is_empty() {
        return EvaluationTone::Balanced;
    }
    let strong = completed
        .iter()
        .filter(|topic| is_strong_topic(session.conversation_for(topic)))
        .count();
    if strong as f64 >= completed.len() as f64 * STRONG_SHARE {
        EvaluationTone::Celebratory
    } else {
        EvaluationTone::Balanced
    }
}
