//! Usage limits.
//!
//! A stateless admission check run before every candidate answer. The checks
//! are ordered: answer length first, then the per-topic response cap, then
//! the session-wide topic cap; the first failing check wins. A near-limit
//! answer is admitted with a warning on the side.

use crate::session::InterviewSession;

pub const MAX_ANSWER_LENGTH: usize = 3000;
pub const MAX_RESPONSES_PER_TOPIC: usize = 10;
pub const MAX_TOPICS_PER_SESSION: usize = 5;

/// Lengths above this fraction of the cap trigger the non-rejecting warning.
const WARN_THRESHOLD: usize = MAX_ANSWER_LENGTH * 4 / 5;

/// Outcome of the admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Allowed { warning: Option<String> },
    Rejected { message: String },
}

/// Checks whether an answer may be submitted against the current session
/// state. Never mutates anything.
pub fn check_answer(session: &InterviewSession, answer: &str) -> Admission {
    let length = answer.chars().count();

    if length > MAX_ANSWER_LENGTH {
        return Admission::Rejected {
            message: format!(
                "Your answer is too long; please keep it under {MAX_ANSWER_LENGTH} characters. \
                 Current length: {length} characters, limit: {MAX_ANSWER_LENGTH} characters. \
                 Tip: structure the answer around its core points.",
            ),
        };
    }

    let warning = (length > WARN_THRESHOLD).then(|| {
        format!(
            "Your answer is approaching the length limit: {length} of {MAX_ANSWER_LENGTH} characters.",
        )
    });

    if session.candidate_turn_count() >= MAX_RESPONSES_PER_TOPIC {
        return Admission::Rejected {
            message: "You have practiced this topic plenty. Shall we move on to the next one?"
                .to_string(),
        };
    }

    if session.completed_topics().len() >= MAX_TOPICS_PER_SESSION {
        let remaining = session.get_remaining_topics();
        if remaining.is_empty() {
            return Admission::Rejected {
                message: "This practice session is complete. Start a new session to practice \
                          with a fresh set of topics."
                    .to_string(),
            };
        }
        // The one last topic may still be finished over the cap.
        if remaining.len() > 1 {
            return Admission::Rejected {
                message: "That is plenty of practice for one session. Take a break and start a \
                          new session."
                    .to_string(),
            };
        }
    }

    Admission::Allowed { warning }
}
