//! Plain-text transcript export.

use crate::session::{InterviewSession, TopicFeedback, Turn, TurnRole};
use chrono::Utc;

const RULE: &str = "==================================================";
const THIN_RULE: &str = "--------------------------------------------------";

/// Renders the whole interview as a plain-text transcript: every completed
/// topic's turns with timestamps, each attached feedback fully expanded, and
/// the final evaluation when one exists.
pub fn transcript(session: &InterviewSession) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(RULE.to_string());
    lines.push("Interview transcript".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Position: {}", session.position()));
    lines.push(format!("Date: {}", Utc::now().format("%Y-%m-%d %H:%M")));
    lines.push(format!(
        "Topics covered: {}",
        session.completed_topics().join(", ")
    ));
    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push(String::new());

    for topic in session.completed_topics() {
        format_topic(&mut lines, topic, session.conversation_for(topic));
    }

    if let Some(final_feedback) = session.final_feedback() {
        lines.push("Final evaluation".to_string());
        lines.push(RULE.to_string());
        lines.push(final_feedback.to_string());
        lines.push(RULE.to_string());
    }

    lines.join("\n")
}

fn format_topic(lines: &mut Vec<String>, topic: &str, turns: &[Turn]) {
    lines.push(format!("[Topic] {topic}"));
    lines.push(THIN_RULE.to_string());
    lines.push(String::new());

    for turn in turns {
        let speaker = match turn.role {
            TurnRole::Interviewer => "Interviewer",
            TurnRole::Candidate => "Candidate",
        };
        lines.push(format!(
            "[{}] {}:",
            turn.timestamp.format("%H:%M:%S"),
            speaker
        ));
        lines.push(turn.content.clone());
        lines.push(String::new());

        if let Some(feedback) = &turn.feedback {
            format_feedback(lines, feedback);
        }
    }

    lines.push(RULE.to_string());
    lines.push(String::new());
}

fn format_feedback(lines: &mut Vec<String>, feedback: &TopicFeedback) {
    lines.push("Feedback:".to_string());
    lines.push("* Understanding:".to_string());
    lines.push(format!("  {}", feedback.understanding));
    lines.push(String::new());
    lines.push("* Strengths:".to_string());
    lines.extend(feedback.strengths.iter().map(|s| format!("  - {s}")));
    lines.push(String::new());
    lines.push("* Improvements:".to_string());
    lines.extend(feedback.improvements.iter().map(|s| format!("  - {s}")));
    lines.push(String::new());
    lines.push("* Suggestions:".to_string());
    lines.extend(feedback.suggestions.iter().map(|s| format!("  - {s}")));
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Position;

    fn completed_session() -> InterviewSession {
        let mut session = InterviewSession::new(Position::Backend);
        session.begin_topic("Server architecture design").unwrap();
        session
            .add_message(TurnRole::Interviewer, "How would you design a web server?", None)
            .unwrap();
        session
            .add_message(TurnRole::Candidate, "I would start from the load balancer.", None)
            .unwrap();
        session
            .add_message(
                TurnRole::Interviewer,
                "Thanks, let's wrap this topic up.",
                Some(TopicFeedback {
                    understanding: "Solid architectural instincts.".to_string(),
                    strengths: vec!["Thinks in terms of traffic flow.".to_string()],
                    improvements: vec!["Missed the caching layer.".to_string()],
                    suggestions: vec!["Study CDN architectures.".to_string()],
                }),
            )
            .unwrap();
        session.clear_current_conversation();
        session.complete_interview();
        session.set_final_feedback("Overall a promising candidate.").unwrap();
        session
    }

    #[test]
    fn test_transcript_contains_header_turns_and_feedback_in_order() {
        let text = transcript(&completed_session());

        assert!(text.contains("Position: backend"));
        assert!(text.contains("Topics covered: Server architecture design"));
        assert!(text.contains("[Topic] Server architecture design"));
        assert!(text.contains("How would you design a web server?"));
        assert!(text.contains("I would start from the load balancer."));
        assert!(text.contains("Overall a promising candidate."));

        // Feedback sections appear in their fixed order.
        let understanding = text.find("* Understanding:").unwrap();
        let strengths = text.find("* Strengths:").unwrap();
        let improvements = text.find("* Improvements:").unwrap();
        let suggestions = text.find("* Suggestions:").unwrap();
        assert!(understanding < strengths);
        assert!(strengths < improvements);
        assert!(improvements < suggestions);
        assert!(text.contains("  - Thinks in terms of traffic flow."));
    }

    #[test]
    fn test_transcript_timestamps_every_turn() {
        let text = transcript(&completed_session());
        let stamped = text
            .lines()
            .filter(|l| l.starts_with('[') && (l.ends_with("Interviewer:") || l.ends_with("Candidate:")))
            .count();
        assert_eq!(stamped, 3);
    }

    #[test]
    fn test_transcript_without_final_feedback_omits_the_block() {
        let mut session = InterviewSession::new(Position::Frontend);
        session.begin_topic("HTML, CSS, and web standards").unwrap();
        session
            .add_message(TurnRole::Interviewer, "What is the box model?", None)
            .unwrap();
        session.clear_current_conversation();

        let text = transcript(&session);
        assert!(!text.contains("Final evaluation"));
        assert!(text.contains("[Topic] HTML, CSS, and web standards"));
    }
}
