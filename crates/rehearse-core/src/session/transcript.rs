//! Plain-text rendering of the display transcript for feedback analysis.

use super::message::Turn;

/// Renders turns one per line as `(User): text` or `(Interviewer): text`.
pub fn render_transcript<'a>(turns: impl IntoIterator<Item = &'a Turn>) -> String {
    turns
        .into_iter()
        .map(|turn| format!("({}): {}", turn.speaker.transcript_label(), turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_transcript_labels_speakers() {
        let turns = vec![
            Turn::interviewer("Welcome. What is a trait?"),
            Turn::candidate("A shared interface."),
            Turn::candidate("END INTERVIEW"),
        ];
        assert_eq!(
            render_transcript(&turns),
            "(Interviewer): Welcome. What is a trait?\n(User): A shared interface.\n(User): END INTERVIEW"
        );
    }

    #[test]
    fn test_render_empty_transcript() {
        assert_eq!(render_transcript(&Vec::<Turn>::new()), "");
    }
}
