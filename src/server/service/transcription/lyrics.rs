//! Groups timed words into subtitle-style lines.

use crate::server::{model::episode::LyricLine, service::transcription::TimedWord};

/// Longest line, in words, when no sentence break occurs.
pub const MAX_WORDS_PER_LINE: usize = 12;

/// Splits words into lines ending at `.`, `?` or `!`, or after `MAX_WORDS_PER_LINE` words.
pub fn format_lyrics(words: &[TimedWord]) -> Vec<LyricLine> {
    let mut lines = Vec::new();
    let mut current: Vec<&TimedWord> = Vec::new();

    for word in words {
        current.push(word);

        let sentence_end = word.text.trim_end().ends_with(['.', '?', '!']);
        if sentence_end || current.len() >= MAX_WORDS_PER_LINE {
            lines.extend(to_line(&current));
            current.clear();
        }
    }
    lines.extend(to_line(&current));

    lines
}

fn to_line(words: &[&TimedWord]) -> Option<LyricLine> {
    let first = words.first()?;
    let last = words.last()?;

    Some(LyricLine {
        start_ms: first.start_ms,
        end_ms: last.end_ms,
        text: words
            .iter()
            .map(|w| w.text.trim())
            .collect::<Vec<_>>()
            .join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<TimedWord> {
        text.split_whitespace()
            .enumerate()
            .map(|(i, w)| TimedWord {
                text: w.to_string(),
                start_ms: i as u64 * 100,
                end_ms: i as u64 * 100 + 80,
            })
            .collect()
    }

    #[test]
    fn breaks_at_sentence_punctuation() {
        let lines = format_lyrics(&words("Is it me? Yes it is! Fine then."));

        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Is it me?", "Yes it is!", "Fine then."]);
        assert_eq!(lines[1].start_ms, 300);
        assert_eq!(lines[1].end_ms, 580);
    }

    #[test]
    fn breaks_long_runs_at_word_limit() {
        let text = (1..=30).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let lines = format_lyrics(&words(&text));

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text.split(' ').count(), MAX_WORDS_PER_LINE);
        assert_eq!(lines[2].text, "25 26 27 28 29 30");
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(format_lyrics(&[]).is_empty());
    }
}
