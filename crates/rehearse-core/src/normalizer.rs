//! Cleanup of interviewer text returned by the model.
//!
//! Model output occasionally carries leftovers from speech-synthesis markup
//! ("speaker high volume play" and friends), invisible characters, and
//! doubled punctuation. `normalize` removes those and guarantees the text
//! ends like a sentence.

/// Noise phrases, as word sequences. Words match case-insensitively and may be
/// separated by any run of whitespace, including none.
const NOISE_PHRASES: &[&[&str]] = &[
    &["speaker", "high", "volume", "play"],
    &["speaker", "high", "volume"],
    &["high", "volume", "play"],
];

/// Removed only when it is the very last word of the text.
const TRAILING_NOISE: &str = "play";

const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Normalizes interviewer text.
///
/// Steps, in order: strip noise phrases, drop non-printable characters
/// (keeping apostrophes), collapse `..` and `,.`, collapse whitespace, and
/// append a period when the text does not end in `.`, `?` or `!`.
///
/// Empty input, or input that is nothing but noise, yields an empty string.
pub fn normalize(text: &str) -> String {
    let text = strip_noise(text);
    let text = strip_non_printable(text.trim());
    let text = collapse_punctuation(text.trim());
    let text = collapse_whitespace(&text);

    if text.is_empty() {
        return text;
    }
    ensure_terminal_punctuation(text)
}

/// Removes every deny-listed noise phrase, then a dangling trailing "play".
///
/// Repeats until nothing changes, since removing one phrase can join its
/// neighbours into another.
pub fn strip_noise(text: &str) -> String {
    let mut current = strip_noise_once(text);
    loop {
        let next = strip_noise_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_noise_once(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let matched = NOISE_PHRASES
            .iter()
            .find_map(|phrase| match_phrase(&chars, i, phrase));
        match matched {
            Some(end) => i = end,
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }

    strip_trailing_word(out.trim_end(), TRAILING_NOISE)
}

/// Returns the index just past `phrase` if it occurs at `start`.
///
/// Characters that `strip_non_printable` would drop are skipped while
/// matching, so removing them later can never assemble a new noise phrase.
fn match_phrase(chars: &[char], start: usize, phrase: &[&str]) -> Option<usize> {
    let mut pos = start;
    for (index, word) in phrase.iter().enumerate() {
        if index > 0 {
            while pos < chars.len() && (chars[pos].is_whitespace() || is_dropped(chars[pos])) {
                pos += 1;
            }
        }
        for expected in word.chars() {
            while pos < chars.len() && is_dropped(chars[pos]) {
                pos += 1;
            }
            let actual = chars.get(pos)?;
            if !actual.eq_ignore_ascii_case(&expected) {
                return None;
            }
            pos += 1;
        }
    }
    Some(pos)
}

fn strip_trailing_word(text: &str, word: &str) -> String {
    let split = text.len().saturating_sub(word.len());
    match (text.get(..split), text.get(split..)) {
        (Some(head), Some(tail))
            if tail.eq_ignore_ascii_case(word)
                && !head.ends_with(|c: char| c.is_alphanumeric() || c == '\'') =>
        {
            head.to_string()
        }
        _ => text.to_string(),
    }
}

/// Drops control and invisible format characters.
///
/// Whitespace becomes a plain space so words stay apart; apostrophes are
/// always kept.
pub fn strip_non_printable(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if is_dropped(c) {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}

fn is_dropped(c: char) -> bool {
    c != '\'' && !c.is_whitespace() && (c.is_control() || is_invisible_format(c))
}

fn is_invisible_format(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{2028}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
    )
}

/// Rewrites `..` and `,.` to `.` until neither remains.
pub fn collapse_punctuation(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = current.replace("..", ".").replace(",.", ".");
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Collapses whitespace runs to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn ensure_terminal_punctuation(mut text: String) -> String {
    if !text.ends_with(SENTENCE_TERMINATORS) {
        text.push('.');
    }
    text
}
