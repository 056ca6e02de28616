//! Text normalization for moderation
//!
//! Folds the common evasion tricks (compatibility forms, invisible
//! characters, diacritics, leetspeak, decorative punctuation, letter
//! repetition) out of user text before any matching happens. Every function
//! here is a single linear pass.

use unicode_normalization::UnicodeNormalization;

/// Punctuation used for styling rather than separating words
const STYLISTIC_PUNCTUATION: [char; 5] = ['_', '~', '`', '*', '^'];

/// Zero-width and formatting code points that render as nothing
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
    )
}

/// Combining diacritical marks left behind by NFKD
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

fn substitute_leet(c: char) -> Option<char> {
    match c {
        '@' | '4' => Some('a'),
        '8' => Some('b'),
        '3' => Some('e'),
        '1' | '!' | '|' => Some('i'),
        '0' => Some('o'),
        '5' | '$' => Some('s'),
        '7' => Some('t'),
        '2' => Some('z'),
        _ => None,
    }
}

/// Normalize text into lower-case letters, digits and spaces
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.nfkd() {
        if is_invisible(c) || is_combining_mark(c) {
            continue;
        }

        for lower in c.to_lowercase() {
            if let Some(mapped) = substitute_leet(lower) {
                out.push(mapped);
            } else if STYLISTIC_PUNCTUATION.contains(&lower) {
                continue;
            } else if lower.is_alphanumeric() || lower == ' ' {
                out.push(lower);
            } else {
                out.push(' ');
            }
        }
    }

    out
}

/// Shorten every run of three or more identical letters to two
pub fn collapse_repeats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    let mut run = 0usize;

    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }

        if run <= 2 || !c.is_alphabetic() {
            out.push(c);
        }
    }

    out
}

/// Reduce every repeated-letter run in a token to a single letter
pub fn compact_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut previous: Option<char> = None;

    for c in token.chars() {
        if Some(c) != previous {
            out.push(c);
        }
        previous = Some(c);
    }

    out
}

/// Keep only the alphabetic characters
pub fn letters_only(text: &str) -> String {
    text.chars().filter(|c| c.is_alphabetic()).collect()
}

/// Word tokens of a normalized text
#[derive(Debug, Default)]
pub struct Tokens<'a> {
    /// Tokens longer than one letter
    pub words: Vec<&'a str>,
    /// Single-letter tokens concatenated in order
    pub initialism: String,
}

/// Split on runs of non-letters
pub fn tokenize(text: &str) -> Tokens<'_> {
    let mut tokens = Tokens::default();

    for token in text.split(|c: char| !c.is_alphabetic()) {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {}
            (Some(single), None) => tokens.initialism.push(single),
            _ => tokens.words.push(token),
        }
    }

    tokens
}
