//! Bracketed annotations embedded in translator output.
//!
//! Host UIs render these strings verbatim, so the `Display` impls below are
//! part of the observable contract. Change them only together with every
//! consumer.

use std::fmt;

/// Separator between SS→NL segments.
pub const SEGMENT_SEPARATOR: &str = "\n⇒ ";

/// SS→NL result when nothing is left after stripping obfuscation markers.
pub const EMPTY_INPUT_SENTINEL: &str =
    "[Input contained only obfuscation markers, whitespace, or was empty. No core pattern found.]";

/// SS→NL result when scanning produced only blank segments.
pub const NO_PATTERNS_SENTINEL: &str =
    "[Translation produced no recognizable Silent-Structure patterns or symbols.]";

/// NL→SS body when no segment was produced at all.
pub const NO_ELEMENTS_TRANSLATED: &str = "[# No elements translated.]";

/// Notes emitted by the SS→NL scanner in place of a meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolicAnnotation {
    Whitespace { chars: usize, includes_newline: bool },
    UnrecognizedFragment(String),
    UninterpretedCharacter(char),
    Halted,
}

impl fmt::Display for SymbolicAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitespace {
                chars,
                includes_newline,
            } => write!(
                f,
                "[Whitespace ({} chars, Includes Newline: {})]",
                chars, includes_newline
            ),
            Self::UnrecognizedFragment(text) => {
                write!(f, "[Unrecognized Fragment/Symbol: \"{}\"]", text)
            }
            Self::UninterpretedCharacter(c) => write!(f, "[Uninterpreted Character: \"{}\"]", c),
            Self::Halted => f.write_str(
                "[PROCESSING HALTED: Max Iterations Reached. Unprocessed input may remain.]",
            ),
        }
    }
}

/// Notes emitted by the NL→SS scanner, all prefixed `[# ` so they read as
/// comments inside a suggested pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextAnnotation {
    Untranslated(String),
    ParserBug(String),
    Halted,
}

impl fmt::Display for TextAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untranslated(words) => write!(f, "[# NL: \"{}\"]", words),
            Self::ParserBug(start) => write!(
                f,
                "[# !! PARSER BUG !! Cannot Translate Remaining Segment. Start (original): \"{}\"]",
                start
            ),
            Self::Halted => f.write_str(
                "[# PROCESSING HALTED: Max Iterations Reached. Unprocessed input may remain.]",
            ),
        }
    }
}

/// First `max_chars` chars of `text`.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}
