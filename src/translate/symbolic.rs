//! Silent-Structure → natural language.
//!
//! Greedy longest-match scan over the SS index. Each step consumes one of:
//!
//! 1. the first index trigger that prefixes the remaining text
//! 2. the leading char, if it is a Core trigger
//! 3. one token (whitespace run, word run, or any single char), annotated
//!
//! Meanings and annotations are joined with `"\n⇒ "`.

use std::ops::ControlFlow;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::anychar,
    combinator::recognize,
    IResult,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use ss_lexicon::Category;

use super::annotation::{
    truncate_chars, SymbolicAnnotation, EMPTY_INPUT_SENTINEL, NO_PATTERNS_SENTINEL,
    SEGMENT_SEPARATOR,
};
use super::bounded::{run_bounded, Scan, Termination};
use crate::config::{PreviewLimits, TranslatorConfig};
use crate::index::MatchIndices;

/// Runs of `||` and `‖`.
static OBFUSCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\|\||‖)+").expect("obfuscation pattern is valid"));

/// Result of an SS→NL scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolicReading {
    /// Meanings and annotations in input order.
    pub segments: Vec<String>,
    pub termination: Termination,
}

impl SymbolicReading {
    /// The display string host UIs show.
    pub fn render(&self) -> String {
        if self.termination == Termination::Empty {
            return EMPTY_INPUT_SENTINEL.to_string();
        }

        let joined = self
            .segments
            .iter()
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR);

        match joined.trim() {
            "" => NO_PATTERNS_SENTINEL.to_string(),
            text => text.to_string(),
        }
    }
}

/// Replace each run of obfuscation markers with one space, then trim.
pub fn strip_obfuscation(input: &str) -> String {
    OBFUSCATION.replace_all(input, " ").trim().to_string()
}

/// Scan `input` and return the structured reading.
pub fn read_symbolic(
    indices: &MatchIndices,
    config: &TranslatorConfig,
    input: &str,
) -> SymbolicReading {
    let stripped = strip_obfuscation(input);
    if stripped.is_empty() {
        return SymbolicReading {
            segments: Vec::new(),
            termination: Termination::Empty,
        };
    }

    let max_steps = config.symbolic.for_input(input.chars().count());
    let mut scan = SymbolicScan::new(indices, config.previews, &stripped);
    let termination = run_bounded(&mut scan, max_steps);

    let mut segments = scan.segments;
    if termination.is_halted() {
        segments.push(SymbolicAnnotation::Halted.to_string());
    }

    tracing::debug!(
        input_chars = input.chars().count(),
        segments = segments.len(),
        ?termination,
        "symbolic scan finished"
    );

    SymbolicReading {
        segments,
        termination,
    }
}

/// Translate SS to a natural-language description. Never fails.
pub fn translate_symbolic_to_text(indices: &MatchIndices, input: &str) -> String {
    read_symbolic(indices, &TranslatorConfig::default(), input).render()
}

// =============================================================================
// Scanner
// =============================================================================

struct SymbolicScan<'a> {
    indices: &'a MatchIndices,
    previews: PreviewLimits,
    rest: &'a str,
    segments: Vec<String>,
}

impl<'a> SymbolicScan<'a> {
    fn new(indices: &'a MatchIndices, previews: PreviewLimits, text: &'a str) -> Self {
        Self {
            indices,
            previews,
            rest: text,
            segments: Vec::new(),
        }
    }

    fn consume(&mut self, len: usize, segment: Option<String>) {
        self.rest = &self.rest[len..];
        if let Some(segment) = segment {
            self.segments.push(segment);
        }
    }

    /// Longest, highest-priority trigger at the current position.
    fn match_trigger(&mut self) -> bool {
        let indices = self.indices;
        let rest = self.rest;

        for entry in indices.ss().iter() {
            if !rest.starts_with(entry.trigger.as_str()) {
                continue;
            }
            match indices.lexicon().lookup(&entry.trigger, entry.category) {
                Some(meaning) => {
                    self.consume(entry.trigger.len(), Some(meaning.to_string()));
                    return true;
                }
                None => {
                    tracing::error!(
                        trigger = %entry.trigger,
                        category = %entry.category,
                        "index entry has no meaning in its category table"
                    );
                }
            }
        }
        false
    }

    /// The leading char on its own, if Core knows it.
    fn match_core_char(&mut self) -> bool {
        let rest = self.rest;
        let Some(c) = rest.chars().next() else {
            return false;
        };
        let len = c.len_utf8();
        match self.indices.lexicon().lookup(&rest[..len], Category::Core) {
            Some(meaning) => {
                self.consume(len, Some(meaning.to_string()));
                true
            }
            None => false,
        }
    }

    /// One unrecognized token, annotated.
    fn match_token(&mut self) -> bool {
        let Ok((_, token)) = next_token(self.rest) else {
            return false;
        };
        let segment = classify_token(token, self.previews.fragment_chars);
        self.consume(token.len(), segment.map(|a| a.to_string()));
        true
    }

    /// Forward progress when nothing else consumed input.
    ///
    /// Unreachable with a valid index; logged as an internal error if hit.
    fn force_progress(&mut self) {
        if let Some(c) = self.rest.chars().next() {
            tracing::error!(
                character = %c,
                remaining = self.rest.len(),
                "symbolic scan made no progress, forcing one character"
            );
            self.consume(
                c.len_utf8(),
                Some(SymbolicAnnotation::UninterpretedCharacter(c).to_string()),
            );
        }
    }
}

impl Scan for SymbolicScan<'_> {
    fn step(&mut self) -> ControlFlow<Termination> {
        self.rest = self.rest.trim_start();
        if self.rest.is_empty() {
            return ControlFlow::Break(Termination::Completed);
        }

        let before = self.rest.len();
        if !self.match_trigger() && !self.match_core_char() {
            self.match_token();
        }
        if self.rest.len() == before {
            self.force_progress();
        }
        ControlFlow::Continue(())
    }

    fn has_pending(&self) -> bool {
        !self.rest.trim().is_empty()
    }
}

// =============================================================================
// Tokens
// =============================================================================

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whitespace run | word run | any single char, in that order.
fn next_token(input: &str) -> IResult<&str, &str> {
    alt((
        take_while1(char::is_whitespace),
        take_while1(is_word_char),
        recognize(anychar),
    ))(input)
}

/// Annotation for an unmatched token; `None` for a lone non-newline whitespace char.
fn classify_token(token: &str, fragment_chars: usize) -> Option<SymbolicAnnotation> {
    if token.starts_with(char::is_whitespace) {
        let chars = token.chars().count();
        let includes_newline = token.contains('\n');
        if chars == 1 && !includes_newline {
            return None;
        }
        return Some(SymbolicAnnotation::Whitespace {
            chars,
            includes_newline,
        });
    }
    Some(SymbolicAnnotation::UnrecognizedFragment(
        truncate_chars(token, fragment_chars).to_string(),
    ))
}
