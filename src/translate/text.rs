//! Natural language → suggested Silent-Structure pattern.
//!
//! Greedy longest-match scan over the NL phrase index. Matched phrases are
//! replaced by their SS snippets; everything else is collected word by word
//! and emitted as `[# NL: "..."]` commentary next to the snippets around it.
//! This is keyword lookup, not parsing: word order is kept and nothing is
//! inferred.

use std::ops::ControlFlow;

use serde::Serialize;

use super::annotation::{truncate_chars, TextAnnotation, NO_ELEMENTS_TRANSLATED};
use super::bounded::{run_bounded, Scan, Termination};
use super::folded::FoldedCursor;
use crate::config::{PreviewLimits, TranslatorConfig};
use crate::index::MatchIndices;

/// Fixed preamble of every suggested pattern.
pub const PATTERN_HEADER: &str = "\
# Suggested Silent-Structure pattern (keyword lookup, not a grammatical translation)
# Known phrases were replaced by their SS snippets, longest phrase first.
# Word order is kept as written; no intent or grammar is inferred.
# Lines of the form [# NL: \"...\"] are input words with no known keyword, kept as commentary.";

/// Closing notes when at least one phrase was translated.
pub const PATTERN_FOOTER_TIPS: &str = "\
# Tips: remove or rewrite the [# NL: \"...\"] lines before using the pattern.
# Run the result back through the SS-to-text translator to check its reading.";

/// Closing notes when no phrase was recognized.
pub const PATTERN_FOOTER_NO_KEYWORDS: &str = "\
# No recognized keywords: none of the input matched a known phrase.
# Try plainer wording such as \"user container\", \"leads to\" or \"open question\".";

/// Result of an NL→SS scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedPattern {
    /// Snippets and commentary in input order.
    pub segments: Vec<String>,
    /// Number of phrases replaced by a snippet.
    pub translated: usize,
    pub termination: Termination,
}

impl SuggestedPattern {
    /// Newline-joined non-blank segments, or the "nothing translated" marker.
    pub fn body(&self) -> String {
        let lines: Vec<&str> = self
            .segments
            .iter()
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect();
        if lines.is_empty() {
            NO_ELEMENTS_TRANSLATED.to_string()
        } else {
            lines.join("\n")
        }
    }

    pub fn footer(&self) -> &'static str {
        if self.translated > 0 {
            PATTERN_FOOTER_TIPS
        } else {
            PATTERN_FOOTER_NO_KEYWORDS
        }
    }

    /// Header, body and footer: the display string host UIs show.
    pub fn render(&self) -> String {
        format!("{}\n\n{}\n\n{}", PATTERN_HEADER, self.body(), self.footer())
    }
}

/// Scan `input` and return the structured suggestion.
pub fn suggest_pattern(
    indices: &MatchIndices,
    config: &TranslatorConfig,
    input: &str,
) -> SuggestedPattern {
    let input_chars = input.chars().count();
    let max_steps = config.text.for_input(input_chars);

    let mut scan = TextScan::new(indices, config.previews, input);
    let termination = run_bounded(&mut scan, max_steps);

    if termination.is_halted() {
        scan.flush();
        scan.segments.push(TextAnnotation::Halted.to_string());
    }
    scan.flush();

    tracing::debug!(
        input_chars,
        translated = scan.translated,
        segments = scan.segments.len(),
        ?termination,
        "text scan finished"
    );

    SuggestedPattern {
        segments: scan.segments,
        translated: scan.translated,
        termination,
    }
}

/// Translate natural language to a suggested SS pattern. Never fails.
pub fn translate_text_to_symbolic(indices: &MatchIndices, input: &str) -> String {
    suggest_pattern(indices, &TranslatorConfig::default(), input).render()
}

// =============================================================================
// Scanner
// =============================================================================

struct TextScan<'a> {
    indices: &'a MatchIndices,
    previews: PreviewLimits,
    cursor: FoldedCursor<'a>,
    untranslated: Vec<&'a str>,
    segments: Vec<String>,
    translated: usize,
}

impl<'a> TextScan<'a> {
    fn new(indices: &'a MatchIndices, previews: PreviewLimits, input: &'a str) -> Self {
        Self {
            indices,
            previews,
            cursor: FoldedCursor::new(input),
            untranslated: Vec::new(),
            segments: Vec::new(),
            translated: 0,
        }
    }

    /// Emit buffered words as one commentary segment.
    fn flush(&mut self) {
        if self.untranslated.is_empty() {
            return;
        }
        let words = self.untranslated.join(" ");
        let preview = truncate_chars(&words, self.previews.untranslated_chars);
        self.segments
            .push(TextAnnotation::Untranslated(preview.to_string()).to_string());
        self.untranslated.clear();
    }

    /// Longest phrase at the current position.
    fn match_phrase(&mut self) -> bool {
        let indices = self.indices;

        for phrase in indices.nl().iter() {
            if !self.cursor.folded_rest().starts_with(phrase.as_str()) {
                continue;
            }
            let Some(snippet) = indices.lexicon().nl_snippet(phrase) else {
                tracing::error!(phrase = %phrase, "index phrase missing from NL map");
                continue;
            };
            if !self.cursor.advance_folded_bytes(phrase.len()) {
                // Phrase ends inside the case folding of a single input char.
                continue;
            }
            self.flush();
            self.segments.push(snippet.to_string());
            self.translated += 1;
            return true;
        }
        false
    }

    fn take_word(&mut self) -> bool {
        match self.cursor.take_word() {
            Some(word) => {
                self.untranslated.push(word);
                true
            }
            None => false,
        }
    }

    /// Abandon the scan after a step that consumed nothing.
    ///
    /// Unreachable with a valid index; logged as an internal error if hit.
    fn give_up(&mut self) -> ControlFlow<Termination> {
        let start = truncate_chars(self.cursor.original_rest(), self.previews.stuck_chars);
        tracing::error!(
            offset = self.cursor.original_offset(),
            start = %start,
            "text scan made no progress, abandoning remaining input"
        );
        self.flush();
        self.segments
            .push(TextAnnotation::ParserBug(start.to_string()).to_string());
        ControlFlow::Break(Termination::Stuck)
    }
}

impl Scan for TextScan<'_> {
    fn step(&mut self) -> ControlFlow<Termination> {
        self.cursor.trim_start();
        if self.cursor.is_empty() {
            return ControlFlow::Break(Termination::Completed);
        }

        let before = self.cursor.original_offset();
        if !self.match_phrase() {
            self.take_word();
        }
        if self.cursor.original_offset() == before {
            return self.give_up();
        }
        ControlFlow::Continue(())
    }

    fn has_pending(&self) -> bool {
        !self.cursor.original_rest().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_match_indices;
    use ss_lexicon::LexiconStore;
    use std::sync::Arc;

    fn indices() -> MatchIndices {
        let mut builder = LexiconStore::builder();
        builder
            .insert_phrase("user container", "[]")
            .unwrap()
            .insert_phrase("user goal", "[#goal]")
            .unwrap()
            .insert_phrase("leads to", "→")
            .unwrap()
            .insert_phrase("goal", "#goal")
            .unwrap()
            .insert_phrase("open question", "(?)")
            .unwrap();
        build_match_indices(Arc::new(builder.build()))
    }

    fn suggest(input: &str) -> SuggestedPattern {
        suggest_pattern(&indices(), &TranslatorConfig::default(), input)
    }

    #[test]
    fn test_single_phrase() {
        let pattern = suggest("user container");
        assert_eq!(pattern.segments, vec!["[]"]);
        assert_eq!(pattern.body(), "[]");
        assert_eq!(pattern.translated, 1);
        assert_eq!(pattern.termination, Termination::Completed);

        let rendered = pattern.render();
        assert!(rendered.starts_with(PATTERN_HEADER));
        assert!(rendered.ends_with(PATTERN_FOOTER_TIPS));
        assert!(rendered.contains("\n\n[]\n\n"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        assert_eq!(suggest("User CONTAINER Leads To Goal").body(), "[]\n→\n#goal");
    }

    #[test]
    fn test_longest_phrase_wins() {
        assert_eq!(suggest("user goal").body(), "[#goal]");
    }

    #[test]
    fn test_unknown_words_become_commentary() {
        let pattern = suggest("xyz123");
        assert_eq!(pattern.body(), "[# NL: \"xyz123\"]");
        assert_eq!(pattern.translated, 0);
        assert_eq!(pattern.footer(), PATTERN_FOOTER_NO_KEYWORDS);
    }

    #[test]
    fn test_commentary_keeps_case_and_groups_words() {
        assert_eq!(
            suggest("The Big user container  leads to Somewhere Else").body(),
            "[# NL: \"The Big\"]\n[]\n→\n[# NL: \"Somewhere Else\"]"
        );
    }

    #[test]
    fn test_prefix_matching_is_not_word_bounded() {
        assert_eq!(suggest("goals").body(), "#goal\n[# NL: \"s\"]");
    }

    #[test]
    fn test_commentary_is_truncated() {
        let words = vec!["word"; 60].join(" ");
        let body = suggest(&words).body();
        let expected = format!("[# NL: \"{}\"]", &words[..150]);
        assert_eq!(body, expected);
    }

    #[test]
    fn test_empty_input() {
        let pattern = suggest("");
        assert!(pattern.segments.is_empty());
        assert_eq!(pattern.body(), NO_ELEMENTS_TRANSLATED);
        assert_eq!(pattern.footer(), PATTERN_FOOTER_NO_KEYWORDS);

        assert_eq!(suggest("   \n\t ").body(), NO_ELEMENTS_TRANSLATED);
    }

    #[test]
    fn test_halts_at_step_budget() {
        let mut config = TranslatorConfig::default();
        config.text.floor = 2;
        config.text.per_input_char = 0;

        let pattern = suggest_pattern(&indices(), &config, "alpha beta gamma goal");
        assert_eq!(pattern.termination, Termination::Halted { max_steps: 2 });
        assert_eq!(
            pattern.body(),
            "[# NL: \"alpha beta\"]\n[# PROCESSING HALTED: Max Iterations Reached. Unprocessed input may remain.]"
        );
    }

    #[test]
    fn test_give_up_flushes_and_reports_start() {
        let indices = indices();
        let mut scan = TextScan::new(&indices, PreviewLimits::default(), "pending rest of input");
        assert!(scan.take_word());
        scan.cursor.trim_start();

        assert_eq!(scan.give_up(), ControlFlow::Break(Termination::Stuck));
        assert_eq!(
            scan.segments,
            vec![
                "[# NL: \"pending\"]".to_string(),
                "[# !! PARSER BUG !! Cannot Translate Remaining Segment. Start (original): \"rest of input\"]"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_index_phrase_missing_from_lexicon_is_skipped() {
        let mut builder = LexiconStore::builder();
        builder.insert_phrase("goal", "#goal").unwrap();
        let indices = MatchIndices::from_parts(
            Arc::new(builder.build()),
            Vec::new(),
            vec!["goals".to_string(), "goal".to_string()],
        );

        let mut scan = TextScan::new(&indices, PreviewLimits::default(), "goals");
        assert!(scan.match_phrase());
        assert_eq!(scan.segments, vec!["#goal"]);
        assert_eq!(scan.translated, 1);
        assert_eq!(scan.cursor.original_rest(), "s");

        let pattern = suggest_pattern(&indices, &TranslatorConfig::default(), "goals");
        assert_eq!(pattern.body(), "#goal\n[# NL: \"s\"]");
    }

    #[test]
    fn test_final_sigma_matches_in_any_case() {
        let mut builder = LexiconStore::builder();
        builder.insert_phrase("ΟΔΟΣ", "#road").unwrap();
        let indices = build_match_indices(Arc::new(builder.build()));

        for input in ["ΟΔΟΣ", "οδος", "Οδοσ"] {
            let pattern = suggest_pattern(&indices, &TranslatorConfig::default(), input);
            assert_eq!(pattern.body(), "#road", "input {:?}", input);
            assert_eq!(pattern.translated, 1);
        }
    }

    #[test]
    fn test_phrase_ending_inside_folded_char_is_skipped() {
        let mut builder = LexiconStore::builder();
        builder.insert_phrase("i", "!").unwrap();
        let indices = build_match_indices(Arc::new(builder.build()));

        // 'İ' folds to "i\u{307}"; matching just "i" would split it.
        let pattern = suggest_pattern(&indices, &TranslatorConfig::default(), "İ i");
        assert_eq!(pattern.body(), "[# NL: \"İ\"]\n!");
    }
}
