//! End-to-end translations against the built-in lexicon.

use std::sync::Arc;

use ss_translate::translate::annotation::EMPTY_INPUT_SENTINEL;
use ss_translate::translate::text::{PATTERN_FOOTER_NO_KEYWORDS, PATTERN_FOOTER_TIPS, PATTERN_HEADER};
use ss_translate::{
    build_match_indices, translate_symbolic_to_text, translate_text_to_symbolic, Category,
    MatchIndices, Termination, Translator,
};

fn builtin_indices() -> MatchIndices {
    let lexicon = ss_lexicon::builtin().expect("built-in lexicon loads");
    build_match_indices(Arc::new(lexicon))
}

#[test]
fn test_core_trigger_translates_to_its_meaning() {
    let indices = builtin_indices();
    let meaning = indices
        .lexicon()
        .lookup("[]", Category::Core)
        .expect("[] is a core trigger");

    assert_eq!(translate_symbolic_to_text(&indices, "[]"), meaning);
}

#[test]
fn test_obfuscated_word_is_scanned_as_plain_text() {
    let indices = builtin_indices();
    assert_eq!(
        translate_symbolic_to_text(&indices, "||test||"),
        "[Unrecognized Fragment/Symbol: \"test\"]"
    );
}

#[test]
fn test_empty_input_gives_sentinel() {
    let indices = builtin_indices();
    assert_eq!(translate_symbolic_to_text(&indices, ""), EMPTY_INPUT_SENTINEL);
    assert_eq!(translate_symbolic_to_text(&indices, " || ‖ "), EMPTY_INPUT_SENTINEL);
}

#[test]
fn test_known_phrase_becomes_snippet() {
    let indices = builtin_indices();
    let output = translate_text_to_symbolic(&indices, "user container");

    assert_eq!(
        output,
        format!("{}\n\n[]\n\n{}", PATTERN_HEADER, PATTERN_FOOTER_TIPS)
    );
}

#[test]
fn test_unknown_words_get_no_keywords_footer() {
    let indices = builtin_indices();
    let output = translate_text_to_symbolic(&indices, "xyz123");

    assert_eq!(
        output,
        format!(
            "{}\n\n[# NL: \"xyz123\"]\n\n{}",
            PATTERN_HEADER, PATTERN_FOOTER_NO_KEYWORDS
        )
    );
}

#[test]
fn test_composite_beats_its_parts() {
    let indices = builtin_indices();
    assert_eq!(
        translate_symbolic_to_text(&indices, "[]→{}"),
        "User content flows into the shared context"
    );
    assert_eq!(
        translate_symbolic_to_text(&indices, "[] → {}"),
        "User container: a slot for user-provided content\n\
         ⇒ Leads to: sequential consequence\n\
         ⇒ Context block: ambient or inherited context"
    );
}

#[test]
fn test_translator_facade_matches_free_functions() {
    let translator = Translator::builtin().expect("built-in lexicon loads");
    let indices = builtin_indices();

    for input in ["[#goal] -> #ans", "a<->b", "§", ""] {
        assert_eq!(
            translator.symbolic_to_text(input),
            translate_symbolic_to_text(&indices, input)
        );
    }
    for input in ["The user container leads to the goal", "goals", ""] {
        assert_eq!(
            translator.text_to_symbolic(input),
            translate_text_to_symbolic(&indices, input)
        );
    }
}

#[test]
fn test_long_input_completes_within_default_budget() {
    let translator = Translator::builtin().expect("built-in lexicon loads");

    let symbolic = "[]→{} #goal ".repeat(2_000);
    let reading = translator.read_symbolic(&symbolic);
    assert_eq!(reading.termination, Termination::Completed);
    assert_eq!(reading.segments.len(), 4_000);

    let text = "the user wants a placeholder ".repeat(1_000);
    let pattern = translator.suggest_pattern(&text);
    assert_eq!(pattern.termination, Termination::Completed);
    assert_eq!(pattern.translated, 2_000);
}

#[test]
fn test_indices_track_lexicon_fingerprint() {
    let indices = builtin_indices();
    let same = ss_lexicon::builtin().expect("built-in lexicon loads");
    assert!(indices.is_current_for(&same));
    assert!(!indices.is_current_for(&ss_translate::LexiconStore::empty()));
}
