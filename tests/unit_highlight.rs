// Unit tests for flagged-word highlighting and the editor model.
//
// Uses DelimiterMarker ([[word]]) so expected output stays readable; the
// HTML marker is covered by the web API tests.

use gramcheck::highlight::{apply_highlights, escape, DelimiterMarker, Editor, HtmlMarker};
use gramcheck::proxy::CheckResult;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn mark(text: &str, list: &[&str]) -> String {
    apply_highlights(text, &words(list), &DelimiterMarker::default())
}

// ============================================================
// apply_highlights — literal, global matching
// ============================================================

#[test]
fn marks_every_occurrence() {
    assert_eq!(mark("teh quick teh fox", &["teh"]), "[[teh]] quick [[teh]] fox");
}

#[test]
fn metacharacters_match_only_literally() {
    assert_eq!(mark("a.b axb a.b", &["a.b"]), "[[a.b]] axb [[a.b]]");
}

#[test]
fn other_pattern_syntax_is_literal() {
    assert_eq!(mark("(x+y)* and xy", &["(x+y)*"]), "[[(x+y)*]] and xy");
    assert_eq!(mark("cost $5 or 5", &["$5"]), "cost [[$5]] or 5");
    assert_eq!(mark(r"a\b ab", &[r"a\b"]), r"[[a\b]] ab");
}

#[test]
fn escape_output_is_a_valid_literal_pattern() {
    let re = regex_lite::Regex::new(&escape("[a-z]+")).unwrap();
    assert!(re.is_match("x [a-z]+ y"));
    assert!(!re.is_match("abc"));
}

#[test]
fn sorani_words_match() {
    let text = "ئەمڕۆ کەشوهەوا خۆشە، ئەمڕۆ";
    assert_eq!(
        mark(text, &["ئەمڕۆ"]),
        "[[ئەمڕۆ]] کەشوهەوا خۆشە، [[ئەمڕۆ]]"
    );
}

#[test]
fn multi_codepoint_sequences_match() {
    // "é" as e + combining acute, and a ZWJ emoji sequence.
    let text = "cafe\u{301} 👩‍💻 cafe";
    assert_eq!(
        mark(text, &["cafe\u{301}", "👩‍💻"]),
        "[[cafe\u{301}]] [[👩‍💻]] cafe"
    );
}

#[test]
fn unflagged_text_is_untouched() {
    let out = mark("teh quick teh fox", &["teh"]);
    assert!(out.contains(" quick "));
    assert!(out.ends_with(" fox"));
}

#[test]
fn word_not_in_text_changes_nothing() {
    assert_eq!(mark("all good here", &["missing"]), "all good here");
}

#[test]
fn empty_and_duplicate_words_are_ignored() {
    assert_eq!(mark("teh teh", &["", "teh", "teh"]), "[[teh]] [[teh]]");
}

#[test]
fn matching_is_case_sensitive() {
    assert_eq!(mark("Teh teh", &["teh"]), "Teh [[teh]]");
}

// ============================================================
// Overlapping flagged words
// ============================================================

#[test]
fn longest_word_wins_at_same_start() {
    assert_eq!(mark("their way", &["the", "their"]), "[[their]] way");
}

#[test]
fn leftmost_match_wins_across_words() {
    // "abc" starts first; "bcd" overlaps it and is skipped.
    assert_eq!(mark("abcd", &["bcd", "abc"]), "[[abc]]d");
}

#[test]
fn marker_text_is_never_rematched() {
    // A word that appears inside the marker syntax must not corrupt output.
    assert_eq!(mark("x [ y", &["[", "[["]), "x [[[]] y");
}

#[test]
fn html_marker_never_matches_inside_its_own_markup() {
    let out = apply_highlights("span class", &words(&["span", "class"]), &HtmlMarker);
    assert_eq!(
        out,
        r#"<span class="highlight">span</span> <span class="highlight">class</span>"#
    );
}

// ============================================================
// Editor — rendered content vs. source, correction cache
// ============================================================

fn result(wrong: &[&str], corrected: &str) -> CheckResult {
    CheckResult {
        wrong_words: words(wrong),
        corrected_text: corrected.to_string(),
        source_slot: 0,
    }
}

#[test]
fn apply_without_prior_check_is_noop() {
    let mut editor = Editor::new("teh cat");
    assert!(!editor.apply_correction());
    assert_eq!(editor.rendered(), "teh cat");
    assert_eq!(editor.source(), "teh cat");
}

#[test]
fn highlighting_does_not_change_source() {
    let mut editor = Editor::new("teh quick teh fox");
    editor.show_highlights(&words(&["teh"]), &DelimiterMarker::default());
    assert_eq!(editor.rendered(), "[[teh]] quick [[teh]] fox");
    assert_eq!(editor.source(), "teh quick teh fox");
}

#[test]
fn record_then_apply_replaces_visible_text() {
    let mut editor = Editor::new("teh cat sat");
    editor.record(&result(&["teh"], "the cat sat"), &DelimiterMarker::default());
    assert_eq!(editor.rendered(), "[[teh]] cat sat");
    assert_eq!(editor.cache().get(), Some("the cat sat"));

    assert!(editor.apply_correction());
    assert_eq!(editor.rendered(), "the cat sat");
    assert_eq!(editor.source(), "the cat sat");
}

#[test]
fn newer_check_overwrites_cached_correction() {
    let mut editor = Editor::new("a");
    let marker = DelimiterMarker::default();
    editor.record(&result(&[], "first"), &marker);
    editor.record(&result(&[], "second"), &marker);
    assert_eq!(editor.cache().get(), Some("second"));
}

#[test]
fn typing_resets_rendered_content() {
    let mut editor = Editor::new("teh");
    editor.show_highlights(&words(&["teh"]), &DelimiterMarker::default());
    editor.set_text("new text");
    assert_eq!(editor.rendered(), "new text");
    assert!(editor.cache().is_empty());
}
