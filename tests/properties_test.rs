//! Property-based tests for pipeline invariants.
//!
//! Inputs are built from a fixed vocabulary of tender-notice fragments so
//! that every generated document is plausible recognizer output. The base
//! vocabulary has no words that start a header/footer line; the extended
//! one adds them, along with date ranges and lines ending in a colon, so
//! line joins can form boilerplate and interact with the optional stages.

use proptest::prelude::*;
use unocr::stages::longest_blank_run;
use unocr::{NormalizeOptions, Normalizer};

const WORDS: &[&str] = &[
    "Tender", "notice", "supply", "of", "items.", "Ministry", "Defence", "invited", "the",
    "Tendor", "Govemment", "E8M", "1O0", "500", "18", "05/03/2024", "Rs.", "INR", "(annex)",
    "बोली", "निविदा", "सूचना", "भारत", "सरकार", "मूल्य", "दिनांक", "।",
];

const EXTRA_WORDS: &[&str] = &[
    "Page", "3", "of 10", "Copyright", "Deadline:", "Monday", "01-04-2023-31-03-2024", "e&m",
    "procure-",
];

fn is_devanagari(c: &char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(c)
}

/// Generate a line: blank, whitespace only, or a run of words.
fn line_strategy(words: Vec<&'static str>) -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t]{1,4}",
        prop::collection::vec(prop::sample::select(words), 1..8).prop_map(|w| w.join(" ")),
    ]
}

/// Generate a document with mixed line endings.
fn document_from(words: Vec<&'static str>) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(line_strategy(words), 0..24),
        prop::sample::select(&["\n", "\r\n", "\r"][..]),
    )
        .prop_map(|(lines, ending)| lines.join(ending))
}

fn document_strategy() -> impl Strategy<Value = String> {
    document_from(WORDS.to_vec())
}

fn extended_document_strategy() -> impl Strategy<Value = String> {
    document_from(WORDS.iter().chain(EXTRA_WORDS).copied().collect())
}

fn options_strategy() -> impl Strategy<Value = NormalizeOptions> {
    (any::<bool>(), any::<bool>(), 0usize..3).prop_map(|(lowercase, ascii, max)| {
        NormalizeOptions::new()
            .with_lowercase(lowercase)
            .with_ascii_only(ascii)
            .with_max_blank_lines(max)
    })
}

proptest! {
    #[test]
    fn blank_lines_bounded(doc in document_strategy(), max in 0usize..3, ascii in any::<bool>()) {
        let options = NormalizeOptions::new()
            .with_max_blank_lines(max)
            .with_ascii_only(ascii);
        let normalizer = Normalizer::new(options).unwrap();

        let result = normalizer.normalize(&doc);
        prop_assert!(!result.is_degraded());
        prop_assert!(longest_blank_run(result.text()) <= max);
        prop_assert_eq!(result.text().trim(), result.text().as_str());
    }

    #[test]
    fn devanagari_preserved(doc in document_strategy()) {
        let normalizer = Normalizer::new(NormalizeOptions::default()).unwrap();
        let result = normalizer.normalize(&doc);

        let mut before: Vec<char> = doc.chars().filter(is_devanagari).collect();
        let mut after: Vec<char> = result.text().chars().filter(is_devanagari).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn normalization_is_idempotent(
        doc in extended_document_strategy(),
        options in options_strategy(),
    ) {
        let normalizer = Normalizer::new(options.clone()).unwrap();
        let once = normalizer.normalize(&doc);
        let twice = normalizer.normalize(once.text());

        prop_assert!(!once.is_degraded());
        prop_assert_eq!(twice.text(), once.text());
        // Corrections and lowercasing undo each other on `e&m`, so only
        // case-preserving runs are expected to record nothing.
        if !options.lowercase {
            prop_assert!(twice.diagnostics().stage_counts.is_empty());
        }
    }
}
