//! Normalizer and unescape invariants.

use petal::{normalize, query_terms, tokenize, unescape_query};
use proptest::prelude::*;

/// Words with the punctuation and accents registry titles actually carry.
fn title_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "Festiva", "Maxima", "Mme.", "Émile", "Lemoine", "'Red", "Charm'", "de", "Nemours,",
            "Kopper-Kettle", "洛阳红", "Luoyang/Hong", "<b>Bowl</b>", "&amp;", "1906",
        ]),
        0..6,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(s in "\\PC{0,60}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_normalized_text_is_upper_alnum_space_or_cjk(s in "\\PC{0,60}") {
        for c in normalize(&s).chars() {
            prop_assert!(
                c.is_ascii_uppercase()
                    || c.is_ascii_digit()
                    || c == ' '
                    || ('\u{4E00}'..='\u{9FFF}').contains(&c),
                "unexpected char {:?}", c
            );
        }
    }

    #[test]
    fn prop_no_double_spaces(s in title_strategy()) {
        prop_assert!(!normalize(&s).contains("  "));
    }

    #[test]
    fn prop_tokens_are_never_empty(s in title_strategy()) {
        prop_assert!(tokenize(&s).iter().all(|t| !t.is_empty()));
        prop_assert!(query_terms(&s).iter().all(|t| !t.is_empty() && !t.contains(' ')));
    }

    #[test]
    fn prop_case_does_not_matter(s in "[A-Za-z ,.-]{0,40}") {
        prop_assert_eq!(normalize(&s.to_lowercase()), normalize(&s.to_uppercase()));
    }

    #[test]
    fn prop_unescape_never_panics_and_keeps_plain_text(s in "[A-Za-z0-9 ]{0,40}", raw in "\\PC{0,40}") {
        prop_assert_eq!(unescape_query(&s), s);
        let _ = unescape_query(&raw);
    }
}
