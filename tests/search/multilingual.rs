//! Accented names and bilingual titles.

use crate::common::{ids, make_full_record, registry_db};
use petal::{augment_all, populate_normalized, query_terms, score_all, SearchKind};

#[test]
fn test_accents_fold_both_ways() {
    let db = registry_db();
    let plain = ids(&score_all(&query_terms("emile"), &db, SearchKind::Cultivar));
    let accented = ids(&score_all(&query_terms("Émile"), &db, SearchKind::Cultivar));
    assert_eq!(plain, vec![7]);
    assert_eq!(accented, plain);
}

#[test]
fn test_abbreviation_dot_is_a_separator() {
    let db = registry_db();
    assert_eq!(ids(&score_all(&query_terms("mme"), &db, SearchKind::Cultivar)), vec![7]);
    assert_eq!(
        ids(&score_all(&query_terms("Mme. Emile"), &db, SearchKind::Cultivar)),
        vec![7]
    );
}

#[test]
fn test_bilingual_title_splits_native_and_romanized() {
    let db = registry_db();
    let luoyang = db.iter().find(|r| r.record.id == 6).unwrap();
    assert_eq!(luoyang.cultivar_norm, vec!["LUOYANG", "HONG"]);
    assert!(!luoyang.native_cultivar_norm.is_empty());
    assert!(luoyang
        .native_cultivar_norm
        .iter()
        .all(|token| !token.is_empty() && !token.contains('/')));
}

#[test]
fn test_romanized_name_finds_bilingual_title() {
    let db = registry_db();
    assert_eq!(ids(&score_all(&query_terms("luoyang"), &db, SearchKind::Cultivar)), vec![6]);
}

#[test]
fn test_native_name_finds_bilingual_title() {
    let db = registry_db();
    let results = score_all(&query_terms("洛阳"), &db, SearchKind::Cultivar);
    assert_eq!(ids(&results), vec![6]);
    assert!(results[0].score > 0.0);
}

#[test]
fn test_slash_without_cjk_stays_one_title() {
    let record = populate_normalized(make_full_record(1, "Pink/White Mix", "", "", "", ""));
    assert!(record.native_cultivar_norm.is_empty());
    assert_eq!(record.cultivar_norm, vec!["PINK", "WHITE", "MIX"]);

    let db = augment_all(vec![make_full_record(1, "Pink/White Mix", "", "", "", "")]);
    assert_eq!(ids(&score_all(&query_terms("white"), &db, SearchKind::Cultivar)), vec![1]);
}
