use std::path::Path;
use std::sync::Arc;

use verba_core::{Thesaurus, WordChoice};
use verba_lang_english::WordNet;
use verba_types::Language;

fn thesaurus() -> Thesaurus {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wordnet");
    Thesaurus::new(Some(Arc::new(WordNet::open(dir).unwrap())))
}

#[test]
fn english_entry_from_wordnet() {
    assert_eq!(
        thesaurus().lookup("happy", Language::English, &[]),
        "Thesaurus for 'happy' (English):\nSynonyms: happy, glad\nAntonyms: unhappy"
    );
}

#[test]
fn lemma_names_are_lowercased_and_deduplicated() {
    let entry = thesaurus().entry("dogs", Language::English, &[]);
    assert_eq!(entry.synonyms, vec!["dog", "domestic_dog", "canis_familiaris"]);
    assert!(entry.antonyms.is_empty());
}

#[test]
fn word_choices_ignored_for_english() {
    let choices = [WordChoice::new("cheerful")];
    let entry = thesaurus().entry("xyzzy", Language::English, &choices);
    assert!(entry.synonyms.is_empty());
    assert_eq!(
        entry.to_string(),
        "Thesaurus for 'xyzzy' (English):\nNo synonyms found.\nNo antonyms found."
    );
}
