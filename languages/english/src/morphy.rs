//! Base-form lookup for inflected English words, following WordNet's morphy.

use std::collections::HashMap;

use crate::wordnet::Pos;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

fn rules(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => NOUN_RULES,
        Pos::Verb => VERB_RULES,
        Pos::Adjective => ADJECTIVE_RULES,
        Pos::Adverb => &[],
    }
}

fn apply_rules(forms: &[String], pos: Pos) -> Vec<String> {
    forms
        .iter()
        .flat_map(|form| {
            rules(pos).iter().filter_map(move |(suffix, replacement)| {
                form.strip_suffix(suffix)
                    .filter(|stem| !stem.is_empty())
                    .map(|stem| format!("{stem}{replacement}"))
            })
        })
        .collect()
}

fn keep_known(forms: Vec<String>, is_known: &impl Fn(&str) -> bool) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for form in forms {
        if is_known(&form) && !kept.contains(&form) {
            kept.push(form);
        }
    }
    kept
}

/// Forms of `word` present in the index for `pos`.
///
/// Exceptions win outright. Otherwise the detachment rules are applied, once
/// and then repeatedly, until some candidate is found in the index.
pub fn base_forms(
    word: &str,
    pos: Pos,
    exceptions: Option<&HashMap<String, Vec<String>>>,
    is_known: impl Fn(&str) -> bool,
) -> Vec<String> {
    if let Some(bases) = exceptions.and_then(|exc| exc.get(word)) {
        let mut candidates = vec![word.to_string()];
        candidates.extend(bases.iter().cloned());
        return keep_known(candidates, &is_known);
    }

    let mut forms = apply_rules(&[word.to_string()], pos);

    let mut candidates = vec![word.to_string()];
    candidates.extend(forms.iter().cloned());
    let found = keep_known(candidates, &is_known);
    if !found.is_empty() {
        return found;
    }

    while !forms.is_empty() {
        forms = apply_rules(&forms, pos);
        let found = keep_known(forms.clone(), &is_known);
        if !found.is_empty() {
            return found;
        }
    }

    Vec::new()
}
