use crate::{WakePhrase, normalize};

/// WHAT: Accents and case are folded away
/// WHY: Recognizers disagree on diacritics; "Socórro" must still match "socorro"
#[test]
fn given_accented_mixed_case_text_when_normalizing_then_plain_lowercase() {
    // Given: Portuguese text with accents and capitals
    let raw = "Socórro, AÇÃO já";

    // When: Normalizing
    let normalized = normalize(raw);

    // Then: Diacritics stripped, lowercase, punctuation gone
    assert_eq!(normalized, "socorro acao ja");
}

/// WHAT: Punctuation and runs of whitespace collapse to single spaces
/// WHY: Token search works on clean word boundaries
#[test]
fn given_punctuation_and_spaces_when_normalizing_then_single_spaced() {
    // Given: Noisy transcript
    let raw = "  chame!!   o\t\tanjo...  ";

    // When: Normalizing
    let normalized = normalize(raw);

    // Then: One space between words, trimmed
    assert_eq!(normalized, "chame o anjo");
}

/// WHAT: Digits survive normalization
/// WHY: Tokens like "codigo 190" are valid wake phrases
#[test]
fn given_digits_when_normalizing_then_kept() {
    assert_eq!(normalize("Código 190!"), "codigo 190");
}

/// WHAT: Symbol-only input normalizes to empty
/// WHY: Empty utterances must be ignored by the machine
#[test]
fn given_only_symbols_when_normalizing_then_empty() {
    assert_eq!(normalize(" ¿¡ -- !? "), "");
}

/// WHAT: Blank token makes the phrase inert
/// WHY: A misconfigured phrase must never trigger alerts
#[test]
fn given_blank_token_when_building_phrase_then_inert() {
    // Given/When: A phrase whose second token is only punctuation
    let phrase = WakePhrase::new("socorro", "!!!");

    // Then: Inert, and the fallible constructor refuses it
    assert!(phrase.is_inert());
    assert!(WakePhrase::try_new("socorro", "!!!").is_none());
}

/// WHAT: Tokens are normalized at construction
/// WHY: Configured tokens and transcripts must share one alphabet
#[test]
fn given_raw_tokens_when_building_phrase_then_normalized() {
    let phrase = WakePhrase::new(" Socorro! ", "ANJO");

    assert_eq!(phrase.first(), "socorro");
    assert_eq!(phrase.second(), "anjo");
}
