//! Helpers for splitting keys into characters and normalising readings.

/// Split a key into its characters, left to right, keeping duplicates.
#[must_use]
pub fn characters(key: &str) -> Vec<String> {
    key.chars().map(String::from).collect()
}

/// True when `key` consists of exactly one character.
#[must_use]
pub fn is_single_character(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Ideographic description characters (⿰, ⿱, …) used by IDS sequences.
#[must_use]
pub const fn is_ideographic_description(c: char) -> bool {
    matches!(c, '\u{2FF0}'..='\u{2FFF}' | '\u{31EF}')
}

/// Reading with its tone removed: tone marks (`hǎo`, or `ha\u{30C}o` in
/// decomposed form) and a trailing tone digit (`hao3`) both go.
#[must_use]
pub fn toneless_pinyin(reading: &str) -> String {
    reading
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .chars()
        .filter(|c| !matches!(*c, '\u{0300}' | '\u{0301}' | '\u{0304}' | '\u{030C}'))
        .map(base_vowel)
        .collect()
}

const fn base_vowel(c: char) -> char {
    match c {
        'ā' | 'á' | 'ǎ' | 'à' => 'a',
        'ē' | 'é' | 'ě' | 'è' => 'e',
        'ī' | 'í' | 'ǐ' | 'ì' => 'i',
        'ō' | 'ó' | 'ǒ' | 'ò' => 'o',
        'ū' | 'ú' | 'ǔ' | 'ù' => 'u',
        'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' => 'ü',
        other => other,
    }
}
