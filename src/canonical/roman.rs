//! Sequel numerals: "Rocky II" -> "Rocky 2"

use regex::{Captures, Regex};
use std::sync::LazyLock;

// A numeral only counts when it is a whole word preceded by another word and
// followed by a colon, a dash, or the end of the title.
static TRAILING_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+)(\s+)(XV|XIV|XIII|XII|XI|IX|X|VIII|VII|VI|IV|V|III|II|I)(\s*[:\-]|$)")
        .expect("roman numeral regex")
});

/// Words after which a lone "I" is the pronoun, not a sequel number.
const PRONOUN_CONTEXT: &[&str] = &[
    "am", "and", "can", "could", "did", "do", "have", "how", "if", "me", "should", "was",
    "what", "when", "where", "who", "why", "would",
];

/// Words after which a lone "X" is part of a name ("Malcolm X", "Generation X").
const LETTER_NAME_CONTEXT: &[&str] = &[
    "agent", "brand", "experiment", "generation", "malcolm", "mister", "mr", "planet",
    "project", "subject",
];

pub(crate) fn arabicize_trailing(title: &str) -> String {
    TRAILING_NUMERAL
        .replace_all(title, |caps: &Captures| {
            let previous = &caps[1];
            let numeral = &caps[3];
            let value = match numeral_value(numeral) {
                Some(v) if !is_letter_word(numeral, previous) => v,
                _ => return caps[0].to_string(),
            };
            format!("{}{}{}{}", previous, &caps[2], value, &caps[4])
        })
        .into_owned()
}

/// True when a single-letter numeral reads as a word or name in context.
fn is_letter_word(numeral: &str, previous: &str) -> bool {
    let word = previous.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
    match numeral {
        "I" => PRONOUN_CONTEXT.contains(&word.as_str()),
        "X" => LETTER_NAME_CONTEXT.contains(&word.as_str()),
        _ => false,
    }
}

fn numeral_value(numeral: &str) -> Option<u32> {
    let value = match numeral {
        "I" => 1,
        "II" => 2,
        "III" => 3,
        "IV" => 4,
        "V" => 5,
        "VI" => 6,
        "VII" => 7,
        "VIII" => 8,
        "IX" => 9,
        "X" => 10,
        "XI" => 11,
        "XII" => 12,
        "XIII" => 13,
        "XIV" => 14,
        "XV" => 15,
        _ => return None,
    };
    Some(value)
}
