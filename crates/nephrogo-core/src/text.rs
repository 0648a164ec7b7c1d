//! ASCII helpers for names and search keys.

use deunicode::deunicode;

/// Transliterates Unicode text to its closest ASCII form (`Šančiai` -> `Sanciai`).
pub fn str_to_ascii(s: &str) -> String {
    deunicode(s)
}

/// Keeps ASCII letters, digits and plain spaces; everything else is removed.
pub fn only_alphanumeric_or_spaces(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}
