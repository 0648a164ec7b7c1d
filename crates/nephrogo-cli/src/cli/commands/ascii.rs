//! `nephrogo ascii` – transliterate text.

use nephrogo_core::text::{only_alphanumeric_or_spaces, str_to_ascii};

pub fn ascii_text(text: &str, strip: bool) -> String {
    let ascii = str_to_ascii(text);
    if strip {
        only_alphanumeric_or_spaces(&ascii)
    } else {
        ascii
    }
}

pub fn run_ascii(text: &str, strip: bool) {
    println!("{}", ascii_text(text, strip));
}
