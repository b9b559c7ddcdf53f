use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Fold a transcript or configured token into the comparison alphabet.
///
/// Lowercases, decomposes (NFD) and drops combining marks so that
/// "Socorro!" and "SOCÓRRO" compare equal, maps everything outside
/// `[a-z0-9 ]` to a space, then collapses and trims whitespace.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}
