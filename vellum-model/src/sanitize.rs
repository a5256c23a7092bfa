//! Text sanitization shared by every conversion path.
//!
//! WordprocessingML rejects documents containing most C0 control characters,
//! so stripping them before a run is accepted into the model is a correctness
//! requirement, not cleanup. Tab, LF and CR are legal and kept.

/// True for the control characters the OOXML spec forbids in text content:
/// U+0000–U+0008, U+000B, U+000C, U+000E–U+001F and U+007F.
pub fn is_forbidden_control(ch: char) -> bool {
    matches!(ch,
        '\u{0000}'..='\u{0008}'
        | '\u{000B}'
        | '\u{000C}'
        | '\u{000E}'..='\u{001F}'
        | '\u{007F}')
}

/// Remove every forbidden control character from `text`.
pub fn strip_control_chars(text: &str) -> String {
    if text.chars().any(is_forbidden_control) {
        text.chars().filter(|c| !is_forbidden_control(*c)).collect()
    } else {
        text.to_string()
    }
}

/// Collapse any run of whitespace (including newlines) into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_ws = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                out.push(' ');
                in_ws = true;
            }
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}
