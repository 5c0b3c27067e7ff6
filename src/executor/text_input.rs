// Text preparation for `adb shell input text`.
// The remote shell re-parses the argument and `input` turns every `%s` into a
// space, with no way to escape it.
use crate::errors::{MowerError, MowerResult};

const SHELL_SPECIAL: &[char] = &[
    '\\', '"', '\'', '`', '$', '&', '|', ';', '<', '>', '(', ')', '*', '?', '~', '#', '!', '[', ']',
    '{', '}',
];

/// Escapes `text` so `input text` types it verbatim.
///
/// Only printable ASCII is typable, and a literal `%s` is rejected.
pub fn escape_for_input(text: &str) -> MowerResult<String> {
    if text.contains("%s") {
        return Err(MowerError::Device(
            "input text cannot type a literal \"%s\"".into(),
        ));
    }
    if let Some(c) = text.chars().find(|c| !c.is_ascii() || c.is_ascii_control()) {
        return Err(MowerError::Device(format!(
            "input text cannot type {c:?}"
        )));
    }

    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match c {
            ' ' => out.push_str("%s"),
            c if SHELL_SPECIAL.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    Ok(out)
}
