//! Text helpers for log and error output.

/// Shorten `s` to at most `max_chars` characters, appending `...` when cut.
///
/// Works on character boundaries so multi-byte text never splits.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut chars = s.char_indices();
    match chars.nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}
