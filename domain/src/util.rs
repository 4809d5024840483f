//! Shared text helpers for logs and reports.

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview of an answer: whitespace runs collapse to one space
/// and anything past `max_bytes` is replaced by `...`.
pub fn preview(text: &str, max_bytes: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = truncate_str(&flat, max_bytes);
    if cut.len() < flat.len() {
        format!("{}...", cut)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // 'π' is 2 bytes; cutting at 1 backs up to 0
        assert_eq!(truncate_str("π=3", 1), "");
        assert_eq!(truncate_str("π=3", 3), "π=");
    }

    #[test]
    fn preview_flattens_and_truncates() {
        assert_eq!(preview("The answer\n\nis   18", 100), "The answer is 18");
        assert_eq!(preview("The answer is 18", 10), "The answer...");
    }

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("18", 10), "18");
    }
}
