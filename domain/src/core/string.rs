//! String utilities for the domain layer.

/// Single-line preview of a reply for log output.
///
/// Collapses all whitespace runs to one space and cuts at `max_chars`
/// characters, appending `...` when something was dropped.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let kept: String = collapsed.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        assert_eq!(preview("a\n\n  b\tc", 20), "a b c");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("héllo wörld again", 10), "héllo w...");
        assert_eq!(preview("あいうえおかきくけこ", 5), "あい...");
    }
}
