//! Greedy word wrapping

/// Wrap `text` to lines of at most `width` characters.
///
/// Whitespace runs collapse to a single space. A word longer than `width`
/// gets a line of its own.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Blank-line separated paragraphs, each wrapped to `width`
pub(crate) fn wrap_paragraphs(text: &str, width: usize) -> Vec<Vec<String>> {
    text.trim()
        .split("\n\n")
        .map(|paragraph| wrap(paragraph, width))
        .filter(|lines| !lines.is_empty())
        .collect()
}
