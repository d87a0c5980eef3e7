//! Source pane rendering with syntax highlighting
//!
//! Shows the declaration text with line numbers. Lines that produced an
//! error diagnostic get a red marker in the gutter.
//!
//! Highlighting uses a simple character-by-character tokenizer rather than
//! the parser, so it works on text the parser would skip.

use super::{clamp_scroll, pane_block};
use crate::layout::Diagnostic;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Simple syntax highlighting for Rust declarations
pub(crate) fn highlight_line(line: &str) -> Line<'_> {
    if line.trim_start().starts_with("#[") {
        return Line::from(Span::styled(
            line,
            Style::default().fg(DEFAULT_THEME.attribute),
        ));
    }

    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_idx, c) = chars[i];

        // Handle comments
        if c == '/' && chars.get(i + 1).is_some_and(|&(_, n)| n == '/') {
            if !current_word.is_empty() {
                spans.push(Span::styled(current_word.clone(), word_style(&current_word)));
                current_word.clear();
            }
            spans.push(Span::styled(
                line[byte_idx..].to_string(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        // Handle strings
        if c == '"' {
            if !current_word.is_empty() {
                spans.push(Span::styled(current_word.clone(), word_style(&current_word)));
                current_word.clear();
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != '"' {
                end += if chars[end].1 == '\\' { 2 } else { 1 };
            }
            end = (end + 1).min(chars.len());
            let end_byte = chars.get(end).map_or(line.len(), |&(b, _)| b);
            spans.push(Span::styled(
                line[byte_idx..end_byte].to_string(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Handle non-alphanumeric (delimiters)
        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                spans.push(Span::styled(current_word.clone(), word_style(&current_word)));
                current_word.clear();
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' | '<' | '>' => {
                    Style::default().fg(DEFAULT_THEME.primary)
                }
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = word_style(&current_word);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn word_style(word: &str) -> Style {
    match word {
        "bool" | "u8" | "i8" | "u16" | "i16" | "u32" | "i32" | "u64" | "i64" | "u128" | "i128"
        | "f32" | "f64" | "Pubkey" | "String" | "Vec" | "Option" => {
            Style::default().fg(DEFAULT_THEME.type_name) // Types
        }
        "pub" | "struct" | "enum" | "impl" | "fn" | "const" | "usize" | "Self" | "self" => {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD) // Keywords
        }
        w if w.chars().all(|c| c.is_ascii_digit()) => Style::default().fg(DEFAULT_THEME.number),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    diagnostics: &[Diagnostic],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Declarations ", is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = clamp_scroll(lines.len(), area, scroll_offset);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let has_error = diagnostics
                .iter()
                .any(|d| d.is_error() && d.location().line == line_num);

            let (marker, num_style) = if has_error {
                (
                    "●",
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut spans = vec![Span::styled(format!("{}{:4} ", marker, line_num), num_style)];
            spans.extend(highlight_line(line).spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_preserves_text() {
        let source = "    pub maybe: Option<i128> // \"quoted\" note";
        assert_eq!(text(&highlight_line(source)), source);
        let source = "    label: \"a\\\"b\", x";
        assert_eq!(text(&highlight_line(source)), source);
    }

    #[test]
    fn test_attribute_line_is_one_span() {
        let line = highlight_line("#[account]");
        assert_eq!(line.spans.len(), 1);
    }
}
