//! Result pane: per-struct totals above the generated snippet

use super::source::highlight_line;
use super::{clamp_scroll, pane_block};
use crate::layout::constants::ACCOUNT_DISCRIMINATOR_SIZE;
use crate::layout::Computation;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the result pane
pub fn render_result_pane(
    frame: &mut Frame,
    area: Rect,
    computation: &Computation,
    snippet: &str,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Account Size ", is_focused);

    let mut lines: Vec<Line> = computation
        .records
        .iter()
        .map(|record| {
            Line::from(vec![
                Span::styled(
                    record.name.clone(),
                    Style::default()
                        .fg(DEFAULT_THEME.type_name)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(": ", Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(
                    format!("{} bytes", record.size),
                    Style::default()
                        .fg(DEFAULT_THEME.number)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "  ({} with discriminator)",
                        record.size.saturating_add(ACCOUNT_DISCRIMINATOR_SIZE)
                    ),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ])
        })
        .collect();

    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines.extend(snippet.lines().map(highlight_line));

    let visible_height = clamp_scroll(lines.len(), area, scroll_offset);
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
