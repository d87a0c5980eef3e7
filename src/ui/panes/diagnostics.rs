//! Diagnostics pane rendering

use super::{clamp_scroll, pane_block};
use crate::layout::{Diagnostic, Severity};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the diagnostics pane
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    diagnostics: &[Diagnostic],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Diagnostics ", is_focused);

    if diagnostics.is_empty() {
        let paragraph = Paragraph::new("(no diagnostics)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = clamp_scroll(diagnostics.len(), area, scroll_offset);

    let items: Vec<ListItem> = diagnostics
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|diagnostic| {
            let color = match diagnostic.severity() {
                Severity::Error => DEFAULT_THEME.error,
                Severity::Warning => DEFAULT_THEME.warning,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{}: ", diagnostic.severity()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(diagnostic.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
