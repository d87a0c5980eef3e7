//! Size table pane: the editable length assumptions, then every known type

use super::{clamp_scroll, pane_block};
use crate::layout::Computation;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const NAME_WIDTH: usize = 18;

fn row<'a>(name: &str, value: String, name_style: Style, hint: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<width$}", name, width = NAME_WIDTH), name_style),
        Span::styled(
            format!("{:>6}", value),
            Style::default().fg(DEFAULT_THEME.number),
        ),
        Span::styled(hint, Style::default().fg(DEFAULT_THEME.comment)),
    ])
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Render the size table pane
pub fn render_table_pane(
    frame: &mut Frame,
    area: Rect,
    computation: &Computation,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Size Table ", is_focused);
    let table = &computation.size_table;
    let assumptions = table.assumptions();
    let plain = Style::default().fg(DEFAULT_THEME.fg);

    let mut lines = vec![
        heading("Assumptions"),
        row(
            "Vec<T> length",
            assumptions.sequence_length.to_string(),
            plain,
            "  +/-",
        ),
        row(
            "String length",
            assumptions.string_length.to_string(),
            plain,
            "  ]/[",
        ),
        Line::from(""),
        heading("Types (bytes)"),
    ];

    for (name, size) in table.entries() {
        let declared = computation
            .unions
            .iter()
            .map(|u| u.name.as_str())
            .chain(computation.records.iter().map(|r| r.name.as_str()))
            .any(|n| n.eq_ignore_ascii_case(name));
        let style = if declared {
            Style::default().fg(DEFAULT_THEME.type_name)
        } else {
            plain
        };
        lines.push(row(name, size.to_string(), style, ""));
    }

    let visible_height = clamp_scroll(lines.len(), area, scroll_offset);
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
