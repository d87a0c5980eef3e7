//! TUI pane rendering modules
//!
//! Each pane module exports one stateless `render_*` function that draws
//! into a [`Rect`]; scroll offsets live in [`crate::ui::App`] and are clamped
//! here on every frame.
//!
//! # Pane Modules
//!
//! - [`source`]: declaration text with syntax highlighting and error markers
//! - [`result`]: the generated `MAX_SIZE` snippet and totals
//! - [`diagnostics`]: unresolved types, malformed shapes, assumed lengths
//! - [`table`]: length assumptions and the final size table
//! - [`status`]: status bar with keybindings

pub mod diagnostics;
pub mod result;
pub mod source;
pub mod status;
pub mod table;

pub use diagnostics::render_diagnostics_pane;
pub use result::render_result_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use table::render_table_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block whose border reflects focus
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `offset` so the last page stays full; returns the visible row count
pub(crate) fn clamp_scroll(total_items: usize, area: Rect, offset: &mut usize) -> usize {
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders, min 1

    if total_items > visible_height {
        *offset = (*offset).min(total_items - visible_height);
    } else {
        *offset = 0;
    }

    visible_height
}
