use ratatui::style::Color;

/// Colors shared by every pane
pub struct Theme {
    pub fg: Color,
    /// Headings and brackets
    pub primary: Color,
    pub comment: Color,
    /// Byte badge when every struct sized cleanly
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    /// `#[account]`, `#[derive(..)]` and other attribute lines
    pub attribute: Color,
    /// Struct, enum and primitive names
    pub type_name: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    warning: Color::Rgb(250, 179, 135),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),
    string: Color::Rgb(166, 227, 161),
    number: Color::Rgb(250, 179, 135),
    attribute: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(88, 91, 112),
    status_bg: Color::Rgb(49, 50, 68),
};
