//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** holds application state, the keyboard event loop and pane focus.
//!   Every edit of an assumption recomputes the layout from scratch.
//! - **[`panes`]** are stateless render functions for each visible pane (source,
//!   account size, diagnostics, size table, status bar)
//! - **[`theme`]** is the color palette shared by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the source text and
//! the starting [`Overrides`], then call [`App::run`] to start the event loop.
//!
//! [`Overrides`]: crate::layout::Overrides
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
