//! Declaration text parser
//!
//! This module turns raw account declaration text into the structures the
//! layout engine sizes:
//! - [`lexer`]: splits text into `pub enum` / `pub struct` / `impl` blocks
//! - [`variants`]: splits an enum body into variants and their payload fields
//! - [`fields`]: line-oriented field parsing for struct bodies
//! - [`types`]: parses a field's type text into a [`ast::TypeExpr`]
//! - [`ast`]: the shared data types
//!
//! # Accepted Input
//!
//! The parser is deliberately forgiving. It does not check that the text is a
//! complete, compilable Rust file; anything it cannot read as a declaration,
//! variant or field is skipped, and only unreadable *types* are reported
//! (by the layout engine).

pub mod ast;
pub mod fields;
pub mod lexer;
pub mod types;
pub mod variants;

pub use lexer::{split_sections, Sections};
