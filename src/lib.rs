//! # Introduction
//!
//! Countoor computes the maximum serialized byte size of Anchor account
//! structs, so a program can reserve `8 + MAX_SIZE` bytes of space when the
//! account is initialized. Sizes follow the Borsh encoding rules; variable
//! length fields (`Vec<T>`, `String`) are sized from adjustable assumptions.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Section Splitter → Variant / Field parsers → Size Table → Report → TUI
//! ```
//!
//! 1. [`parser`] cuts the text into `enum` and `struct` declarations and
//!    parses enum variants, struct field lines and field type shapes.
//! 2. [`layout`] resolves every enum into the [`layout::SizeTable`] first, then
//!    sizes each struct field by field, collecting [`layout::Diagnostic`]s
//!    instead of failing.
//! 3. [`report`] renders the `impl X { pub const MAX_SIZE: usize = N; }`
//!    snippet with its derivation trail.
//! 4. [`ui`] is the ratatui front end; not part of the stable library API.
//!
//! ```
//! use countoor::layout::{compute, Overrides};
//!
//! let source = "pub struct Vault {\n    pub owner: Pubkey,\n    pub bump: u8,\n}";
//! let computation = compute(source, &Overrides::default());
//! assert_eq!(computation.total_size, 33);
//! ```

pub mod layout;
pub mod parser;
pub mod report;
pub mod ui;
