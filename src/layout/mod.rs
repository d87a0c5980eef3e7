//! Static size engine
//!
//! This module computes the serialized size of the structs found in a piece
//! of declaration text:
//! - [`table`]: the type name → size table and caller overrides
//! - [`diagnostics`]: non-fatal errors and advisories
//! - [`constants`]: layout constants and primitive sizes
//! - `classify`: per-field layout rules
//! - `union`, `record`: enum and struct resolution
//!
//! # Passes
//!
//! ```text
//! text → split_sections → enums (into the size table) → structs → Computation
//! ```
//!
//! All enums are resolved before any struct, so a struct may embed an enum
//! declared anywhere in the text. Each call to [`compute`] builds its own
//! [`SizeTable`]; nothing is shared between calls.
//!
//! # Layout Rules
//!
//! | Type        | Bytes                              |
//! |-------------|------------------------------------|
//! | primitives  | fixed, see [`constants::PRIMITIVE_SIZES`] |
//! | `[T; N]`    | `size(T) * N`                      |
//! | `Vec<T>`    | `4 + size(T) * assumed length`     |
//! | `String`    | `4 + assumed length`               |
//! | `Option<T>` | `1 + size(T)`                      |
//! | enum        | `1 + largest variant payload`      |

mod classify;
mod record;
mod union;

pub mod constants;
pub mod diagnostics;
pub mod table;

pub use diagnostics::{Diagnostic, Severity};
pub use table::{Assumptions, Overrides, SizeTable};

use crate::parser::ast::SourceLocation;
use crate::parser::split_sections;
use rustc_hash::FxHashMap;

/// Resolved size of one enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionLayout {
    pub name: String,
    pub size: usize,
    /// Composition of the widest variant, e.g. `1 + pubkey + i128`
    pub expression: String,
    /// Name of the widest payload variant, if any variant carries one
    pub widest_variant: Option<String>,
    pub variant_count: usize,
    pub location: SourceLocation,
}

/// Resolved size of one struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: String,
    pub size: usize,
    /// One symbolic expression per sized field
    pub expressions: Vec<String>,
    /// One `+ <size> // <field>: <type>` line per sized field
    pub derivation: Vec<String>,
    pub location: SourceLocation,
}

/// Everything one computation pass produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computation {
    /// Sum over every struct in the input
    pub total_size: usize,
    pub expressions: Vec<String>,
    pub derivation: Vec<String>,
    pub size_table: SizeTable,
    pub diagnostics: Vec<Diagnostic>,
    pub unions: Vec<UnionLayout>,
    pub records: Vec<RecordLayout>,
}

impl Computation {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    /// `false` when the text contained no struct at all
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }
}

/// State threaded through one computation
pub(crate) struct Pass {
    pub(crate) table: SizeTable,
    /// Symbolic expression per resolved enum/struct, keyed like the table
    pub(crate) symbols: FxHashMap<String, String>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Pass {
    pub(crate) fn new(table: SizeTable) -> Self {
        Self {
            table,
            symbols: FxHashMap::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Make a resolved declaration visible to later lookups
    fn register(&mut self, name: &str, size: usize, expression: &str, location: SourceLocation) {
        if name.is_empty() {
            return;
        }
        if self.table.contains(name) {
            self.diagnostics.push(Diagnostic::Redefinition {
                name: name.to_string(),
                location,
            });
            return;
        }
        self.table.insert_or_update(name, size);
        self.symbols
            .insert(name.to_lowercase(), expression.to_string());
    }
}

/// Compute the size of every struct in `text`.
///
/// Never fails: unknown types, malformed shapes, sizes too large for a
/// `usize` and assumed lengths are reported in [`Computation::diagnostics`]
/// and the rest of the text is still sized. Text without any struct yields a total of 0.
pub fn compute(text: &str, overrides: &Overrides) -> Computation {
    let sections = split_sections(text);
    let mut pass = Pass::new(SizeTable::with_overrides(overrides));

    let mut unions = Vec::with_capacity(sections.unions.len());
    for decl in &sections.unions {
        let layout = pass.resolve_union(decl);
        pass.register(&layout.name, layout.size, &layout.expression, layout.location);
        unions.push(layout);
    }

    let mut records = Vec::with_capacity(sections.records.len());
    for decl in &sections.records {
        let layout = pass.resolve_record(decl);
        let expression = if layout.expressions.is_empty() {
            "0".to_string()
        } else {
            layout.expressions.join(" + ")
        };
        pass.register(&layout.name, layout.size, &expression, layout.location);
        records.push(layout);
    }

    let mut total_size = 0usize;
    for record in &records {
        match total_size.checked_add(record.size) {
            Some(total) => total_size = total,
            None => pass.diagnostics.push(Diagnostic::SizeOverflow {
                name: record.name.clone(),
                location: record.location,
            }),
        }
    }

    Computation {
        total_size,
        expressions: records
            .iter()
            .flat_map(|r| r.expressions.iter().cloned())
            .collect(),
        derivation: records
            .iter()
            .flat_map(|r| r.derivation.iter().cloned())
            .collect(),
        size_table: pass.table,
        diagnostics: pass.diagnostics,
        unions,
        records,
    }
}
