//! Per-field layout rules
//!
//! A field's type text is parsed into a [`TypeExpr`] and sized recursively.
//! Inside a wrapper an unknown element counts as 0 bytes (the wrapper's own
//! flag or length prefix still counts) and raises one `UnresolvedType`.
//! A field whose whole type is unknown, whose shape cannot be read, or whose
//! size does not fit in a `usize` is left out entirely.

use super::constants::{LENGTH_PREFIX_SIZE, OPTION_FLAG_SIZE};
use super::diagnostics::Diagnostic;
use super::Pass;
use crate::parser::ast::{Field, TypeExpr};
use crate::parser::types::parse_type;

/// Byte size of a type plus how it was derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldSize {
    pub size: usize,
    pub expr: String,
}

impl FieldSize {
    /// Expression wrapped in parentheses when it is compound
    fn grouped(&self) -> String {
        if self.expr.contains(' ') {
            format!("({})", self.expr)
        } else {
            self.expr.clone()
        }
    }
}

impl Pass {
    /// Size one field, or `None` if it contributes nothing and gets no trail entry
    pub(crate) fn classify_field(&mut self, field: &Field) -> Option<FieldSize> {
        let expr = match parse_type(&field.type_text) {
            Ok(expr) => expr,
            Err(err) => {
                self.diagnostics.push(Diagnostic::MalformedShape {
                    type_text: field.type_text.clone(),
                    message: err.message,
                    location: field.location,
                });
                return None;
            }
        };

        match &expr {
            // A struct or enum named directly shows its own composition
            TypeExpr::Named(name) => {
                let key = name.to_lowercase();
                match self.table.lookup(&key) {
                    Some(size) => Some(FieldSize {
                        size,
                        expr: self.symbols.get(&key).cloned().unwrap_or(key),
                    }),
                    None => {
                        self.unresolved(name, field);
                        None
                    }
                }
            }
            _ => {
                let sized = self.size_of(&expr, field);
                if sized.is_none() {
                    self.overflowed(field);
                }
                sized
            }
        }
    }

    /// `None` when the size does not fit in a `usize`
    fn size_of(&mut self, expr: &TypeExpr, field: &Field) -> Option<FieldSize> {
        match expr {
            TypeExpr::Sequence(element) => {
                let length = self.table.assumptions().sequence_length;
                self.diagnostics.push(Diagnostic::AssumedSequenceLength {
                    length,
                    location: field.location,
                });
                let element = self.size_of(element, field)?;
                Some(FieldSize {
                    size: element
                        .size
                        .checked_mul(length)?
                        .checked_add(LENGTH_PREFIX_SIZE)?,
                    expr: format!("{} + {} * {}", LENGTH_PREFIX_SIZE, element.grouped(), length),
                })
            }
            TypeExpr::Optional(inner) => {
                let inner = self.size_of(inner, field)?;
                Some(FieldSize {
                    size: inner.size.checked_add(OPTION_FLAG_SIZE)?,
                    expr: format!("{} + {}", OPTION_FLAG_SIZE, inner.grouped()),
                })
            }
            TypeExpr::Text => {
                let length = self.table.assumptions().string_length;
                Some(FieldSize {
                    size: length.checked_add(LENGTH_PREFIX_SIZE)?,
                    expr: format!("{} + {}", LENGTH_PREFIX_SIZE, length),
                })
            }
            TypeExpr::Array(element, count) => {
                let element = self.size_of(element, field)?;
                Some(FieldSize {
                    size: element.size.checked_mul(*count)?,
                    expr: format!("{} * {}", element.grouped(), count),
                })
            }
            TypeExpr::Named(name) => {
                let size = match self.table.lookup(name) {
                    Some(size) => size,
                    None => {
                        self.unresolved(name, field);
                        0
                    }
                };
                Some(FieldSize {
                    size,
                    expr: expr.symbol(),
                })
            }
        }
    }

    pub(crate) fn overflowed(&mut self, field: &Field) {
        self.diagnostics.push(Diagnostic::SizeOverflow {
            name: format!("{}: {}", field.declaration, field.type_text),
            location: field.location,
        });
    }

    fn unresolved(&mut self, name: &str, field: &Field) {
        self.diagnostics.push(Diagnostic::UnresolvedType {
            name: name.to_string(),
            field: format!("{}: {}", field.declaration, field.type_text),
            location: field.location,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::table::{Overrides, SizeTable};
    use crate::parser::ast::SourceLocation;

    fn field(type_text: &str) -> Field {
        Field {
            name: "f".to_string(),
            declaration: "pub f".to_string(),
            type_text: type_text.to_string(),
            location: SourceLocation::new(1, 1),
        }
    }

    fn classify(type_text: &str) -> (Option<FieldSize>, Vec<Diagnostic>) {
        let mut pass = Pass::new(SizeTable::new());
        let sized = pass.classify_field(&field(type_text));
        (sized, pass.diagnostics)
    }

    #[test]
    fn test_sequence_of_pubkeys() {
        let (sized, diagnostics) = classify("Vec<Pubkey>");
        let sized = sized.expect("sized");
        assert_eq!(sized.size, 324);
        assert_eq!(sized.expr, "4 + pubkey * 10");
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn test_sequence_uses_assumed_length() {
        let mut pass = Pass::new(SizeTable::with_overrides(
            &Overrides::default().with_sequence_length(3),
        ));
        let sized = pass.classify_field(&field("Vec<Pubkey>")).expect("sized");
        assert_eq!(sized.size, 100);
    }

    #[test]
    fn test_optional_and_string() {
        assert_eq!(classify("Option<u32>").0.map(|s| s.size), Some(5));
        let (sized, diagnostics) = classify("String");
        assert_eq!(sized.expect("sized").expr, "4 + 1");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_optional_over_unknown_counts_flag() {
        let (sized, diagnostics) = classify("Option<Mystery>");
        assert_eq!(sized.map(|s| s.size), Some(1));
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0],
            Diagnostic::UnresolvedType { name, .. } if name == "Mystery"
        ));
    }

    #[test]
    fn test_array_and_nesting() {
        assert_eq!(classify("[u16; 5]").0.map(|s| s.size), Some(10));
        let nested = classify("Vec<Option<u8>>").0.expect("sized");
        assert_eq!(nested.size, 4 + 2 * 10);
        assert_eq!(nested.expr, "4 + (1 + u8) * 10");
    }

    #[test]
    fn test_unknown_and_malformed_are_omitted() {
        let (sized, diagnostics) = classify("Mystery");
        assert!(sized.is_none());
        assert!(diagnostics[0].is_error());

        let (sized, diagnostics) = classify("[u8; many]");
        assert!(sized.is_none());
        assert!(matches!(diagnostics[0], Diagnostic::MalformedShape { .. }));
    }

    #[test]
    fn test_oversized_array_is_omitted() {
        let (sized, diagnostics) = classify("[u128; 18446744073709551615]");
        assert!(sized.is_none());
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(diagnostics[0], Diagnostic::SizeOverflow { .. }));
        assert!(diagnostics[0].is_error());
    }

    #[test]
    fn test_oversized_assumed_length_is_omitted() {
        let mut pass = Pass::new(SizeTable::with_overrides(
            &Overrides::default().with_sequence_length(usize::MAX),
        ));
        assert!(pass.classify_field(&field("Vec<Pubkey>")).is_none());
        assert!(pass
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::SizeOverflow { .. })));

        let mut pass = Pass::new(SizeTable::with_overrides(
            &Overrides::default().with_string_length(usize::MAX),
        ));
        assert!(pass.classify_field(&field("String")).is_none());
    }
}
