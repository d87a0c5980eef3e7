//! Enum sizing: one discriminant byte plus the largest variant payload
//!
//! A payload field that cannot be sized counts as 0 bytes, so an enum whose
//! widest variant refers to an unknown type is under-reported. The
//! `UnresolvedType` diagnostic raised for that field is the only signal.

use super::constants::DISCRIMINANT_SIZE;
use super::diagnostics::Diagnostic;
use super::{Pass, UnionLayout};
use crate::parser::ast::Declaration;
use crate::parser::variants::parse_variants;

impl Pass {
    pub(crate) fn resolve_union(&mut self, decl: &Declaration) -> UnionLayout {
        let variants = parse_variants(&decl.body, decl.body_location);

        let mut size = DISCRIMINANT_SIZE;
        let mut expression = DISCRIMINANT_SIZE.to_string();
        let mut widest_variant = None;

        for variant in &variants {
            // A unit variant is just the tag, which the floor already covers
            if variant.payload.is_unit() {
                continue;
            }

            let mut payload: usize = 0;
            let mut parts = Vec::new();
            for field in variant.payload.fields() {
                let Some(sized) = self.classify_field(field) else {
                    continue;
                };
                match payload.checked_add(sized.size) {
                    Some(total) => {
                        payload = total;
                        parts.push(field.type_text.to_lowercase());
                    }
                    None => self.overflowed(field),
                }
            }

            let Some(candidate) = payload.checked_add(DISCRIMINANT_SIZE) else {
                self.diagnostics.push(Diagnostic::SizeOverflow {
                    name: format!("{}::{}", decl.name, variant.name),
                    location: variant.location,
                });
                continue;
            };

            // Strictly greater: on a tie the earlier variant stays
            if candidate > size {
                size = candidate;
                expression = format!("{} + {}", DISCRIMINANT_SIZE, parts.join(" + "));
                widest_variant = Some(variant.name.clone());
            }
        }

        UnionLayout {
            name: decl.name.clone(),
            size,
            expression,
            widest_variant,
            variant_count: variants.len(),
            location: decl.location,
        }
    }
}
