//! Struct sizing: the sum of every field that could be sized

use super::{Pass, RecordLayout};
use crate::parser::ast::Declaration;
use crate::parser::fields::parse_record_fields;

impl Pass {
    pub(crate) fn resolve_record(&mut self, decl: &Declaration) -> RecordLayout {
        let mut layout = RecordLayout {
            name: decl.name.clone(),
            size: 0,
            expressions: Vec::new(),
            derivation: Vec::new(),
            location: decl.location,
        };

        for field in parse_record_fields(&decl.body, decl.body_location) {
            let Some(sized) = self.classify_field(&field) else {
                continue;
            };
            let Some(size) = layout.size.checked_add(sized.size) else {
                self.overflowed(&field);
                continue;
            };
            layout.size = size;
            layout.derivation.push(format!(
                "+ {} // {}: {}",
                sized.size, field.declaration, field.type_text
            ));
            layout.expressions.push(sized.expr);
        }

        layout
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::{Pass, SizeTable};
    use crate::parser::split_sections;

    #[test]
    fn test_fields_add_up() {
        let sections = split_sections(
            "pub struct Vault {\n    pub owner: Pubkey,\n    pub bump: u8, // seed\n    #[max_len(4)]\n    pub cap: u64,\n}",
        );
        let mut pass = Pass::new(SizeTable::new());
        let layout = pass.resolve_record(&sections.records[0]);

        assert_eq!(layout.name, "Vault");
        assert_eq!(layout.size, 32 + 1 + 8);
        assert_eq!(layout.expressions, vec!["pubkey", "u8", "u64"]);
        assert_eq!(
            layout.derivation,
            vec![
                "+ 32 // pub owner: Pubkey",
                "+ 1 // pub bump: u8",
                "+ 8 // pub cap: u64",
            ]
        );
        assert!(pass.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_field_is_left_out() {
        let sections = split_sections("pub struct A { a: u8,\n b: Nope,\n c: u16 }");
        let mut pass = Pass::new(SizeTable::new());
        let layout = pass.resolve_record(&sections.records[0]);

        assert_eq!(layout.size, 3);
        assert_eq!(layout.derivation.len(), 2);
        assert_eq!(pass.diagnostics.len(), 1);
        assert_eq!(pass.diagnostics[0].location().line, 2);
    }

    #[test]
    fn test_running_total_overflow_drops_the_field() {
        let sections = split_sections(
            "pub struct P {\n pub a: [u8; 18446744073709551615],\n pub b: u8,\n pub c: u16,\n}",
        );
        let mut pass = Pass::new(SizeTable::new());
        let layout = pass.resolve_record(&sections.records[0]);

        assert_eq!(layout.size, usize::MAX);
        assert_eq!(layout.derivation.len(), 1);
        assert_eq!(pass.diagnostics.len(), 2);
        assert!(pass.diagnostics.iter().all(|d| d.is_error()));
        assert_eq!(pass.diagnostics[1].location().line, 4);
    }
}
