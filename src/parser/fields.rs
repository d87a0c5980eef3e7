//! Line-oriented field parsing for struct bodies
//!
//! Every line of a struct body is classified on its own. Only a line with
//! exactly one `:` (after any trailing `//` comment is dropped) is a field;
//! attribute lines, `::` paths and multi-field lines are skipped rather than
//! guessed at.

use super::ast::{Field, SourceLocation};
use super::lexer::strip_block_comments;

/// What a single body line turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// Whole-line `//`, `/* */` or `*` comment
    Comment,
    Field(Field),
    /// Attribute lines, stray braces, lines with zero or several `:`
    NotAField,
}

/// Classify one line of a struct body
pub fn classify_line(line: &str, location: SourceLocation) -> LineKind {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with("//") || line.starts_with("/*") || line.starts_with('*') {
        return LineKind::Comment;
    }

    let code = line.split_once("//").map_or(line, |(code, _)| code);
    if code.matches(':').count() != 1 {
        return LineKind::NotAField;
    }
    let Some((declaration, type_text)) = code.split_once(':') else {
        return LineKind::NotAField;
    };

    let declaration = declaration.trim();
    let type_text = type_text
        .trim()
        .trim_end_matches(',')
        .trim_end_matches(';')
        .trim();
    if declaration.is_empty() || type_text.is_empty() {
        return LineKind::NotAField;
    }

    LineKind::Field(Field {
        name: strip_visibility(declaration).to_string(),
        declaration: declaration.to_string(),
        type_text: type_text.to_string(),
        location,
    })
}

/// Parse all field lines of a struct body, in order.
///
/// `body_location` is where `body` starts in the source text.
pub fn parse_record_fields(body: &str, body_location: SourceLocation) -> Vec<Field> {
    let body = strip_block_comments(body);

    body.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let indent = line.len() - line.trim_start().len();
            let location = if index == 0 {
                SourceLocation::new(body_location.line, body_location.column + indent)
            } else {
                SourceLocation::new(body_location.line + index, indent + 1)
            };

            match classify_line(line, location) {
                LineKind::Field(field) => Some(field),
                LineKind::Blank | LineKind::Comment | LineKind::NotAField => None,
            }
        })
        .collect()
}

/// `pub x` / `pub(crate) x` -> `x`
fn strip_visibility(declaration: &str) -> &str {
    let Some(rest) = declaration.strip_prefix("pub") else {
        return declaration;
    };
    let rest = match rest.trim_start().strip_prefix('(') {
        Some(scoped) => scoped.split_once(')').map_or("", |(_, after)| after),
        None if rest.starts_with(char::is_whitespace) => rest,
        // An identifier that merely starts with "pub", e.g. `pubkey`
        None => return declaration,
    };
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    fn field(line: &str) -> Field {
        match classify_line(line, loc()) {
            LineKind::Field(field) => field,
            other => panic!("Expected field, got {:?}", other),
        }
    }

    #[test]
    fn test_field_with_visibility_and_comment() {
        let f = field("    pub players: Vec<Pubkey> // we want to support up to 10 players");
        assert_eq!(f.name, "players");
        assert_eq!(f.declaration, "pub players");
        assert_eq!(f.type_text, "Vec<Pubkey>");
    }

    #[test]
    fn test_trailing_punctuation_is_trimmed() {
        assert_eq!(field("pub van : [f64; 5],").type_text, "[f64; 5]");
        assert_eq!(field("x: u8;").type_text, "u8");
        assert_eq!(field("pub(crate) owner: Pubkey,").name, "owner");
        assert_eq!(field("pubkey: Pubkey,").name, "pubkey");
    }

    #[test]
    fn test_skipped_lines() {
        assert_eq!(classify_line("   ", loc()), LineKind::Blank);
        assert_eq!(classify_line("// pub a: u8", loc()), LineKind::Comment);
        assert_eq!(classify_line("#[max_len(10)]", loc()), LineKind::NotAField);
        assert_eq!(
            classify_line("#[account(has_one = owner @ Error::Owner)]", loc()),
            LineKind::NotAField
        );
        assert_eq!(classify_line("a: u8, b: u16", loc()), LineKind::NotAField);
        assert_eq!(classify_line("}", loc()), LineKind::NotAField);
        assert_eq!(classify_line("a:", loc()), LineKind::NotAField);
    }

    #[test]
    fn test_parse_record_fields_locations() {
        let body = " a: u8,\n    // note\n\n    b: u16,\n";
        let fields = parse_record_fields(body, SourceLocation::new(3, 14));

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].location, SourceLocation::new(3, 15));
        assert_eq!(fields[1].name, "b");
        assert_eq!(fields[1].location, SourceLocation::new(6, 5));
    }

    #[test]
    fn test_fields_inside_block_comments_are_skipped() {
        let body = "\n pub a: u8,\n /*\n pub old: u128,\n */\n pub b: u16, /* was u8 */\n";
        let fields = parse_record_fields(body, SourceLocation::new(1, 15));

        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(fields[1].type_text, "u16");
        assert_eq!(fields[1].location.line, 6);
    }
}
