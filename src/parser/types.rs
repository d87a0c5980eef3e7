//! Type text → [`TypeExpr`]
//!
//! Recognized shapes, checked in this order:
//!
//! ```text
//! Vec<T>      sequence
//! Option<T>   optional
//! String      text
//! [T; N]      fixed array, N a decimal literal
//! anything    named type
//! ```
//!
//! Wrapper names compare case-insensitively. Shapes nest, so `Vec<[u8; 32]>`
//! parses as a sequence of arrays.

use super::ast::TypeExpr;
use std::fmt;

/// A wrapper shape whose inner syntax could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    pub message: String,
}

impl ShapeError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ShapeError {}

/// Parse a declared type
pub fn parse_type(text: &str) -> Result<TypeExpr, ShapeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ShapeError::new("empty type"));
    }

    if let Some(inner) = generic_argument(text, "vec")? {
        return Ok(TypeExpr::Sequence(Box::new(parse_type(inner)?)));
    }
    if let Some(inner) = generic_argument(text, "option")? {
        return Ok(TypeExpr::Optional(Box::new(parse_type(inner)?)));
    }
    if text.eq_ignore_ascii_case("string") {
        return Ok(TypeExpr::Text);
    }
    if text.starts_with('[') {
        return parse_array(text);
    }

    Ok(TypeExpr::Named(text.to_string()))
}

/// `Vec<T>` -> `Some("T")` when `text` is `wrapper<...>`
fn generic_argument<'a>(text: &'a str, wrapper: &str) -> Result<Option<&'a str>, ShapeError> {
    let Some(head) = text.get(..wrapper.len()) else {
        return Ok(None);
    };
    if !head.eq_ignore_ascii_case(wrapper) {
        return Ok(None);
    }
    let Some(rest) = text[wrapper.len()..].trim_start().strip_prefix('<') else {
        return Ok(None);
    };

    match rest.strip_suffix('>') {
        Some(inner) => Ok(Some(inner)),
        None => Err(ShapeError::new(format!(
            "missing closing `>` in `{}`",
            text
        ))),
    }
}

/// `[T; N]`
fn parse_array(text: &str) -> Result<TypeExpr, ShapeError> {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| ShapeError::new(format!("missing closing `]` in `{}`", text)))?;

    let separator = top_level_semicolon(inner)
        .ok_or_else(|| ShapeError::new(format!("missing `; N` length in `{}`", text)))?;
    let (element, length) = (&inner[..separator], inner[separator + 1..].trim());

    let length = length.parse::<usize>().map_err(|_| {
        ShapeError::new(format!(
            "array length `{}` is not an integer literal",
            length
        ))
    })?;

    Ok(TypeExpr::Array(Box::new(parse_type(element)?), length))
}

/// Last `;` not nested inside brackets, so `[[u8; 2]; 3]` splits at the outer one
fn top_level_semicolon(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut found = None;
    for (i, c) in text.char_indices() {
        match c {
            '[' | '<' | '(' => depth += 1,
            ']' | '>' | ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => found = Some(i),
            _ => {}
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Box<TypeExpr> {
        Box::new(TypeExpr::Named(name.to_string()))
    }

    #[test]
    fn test_primitive_and_named() {
        assert_eq!(parse_type("u8"), Ok(TypeExpr::Named("u8".to_string())));
        assert_eq!(parse_type(" GameState "), Ok(TypeExpr::Named("GameState".to_string())));
    }

    #[test]
    fn test_wrappers() {
        assert_eq!(parse_type("Vec<Pubkey>"), Ok(TypeExpr::Sequence(named("Pubkey"))));
        assert_eq!(parse_type("option<i128>"), Ok(TypeExpr::Optional(named("i128"))));
        assert_eq!(parse_type("String"), Ok(TypeExpr::Text));
        assert_eq!(parse_type("[u16; 5]"), Ok(TypeExpr::Array(named("u16"), 5)));
    }

    #[test]
    fn test_nested_shapes() {
        assert_eq!(
            parse_type("Vec<Option<u8>>"),
            Ok(TypeExpr::Sequence(Box::new(TypeExpr::Optional(named("u8")))))
        );
        assert_eq!(
            parse_type("[[u8; 2]; 3]"),
            Ok(TypeExpr::Array(Box::new(TypeExpr::Array(named("u8"), 2)), 3))
        );
    }

    #[test]
    fn test_names_that_only_start_like_wrappers() {
        assert_eq!(parse_type("Vector"), Ok(TypeExpr::Named("Vector".to_string())));
        assert_eq!(parse_type("Stringy"), Ok(TypeExpr::Named("Stringy".to_string())));
    }

    #[test]
    fn test_malformed_shapes() {
        assert!(parse_type("Vec<u8").is_err());
        assert!(parse_type("[u8; 4").is_err());
        assert!(parse_type("[u8]").is_err());
        assert!(parse_type("[u8; N]").is_err());
        assert!(parse_type("Option<>").is_err());
        assert!(parse_type("").is_err());
    }
}
