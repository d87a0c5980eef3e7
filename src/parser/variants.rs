//! Enum body parsing
//!
//! An enum body is split into variants at top-level commas. Brace and paren
//! depth are tracked so that `Won { winner: Pubkey, score: i128 }` or
//! `Moved(u8, u8)` stay in one piece. Unbalanced closers clamp the depth at
//! zero and an unterminated opener keeps everything after it in the last
//! variant; neither case is an error.

use super::ast::{Field, Payload, SourceLocation, Variant};
use super::lexer::strip_block_comments;

/// Split `text` at commas that sit outside every `opens`/`closes` pair.
///
/// Returns `(byte_offset, trimmed_piece)` for each non-empty piece.
pub(crate) fn split_top_level<'a>(
    text: &'a str,
    opens: &[char],
    closes: &[char],
) -> Vec<(usize, &'a str)> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    let mut push = |from: usize, to: usize| {
        let raw = &text[from..to];
        let trimmed = raw.trim_start();
        let offset = from + (raw.len() - trimmed.len());
        let trimmed = trimmed.trim_end();
        if !trimmed.is_empty() {
            pieces.push((offset, trimmed));
        }
    };

    for (i, c) in text.char_indices() {
        if opens.contains(&c) {
            depth += 1;
        } else if closes.contains(&c) {
            depth = depth.saturating_sub(1);
        } else if c == ',' && depth == 0 {
            push(start, i);
            start = i + 1;
        }
    }
    push(start, text.len());

    pieces
}

/// Split an enum body into variant spans
pub fn split_variants(body: &str) -> Vec<(usize, &str)> {
    split_top_level(body, &['{', '('], &['}', ')'])
}

/// Parse every variant of an enum body.
///
/// `body_location` is where `body` starts in the source text.
pub fn parse_variants(body: &str, body_location: SourceLocation) -> Vec<Variant> {
    let body = strip_line_comments(&strip_block_comments(body));

    split_variants(&body)
        .into_iter()
        .filter_map(|(offset, span)| {
            let location = body_location.down(body[..offset].matches('\n').count());
            parse_variant(span, location)
        })
        .collect()
}

/// Parse one variant span such as `Tie`, `Won { winner: Pubkey }` or `Moved(u8, u8)`.
///
/// Returns `None` when the span does not start with an identifier.
pub fn parse_variant(span: &str, location: SourceLocation) -> Option<Variant> {
    let span = skip_attributes(span);
    let name_len = span
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(span.len());
    if name_len == 0 {
        return None;
    }

    let name = span[..name_len].to_string();
    let rest = span[name_len..].trim_start();

    let payload = match rest.chars().next() {
        Some('{') => Payload::Named(named_fields(enclosed(rest, '}'), location)),
        Some('(') => Payload::Tuple(tuple_fields(enclosed(rest, ')'), location)),
        // Unit variant, possibly with an explicit `= 3` discriminant
        _ => Payload::Unit,
    };

    Some(Variant {
        name,
        payload,
        location,
    })
}

/// Text after the leading opener up to the last `close`, or to the end if unterminated
fn enclosed(text: &str, close: char) -> &str {
    let inner = &text[1..];
    match inner.rfind(close) {
        Some(end) => &inner[..end],
        None => inner,
    }
}

fn payload_pieces(text: &str) -> Vec<(usize, &str)> {
    split_top_level(text, &['<', '[', '(', '{'], &['>', ']', ')', '}'])
}

/// `winner: Pubkey, score: i128`
fn named_fields(text: &str, location: SourceLocation) -> Vec<Field> {
    payload_pieces(text)
        .into_iter()
        .filter_map(|(offset, piece)| {
            let (declaration, type_text) = piece.split_once(':')?;
            Some(Field {
                name: declaration.trim().to_string(),
                declaration: declaration.trim().to_string(),
                type_text: type_text.trim().to_string(),
                location: location.down(text[..offset].matches('\n').count()),
            })
        })
        .collect()
}

/// `u8, [u16; 2]`, named by position
fn tuple_fields(text: &str, location: SourceLocation) -> Vec<Field> {
    payload_pieces(text)
        .into_iter()
        .enumerate()
        .map(|(index, (offset, piece))| Field {
            name: String::new(),
            declaration: index.to_string(),
            type_text: piece.to_string(),
            location: location.down(text[..offset].matches('\n').count()),
        })
        .collect()
}

/// Drop leading `#[...]` attributes from a variant span
fn skip_attributes(mut span: &str) -> &str {
    while let Some(rest) = span.strip_prefix("#[") {
        let mut depth = 1usize;
        let mut end = rest.len();
        for (i, c) in rest.char_indices() {
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        end = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        span = rest[end..].trim_start();
    }
    span
}

/// Remove `//` comments, keeping the newline so line numbers still line up
fn strip_line_comments(text: &str) -> String {
    text.lines()
        .map(|line| line.split_once("//").map_or(line, |(code, _)| code))
        .collect::<Vec<_>>()
        .join("\n")
}
