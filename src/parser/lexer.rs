//! Section splitter for declaration text
//!
//! Scans raw text for the three introducers (`pub enum`, `pub struct`, `impl`)
//! and cuts it into [`Declaration`] blocks. The scan is a plain character walk:
//! comments and string literals are stepped over, introducers only match at
//! identifier boundaries, and everything inside an `impl` body is ignored so
//! that method blocks are never mistaken for records.
//!
//! Matching is case-insensitive for `pub`-prefixed introducers and `impl`. A
//! bare `struct`/`enum` (no visibility) is accepted only in lowercase, since
//! `Enum` or `Struct` on their own are far more likely to be type names.

use super::ast::{DeclKind, Declaration, SourceLocation};

/// Declarations grouped by kind, each group in source order.
///
/// Unions come first so they can be sized before any record that embeds
/// them by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sections {
    pub unions: Vec<Declaration>,
    pub records: Vec<Declaration>,
    pub skipped: Vec<Declaration>,
}

impl Sections {
    /// All declarations: unions, then records, then skipped blocks
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.unions
            .iter()
            .chain(self.records.iter())
            .chain(self.skipped.iter())
    }

    pub fn len(&self) -> usize {
        self.unions.len() + self.records.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split text into declaration blocks.
pub fn split_sections(input: &str) -> Sections {
    Lexer::new(input).split()
}

/// Blank out `/* */` comments, keeping newlines so line numbers still match.
///
/// `//` comments and string literals are copied through untouched.
pub(crate) fn strip_block_comments(text: &str) -> String {
    Lexer::new(text).blank_block_comments()
}

/// Position of one introducer keyword in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Introducer {
    kind: DeclKind,
    /// Index of the first character (`p` of `pub`, or the keyword itself)
    start: usize,
    /// Index just past the keyword
    keyword_end: usize,
}

/// Character scanner over declaration text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line_starts: Vec<usize>,
}

impl Lexer {
    /// Create a new lexer for the given text.
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let mut line_starts = vec![0];
        line_starts.extend(
            input
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == '\n')
                .map(|(i, _)| i + 1),
        );

        Self {
            input,
            position: 0,
            line_starts,
        }
    }

    /// Cut the whole input into declaration blocks
    pub fn split(&mut self) -> Sections {
        let hits = self.scan_introducers();
        let mut sections = Sections::default();

        for (i, hit) in hits.iter().enumerate() {
            // A block never extends past the next introducer, so one
            // unterminated body cannot swallow the rest of the text.
            let end = hits.get(i + 1).map_or(self.input.len(), |next| next.start);
            let decl = self.cut_declaration(hit, end);

            match decl.kind {
                DeclKind::Union => sections.unions.push(decl),
                DeclKind::Record => sections.records.push(decl),
                DeclKind::Other => sections.skipped.push(decl),
            }
        }

        sections
    }

    /// Find every introducer outside comments, strings and `impl` bodies
    fn scan_introducers(&mut self) -> Vec<Introducer> {
        let mut hits = Vec::new();
        let mut depth = 0usize;
        // Brace depth at which the enclosing impl body opened
        let mut impl_floor: Option<usize> = None;
        let mut pending_impl = false;

        self.position = 0;
        while let Some(ch) = self.peek() {
            match ch {
                '/' if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_ahead(1) == Some('*') => self.skip_block_comment(),
                '"' => self.skip_string(),
                '{' => {
                    if pending_impl {
                        impl_floor = Some(depth);
                        pending_impl = false;
                    }
                    depth += 1;
                    self.advance();
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    if impl_floor == Some(depth) {
                        impl_floor = None;
                    }
                    self.advance();
                }
                ';' => {
                    pending_impl = false;
                    self.advance();
                }
                c if is_ident_start(c) => {
                    let start = self.position;
                    let word = self.read_identifier();
                    if impl_floor.is_some() {
                        continue;
                    }
                    if let Some(hit) = self.introducer_at(start, &word) {
                        if hit.kind == DeclKind::Other {
                            pending_impl = true;
                        }
                        self.position = hit.keyword_end;
                        hits.push(hit);
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }

        hits
    }

    /// Decide whether `word` (already consumed, starting at `start`) opens a block
    fn introducer_at(&mut self, start: usize, word: &str) -> Option<Introducer> {
        let keyword_end = self.position;
        let hit = |kind| {
            Some(Introducer {
                kind,
                start,
                keyword_end,
            })
        };

        match word {
            "struct" => return hit(DeclKind::Record),
            "enum" => return hit(DeclKind::Union),
            _ => {}
        }

        if word.eq_ignore_ascii_case("impl") {
            return hit(DeclKind::Other);
        }
        if !word.eq_ignore_ascii_case("pub") {
            return None;
        }

        // `pub` [ `(crate)` ] `struct` | `enum`
        let after_pub = self.position;
        self.skip_inline_whitespace();
        if self.peek() == Some('(') {
            while let Some(c) = self.advance() {
                if c == ')' {
                    break;
                }
            }
            self.skip_inline_whitespace();
        }

        let kind = match self.peek() {
            Some(c) if is_ident_start(c) => {
                let next = self.read_identifier();
                if next.eq_ignore_ascii_case("struct") {
                    Some(DeclKind::Record)
                } else if next.eq_ignore_ascii_case("enum") {
                    Some(DeclKind::Union)
                } else {
                    None
                }
            }
            _ => None,
        };

        match kind {
            Some(kind) => Some(Introducer {
                kind,
                start,
                keyword_end: self.position,
            }),
            None => {
                self.position = after_pub;
                None
            }
        }
    }

    /// Build the declaration for one introducer, looking no further than `end`
    fn cut_declaration(&self, hit: &Introducer, end: usize) -> Declaration {
        let header_end = (hit.keyword_end..end)
            .find(|&i| matches!(self.input[i], '{' | ';'))
            .unwrap_or(end);

        let name = match hit.kind {
            DeclKind::Other => self.text(hit.keyword_end, header_end).trim().to_string(),
            _ => self.first_identifier(hit.keyword_end, header_end),
        };

        let (body_start, body_end) = if self.input.get(header_end) == Some(&'{') {
            let close = self.closing_brace(header_end, end).unwrap_or(end);
            (header_end + 1, close)
        } else {
            (header_end, header_end)
        };

        Declaration {
            kind: hit.kind,
            name,
            body: self.text(body_start, body_end),
            body_location: self.location_at(body_start),
            location: self.location_at(hit.start),
        }
    }

    /// Index of the `}` matching the `{` at `open`, if it occurs before `end`
    fn closing_brace(&self, open: usize, end: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = open;

        while i < end {
            match self.input[i] {
                '/' if self.input.get(i + 1) == Some(&'/') => {
                    while i < end && self.input[i] != '\n' {
                        i += 1;
                    }
                    continue;
                }
                '/' if self.input.get(i + 1) == Some(&'*') => {
                    i += 2;
                    while i < end && !(self.input[i] == '*' && self.input.get(i + 1) == Some(&'/')) {
                        i += 1;
                    }
                    i += 2;
                    continue;
                }
                '"' => {
                    i += 1;
                    while i < end && self.input[i] != '"' {
                        if self.input[i] == '\\' {
                            i += 1;
                        }
                        i += 1;
                    }
                    i += 1;
                    continue;
                }
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }

        None
    }

    fn first_identifier(&self, from: usize, to: usize) -> String {
        self.input[from..to]
            .iter()
            .skip_while(|c| !is_ident_start(**c))
            .take_while(|c| is_ident_continue(**c))
            .collect()
    }

    fn text(&self, from: usize, to: usize) -> String {
        self.input[from.min(to)..to].iter().collect()
    }

    /// Line/column of a character index (1-based)
    fn location_at(&self, index: usize) -> SourceLocation {
        let line = self.line_starts.partition_point(|&start| start <= index);
        let column = index - self.line_starts[line - 1] + 1;
        SourceLocation::new(line, column)
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if is_ident_continue(ch) {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn blank_block_comments(&mut self) -> String {
        let mut out = String::with_capacity(self.input.len());

        self.position = 0;
        while let Some(ch) = self.peek() {
            match ch {
                '/' if self.peek_ahead(1) == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        out.push(c);
                        self.advance();
                    }
                }
                '/' if self.peek_ahead(1) == Some('*') => {
                    let start = self.position;
                    self.skip_block_comment();
                    out.extend(
                        self.input[start..self.position]
                            .iter()
                            .map(|&c| if c == '\n' { '\n' } else { ' ' }),
                    );
                }
                '"' => {
                    let start = self.position;
                    self.skip_string();
                    out.extend(&self.input[start..self.position]);
                }
                _ => {
                    out.push(ch);
                    self.advance();
                }
            }
        }

        out
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */); an unterminated one runs to the end
    fn skip_block_comment(&mut self) {
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    /// Skip a string literal, honoring backslash escapes
    fn skip_string(&mut self) {
        self.advance(); // opening quote
        while let Some(ch) = self.advance() {
            match ch {
                '\\' => {
                    self.advance();
                }
                '"' => break,
                _ => {}
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
