// Declaration structures produced by the parser and consumed by the layout engine

/// Source location information for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Location `lines` lines further down, at column 1
    pub fn down(self, lines: usize) -> Self {
        if lines == 0 {
            self
        } else {
            Self::new(self.line + lines, 1)
        }
    }
}

/// What kind of block an introducer keyword opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeclKind {
    /// `pub enum`
    Union,
    /// `pub struct`
    Record,
    /// `impl` and anything else we only recognize to skip
    Other,
}

/// One top-level block cut out of the raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// Text between the block's outer braces (empty if there were none)
    pub body: String,
    /// Location of the first character of `body`
    pub body_location: SourceLocation,
    /// Location of the introducer keyword
    pub location: SourceLocation,
}

/// A named field of a record or a variant payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Bare field name (`pub` stripped); empty for tuple payload slots
    pub name: String,
    /// Everything left of the `:` as written, echoed into the derivation trail
    pub declaration: String,
    /// Declared type text, trimmed of trailing punctuation
    pub type_text: String,
    pub location: SourceLocation,
}

/// Payload carried by an enum variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Unit,
    Named(Vec<Field>),
    Tuple(Vec<Field>),
}

impl Payload {
    pub fn fields(&self) -> &[Field] {
        match self {
            Payload::Unit => &[],
            Payload::Named(fields) | Payload::Tuple(fields) => fields,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Payload::Unit)
    }
}

/// One alternative of an enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub payload: Payload,
    pub location: SourceLocation,
}

/// Parsed shape of a field's declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Vec<T>`: length prefix plus an assumed number of elements
    Sequence(Box<TypeExpr>),
    /// `Option<T>`: presence flag plus the inner value
    Optional(Box<TypeExpr>),
    /// `String`: length prefix plus an assumed byte length
    Text,
    /// `[T; N]`
    Array(Box<TypeExpr>, usize),
    /// Anything else, looked up by lowercase name
    Named(String),
}

impl TypeExpr {
    /// Lowercase rendering used in symbolic size expressions
    pub fn symbol(&self) -> String {
        match self {
            TypeExpr::Sequence(inner) => format!("vec<{}>", inner.symbol()),
            TypeExpr::Optional(inner) => format!("option<{}>", inner.symbol()),
            TypeExpr::Text => "string".to_string(),
            TypeExpr::Array(inner, len) => format!("[{}; {}]", inner.symbol(), len),
            TypeExpr::Named(name) => name.to_lowercase(),
        }
    }
}
