//! Diagnostics collected while sizing declarations
//!
//! Nothing here is fatal. The engine records a [`Diagnostic`] and keeps going,
//! so the caller always gets a (possibly partial) result together with the
//! list of everything that went wrong or was assumed along the way.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// How a diagnostic should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A field or payload names a type that is not in the size table
    UnresolvedType {
        name: String,
        /// The field as written, `declaration: type`
        field: String,
        location: SourceLocation,
    },

    /// A `Vec`, `Option` or array wrapper whose inner syntax could not be read
    MalformedShape {
        type_text: String,
        message: String,
        location: SourceLocation,
    },

    /// A `Vec<T>` was sized with the assumed element count
    AssumedSequenceLength {
        length: usize,
        location: SourceLocation,
    },

    /// A field, variant or struct whose byte count does not fit in a `usize`
    SizeOverflow {
        name: String,
        location: SourceLocation,
    },

    /// A declaration reuses a name already in the size table; the first size wins
    Redefinition {
        name: String,
        location: SourceLocation,
    },
}

impl Diagnostic {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Diagnostic::UnresolvedType { location, .. }
            | Diagnostic::MalformedShape { location, .. }
            | Diagnostic::AssumedSequenceLength { location, .. }
            | Diagnostic::SizeOverflow { location, .. }
            | Diagnostic::Redefinition { location, .. } => location,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UnresolvedType { .. }
            | Diagnostic::MalformedShape { .. }
            | Diagnostic::SizeOverflow { .. } => Severity::Error,
            Diagnostic::AssumedSequenceLength { .. } | Diagnostic::Redefinition { .. } => {
                Severity::Warning
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedType {
                name,
                field,
                location,
            } => {
                write!(
                    f,
                    "no type `{}` in size table (for `{}`) at line {}",
                    name, field, location.line
                )
            }
            Diagnostic::MalformedShape {
                type_text,
                message,
                location,
            } => {
                write!(
                    f,
                    "cannot read type `{}` at line {}: {}",
                    type_text, location.line, message
                )
            }
            Diagnostic::AssumedSequenceLength { length, location } => {
                write!(
                    f,
                    "spotted `Vec` at line {}, assuming length {}",
                    location.line, length
                )
            }
            Diagnostic::SizeOverflow { name, location } => {
                write!(
                    f,
                    "`{}` at line {} is too large to size; left out",
                    name, location.line
                )
            }
            Diagnostic::Redefinition { name, location } => {
                write!(
                    f,
                    "`{}` at line {} is already sized; keeping the earlier size",
                    name, location.line
                )
            }
        }
    }
}

impl std::error::Error for Diagnostic {}
