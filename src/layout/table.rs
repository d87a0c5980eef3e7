//! Size table: lowercase type name → byte size
//!
//! A fresh table is built for every computation from [`PRIMITIVE_SIZES`] and
//! the caller's [`Overrides`], then grows as enums and structs are resolved.
//! It also carries the two length assumptions used for `Vec<T>` and `String`,
//! so a caller can hand a finished table's [`SizeTable::overrides`] back in
//! when recomputing edited text.

use super::constants::{DEFAULT_SEQUENCE_LENGTH, DEFAULT_STRING_LENGTH, PRIMITIVE_SIZES};
use rustc_hash::FxHashMap;

/// Stand-ins for runtime lengths that static layout cannot know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assumptions {
    /// Elements per `Vec<T>`
    pub sequence_length: usize,
    /// Bytes per `String`
    pub string_length: usize,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            string_length: DEFAULT_STRING_LENGTH,
        }
    }
}

/// Caller-supplied adjustments to the default table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub sequence_length: Option<usize>,
    pub string_length: Option<usize>,
    /// Extra named sizes, e.g. for types declared outside the input text
    pub types: Vec<(String, usize)>,
}

impl Overrides {
    pub fn with_sequence_length(mut self, length: usize) -> Self {
        self.sequence_length = Some(length);
        self
    }

    pub fn with_string_length(mut self, length: usize) -> Self {
        self.string_length = Some(length);
        self
    }

    pub fn with_type(mut self, name: impl Into<String>, size: usize) -> Self {
        self.types.push((name.into(), size));
        self
    }

    /// Assumptions after applying these overrides to the defaults
    pub fn assumptions(&self) -> Assumptions {
        let defaults = Assumptions::default();
        Assumptions {
            sequence_length: self.sequence_length.unwrap_or(defaults.sequence_length),
            string_length: self.string_length.unwrap_or(defaults.string_length),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeTable {
    sizes: FxHashMap<String, usize>,
    assumptions: Assumptions,
    custom: Vec<(String, usize)>,
}

impl SizeTable {
    /// Primitive sizes with default assumptions
    pub fn new() -> Self {
        Self::with_overrides(&Overrides::default())
    }

    pub fn with_overrides(overrides: &Overrides) -> Self {
        let mut table = SizeTable {
            sizes: FxHashMap::default(),
            assumptions: overrides.assumptions(),
            custom: overrides.types.clone(),
        };

        for &(name, size) in PRIMITIVE_SIZES {
            table.insert_or_update(name, size);
        }
        for (name, size) in &overrides.types {
            table.insert_or_update(name, *size);
        }

        table
    }

    /// Size of a type, compared case-insensitively
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.sizes.get(&name.trim().to_lowercase()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn insert_or_update(&mut self, name: &str, size: usize) {
        self.sizes.insert(name.trim().to_lowercase(), size);
    }

    pub fn assumptions(&self) -> Assumptions {
        self.assumptions
    }

    /// Overrides that rebuild this table's assumptions and custom types
    pub fn overrides(&self) -> Overrides {
        Overrides {
            sequence_length: Some(self.assumptions.sequence_length),
            string_length: Some(self.assumptions.string_length),
            types: self.custom.clone(),
        }
    }

    /// All entries sorted by name
    pub fn entries(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .sizes
            .iter()
            .map(|(name, size)| (name.as_str(), *size))
            .collect();
        entries.sort_unstable();
        entries
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl Default for SizeTable {
    fn default() -> Self {
        Self::new()
    }
}
