// Layout constants for Borsh-serialized Anchor accounts

/// Enum discriminant, regardless of variant count
pub const DISCRIMINANT_SIZE: usize = 1;

/// `Option<T>` presence flag
pub const OPTION_FLAG_SIZE: usize = 1;

/// `u32` length prefix written before `Vec<T>` and `String` contents
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Elements assumed for every `Vec<T>` unless overridden
pub const DEFAULT_SEQUENCE_LENGTH: usize = 10;

/// Bytes assumed for every `String` unless overridden
pub const DEFAULT_STRING_LENGTH: usize = 1;

/// Account discriminator Anchor prepends to every account it initializes
pub const ACCOUNT_DISCRIMINATOR_SIZE: usize = 8;

/// Fixed sizes seeded into every size table
pub const PRIMITIVE_SIZES: &[(&str, usize)] = &[
    ("bool", 1),
    ("u8", 1),
    ("i8", 1),
    ("u16", 2),
    ("i16", 2),
    ("u32", 4),
    ("i32", 4),
    ("f32", 4),
    ("u64", 8),
    ("i64", 8),
    ("f64", 8),
    ("u128", 16),
    ("i128", 16),
    ("pubkey", 32),
];
