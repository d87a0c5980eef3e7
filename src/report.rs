//! Rust snippets built from a [`Computation`]
//!
//! Pure string formatting: one `impl` block per struct carrying its
//! `MAX_SIZE` constant and derivation trail, optionally followed by an
//! Anchor `#[derive(Accounts)]` initializer that reserves the 8-byte account
//! discriminator on top.

use crate::layout::constants::ACCOUNT_DISCRIMINATOR_SIZE;
use crate::layout::{Computation, RecordLayout};
use std::fmt::Write;

/// Placeholder shown for text that has no sizable struct
pub const NOTHING_DETECTED: &str = "// cannot detect account size";

/// Placeholder shown for empty input
pub const EMPTY_INPUT: &str = "// write a valid rust account";

/// Render the snippet for every struct in `computation`.
///
/// `source` is only consulted to tell empty input apart from input that
/// contained nothing sizable.
pub fn render_snippet(source: &str, computation: &Computation, with_initializer: bool) -> String {
    if source.trim().is_empty() {
        return EMPTY_INPUT.to_string();
    }
    if computation.total_size == 0 {
        return NOTHING_DETECTED.to_string();
    }

    let mut out = String::new();
    for (i, record) in computation.records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_impl(&mut out, record);
        if with_initializer {
            out.push('\n');
            render_initializer(&mut out, &record.name);
        }
    }
    out
}

fn render_impl(out: &mut String, record: &RecordLayout) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "impl {} {{", record.name);
    let _ = writeln!(out, "    pub const MAX_SIZE: usize = {};", record.size);
    for line in &record.derivation {
        let _ = writeln!(out, "    // {}", line);
    }
    out.push_str("}\n");
}

fn render_initializer(out: &mut String, name: &str) {
    let _ = writeln!(out, "#[derive(Accounts)]");
    let _ = writeln!(out, "pub struct Initialize{}<'info> {{", name);
    let _ = writeln!(
        out,
        "    #[account(init, payer = signer, space = {} + {}::MAX_SIZE)]",
        ACCOUNT_DISCRIMINATOR_SIZE, name
    );
    let _ = writeln!(out, "    pub acc: Account<'info, {}>,", name);
    let _ = writeln!(out, "    #[account(mut)]");
    let _ = writeln!(out, "    pub signer: Signer<'info>,");
    let _ = writeln!(out, "    pub system_program: Program<'info, System>,");
    out.push_str("}\n");
}
