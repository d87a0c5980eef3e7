// Integration tests for the account size calculator

use countoor::layout::{compute, Diagnostic, Overrides};
use countoor::report::render_snippet;

const EXAMPLE: &str = r#"#[account]
pub struct MyData {
    pub val: u16,
    pub is_cool: bool,
    pub state: GameState,
    pub van : [f64; 5],
    pub maybe: Option<i128>
    pub players: Vec<Pubkey> // we want to support up to 10 players
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq)]
pub enum GameState {
    Active,
    Tie,
    Won { winner: Pubkey, score: i128 },
}
"#;

fn one_field(type_text: &str) -> String {
    format!("pub struct Sample {{\n    pub value: {},\n}}", type_text)
}

fn total(source: &str) -> usize {
    compute(source, &Overrides::default()).total_size
}

fn unresolved_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::UnresolvedType { .. }))
        .count()
}

#[test]
fn test_primitive_sizes() {
    let cases = [
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
        ("Pubkey", 32),
    ];

    for (type_text, expected) in cases {
        assert_eq!(total(&one_field(type_text)), expected, "size of {}", type_text);
    }
}

#[test]
fn test_example_account() {
    let computation = compute(EXAMPLE, &Overrides::default());

    assert_eq!(computation.total_size, 2 + 1 + 49 + 40 + 17 + 324);
    assert_eq!(
        computation.derivation,
        vec![
            "+ 2 // pub val: u16",
            "+ 1 // pub is_cool: bool",
            "+ 49 // pub state: GameState",
            "+ 40 // pub van: [f64; 5]",
            "+ 17 // pub maybe: Option<i128>",
            "+ 324 // pub players: Vec<Pubkey>",
        ]
    );
    assert_eq!(
        computation.expressions,
        vec![
            "u16",
            "bool",
            "1 + pubkey + i128",
            "f64 * 5",
            "1 + i128",
            "4 + pubkey * 10",
        ]
    );
    assert_eq!(computation.errors().count(), 0);
    assert_eq!(computation.size_table.lookup("gamestate"), Some(49));
    assert_eq!(computation.size_table.lookup("GameState"), Some(49));
}

#[test]
fn test_example_snippet() {
    let computation = compute(EXAMPLE, &Overrides::default());
    let snippet = render_snippet(EXAMPLE, &computation, false);

    assert!(snippet.starts_with("impl MyData {\n    pub const MAX_SIZE: usize = 433;\n"));
    assert!(snippet.contains("    // + 324 // pub players: Vec<Pubkey>\n"));
}

#[test]
fn test_union_with_byte_payload() {
    let union = "pub enum Flag {\n    NoPayload,\n    WithByte { b: u8 },\n}\n";
    let record = format!("{}pub struct Holder {{\n    pub flag: Flag,\n}}", union);
    let bare = "pub struct Holder {\n}";

    let computation = compute(&record, &Overrides::default());
    assert_eq!(computation.size_table.lookup("flag"), Some(2));
    assert_eq!(computation.total_size, total(bare) + 2);
}

#[test]
fn test_unit_only_union_is_one_byte() {
    let source = "pub enum Side {\n    Buy,\n    Sell,\n}\npub struct Order {\n    pub side: Side,\n}";
    assert_eq!(total(source), 1);
}

#[test]
fn test_fixed_array() {
    assert_eq!(total(&one_field("[u16; 5]")), 10);
}

#[test]
fn test_sequence_uses_assumed_length() {
    let source = one_field("Vec<Pubkey>");
    assert_eq!(total(&source), 4 + 32 * 10);

    let overrides = Overrides::default().with_sequence_length(3);
    let computation = compute(&source, &overrides);
    assert_eq!(computation.total_size, 4 + 32 * 3);
    assert_eq!(computation.warnings().count(), 1);
}

#[test]
fn test_recompute_is_idempotent() {
    let overrides = Overrides::default()
        .with_sequence_length(3)
        .with_string_length(20);

    let first = compute(EXAMPLE, &overrides);
    let second = compute(EXAMPLE, &overrides);
    assert_eq!(first, second);
}

#[test]
fn test_string_uses_assumed_length() {
    assert_eq!(total(&one_field("String")), 4 + 1);

    let overrides = Overrides::default().with_string_length(32);
    assert_eq!(compute(&one_field("String"), &overrides).total_size, 4 + 32);
}

#[test]
fn test_optional_fields() {
    assert_eq!(total(&one_field("Option<u32>")), 5);

    let computation = compute(&one_field("Option<Unknown>"), &Overrides::default());
    assert_eq!(computation.total_size, 1);
    assert_eq!(unresolved_count(&computation.diagnostics), 1);
    assert_eq!(computation.errors().count(), 1);
}

#[test]
fn test_nested_shapes() {
    assert_eq!(total(&one_field("Vec<Option<u8>>")), 4 + 2 * 10);
    assert_eq!(total(&one_field("[[u8; 2]; 3]")), 6);
    assert_eq!(total(&one_field("Option<[u8; 32]>")), 33);
}

#[test]
fn test_record_before_union_resolves() {
    let source = "pub struct Game {\n    pub state: Phase,\n    pub turn: u8,\n}\n\npub enum Phase {\n    Waiting,\n    Playing { round: u32 },\n}";
    let computation = compute(source, &Overrides::default());

    assert_eq!(computation.total_size, 5 + 1);
    assert_eq!(computation.errors().count(), 0);
}

#[test]
fn test_undeclared_name_only_drops_its_field() {
    let source = "pub struct Pool {\n    pub authority: Pubkey,\n    pub curve: Curve,\n    pub fee: u16,\n}";
    let computation = compute(source, &Overrides::default());

    assert_eq!(computation.total_size, 32 + 2);
    assert_eq!(unresolved_count(&computation.diagnostics), 1);
    assert_eq!(computation.derivation.len(), 2);

    match &computation.diagnostics[0] {
        Diagnostic::UnresolvedType { name, location, .. } => {
            assert_eq!(name, "Curve");
            assert_eq!(location.line, 3);
        }
        other => panic!("Expected an unresolved type, got {:?}", other),
    }
}

#[test]
fn test_custom_type_override() {
    let source = one_field("Curve");
    let overrides = Overrides::default().with_type("Curve", 12);
    let computation = compute(&source, &overrides);

    assert_eq!(computation.total_size, 12);
    assert_eq!(computation.errors().count(), 0);
}

#[test]
fn test_records_can_embed_earlier_records() {
    let source = "pub struct Point {\n    pub x: i64,\n    pub y: i64,\n}\npub struct Segment {\n    pub from: Point,\n    pub to: Point,\n}";
    let computation = compute(source, &Overrides::default());

    assert_eq!(computation.records.len(), 2);
    assert_eq!(computation.records[1].size, 32);
    assert_eq!(computation.total_size, 16 + 32);
}

#[test]
fn test_redefinition_keeps_first_size() {
    let source = "pub enum Mode {\n    A,\n}\npub enum Mode {\n    A,\n    B { big: u128 },\n}\npub struct S {\n    pub mode: Mode,\n}";
    let computation = compute(source, &Overrides::default());

    assert_eq!(computation.total_size, 1);
    assert!(computation
        .warnings()
        .any(|d| matches!(d, Diagnostic::Redefinition { .. })));
}

#[test]
fn test_empty_and_garbled_input() {
    assert_eq!(total(""), 0);
    assert_eq!(total("fn main() {}"), 0);
    assert_eq!(total("pub struct {{{{ :: ,,, >>> [u8; ]"), 0);
    assert_eq!(total("pub enum Broken { A { x: u8, "), 0);
}

#[test]
fn test_overrides_round_trip_through_table() {
    let overrides = Overrides::default()
        .with_sequence_length(7)
        .with_string_length(40)
        .with_type("Extra", 3);
    let computation = compute(&one_field("u8"), &overrides);

    assert_eq!(computation.size_table.overrides(), overrides);
}

#[test]
fn test_oversized_sizes_are_reported_not_panicked() {
    let computation = compute(
        "pub struct P {\n    pub a: [u128; 18446744073709551615],\n}",
        &Overrides::default(),
    );
    assert_eq!(computation.total_size, 0);
    assert_eq!(computation.errors().count(), 1);
    assert!(matches!(
        computation.diagnostics[0],
        Diagnostic::SizeOverflow { .. }
    ));

    let computation = compute(
        "pub struct P {\n    pub a: [u8; 18446744073709551615],\n    pub b: u8,\n}",
        &Overrides::default(),
    );
    assert_eq!(computation.total_size, usize::MAX);
    assert_eq!(computation.derivation.len(), 1);
    assert_eq!(computation.errors().count(), 1);

    let overrides = Overrides::default().with_sequence_length(usize::MAX);
    let computation = compute(&one_field("Vec<u16>"), &overrides);
    assert_eq!(computation.total_size, 0);
    assert_eq!(computation.errors().count(), 1);
}

#[test]
fn test_total_across_structs_does_not_overflow() {
    let source = "pub struct A {\n    pub a: [u8; 18446744073709551615],\n}\npub struct B {\n    pub b: u8,\n}";
    let computation = compute(source, &Overrides::default());

    assert_eq!(computation.records[1].size, 1);
    assert_eq!(computation.total_size, usize::MAX);
    assert!(matches!(
        &computation.diagnostics[0],
        Diagnostic::SizeOverflow { name, .. } if name == "B"
    ));
}

#[test]
fn test_block_commented_fields_are_not_counted() {
    let source = "pub struct P {\n    pub a: u8,\n    /*\n    pub old: u128,\n    */\n}";
    let computation = compute(source, &Overrides::default());

    assert_eq!(computation.total_size, 1);
    assert_eq!(computation.derivation, vec!["+ 1 // pub a: u8"]);

    let source = "pub enum Mode {\n    Off,\n    /* Legacy { data: [u8; 64] }, */\n    On { level: u8 },\n}\npub struct S {\n    pub mode: Mode,\n}";
    assert_eq!(total(source), 2);
}
