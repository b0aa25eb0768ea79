use super::*;
use crate::expand::render_expression;
use crate::span::Span;
use crate::syntax::scanner::{scan, Markers};

const SOURCE: &str = "\
architecture rtl of ftd is
  -- Inputs
  signal n_t3_full  : std_logic_vector(2 downto 0);
  signal n_t3_short : std_logic_vector(2 downto 0);
  signal veto       : std_logic;
  signal c_0        : std_logic;
  -- Outputs
  signal zzx : std_logic;
  signal ffy : std_logic;
  signal unused : std_logic;
begin
  ffy <= '1' when (n_t3_full=1) and veto='0' else '0';
  zzx <= (n_t3_full>1) and (n_t3_short>0) else '0';
  internal <= '1' when c_0='1' else '0';
end rtl;
";

fn build(source: &str) -> Result<Model> {
    Model::build(&scan(source, &Markers::default())?)
}

fn decl(name: &str, width: usize) -> InputDecl {
    InputDecl {
        name: name.to_string(),
        width,
        span: Span::dummy(),
    }
}

#[test]
fn test_bit_indices_are_contiguous() {
    let table =
        SignalTable::build(&[decl("a", 3), decl("b", 1), decl("c", 2), decl("d", 1)]).unwrap();
    let mut expected_start = 0;
    for field in table.iter() {
        assert_eq!(field.start_bit, expected_start);
        expected_start += field.width;
    }
    assert_eq!(table.total_bits(), 7);
    let last = table.iter().last().unwrap();
    assert_eq!(last.bits().last(), Some(table.total_bits() - 1));
}

#[test]
fn test_vector_field_covers_its_bits() {
    let table = SignalTable::build(&[decl("veto", 1), decl("n_t3", 3)]).unwrap();
    let field = table.get("n_t3").unwrap();
    assert_eq!(field.start_bit, 1);
    assert_eq!(field.bits().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_duplicate_input_is_rejected() {
    let err = SignalTable::build(&[decl("veto", 1), decl("veto", 1)]).unwrap_err();
    assert!(matches!(err, CompileError::DuplicateSignal { name, .. } if name == "veto"));
}

#[test]
fn test_output_indices_follow_declaration_order() {
    let model = build(SOURCE).unwrap();
    let outputs: Vec<(&str, usize)> = model
        .outputs()
        .map(|o| (o.name.as_str(), o.bit_index))
        .collect();
    assert_eq!(outputs, vec![("zzx", 0), ("ffy", 1), ("unused", 2)]);
}

#[test]
fn test_end_to_end_dnf_order() {
    let model = build(SOURCE).unwrap();
    let zzx = model.compiled(0).unwrap();
    assert_eq!(zzx.output.name, "zzx");
    assert_eq!(zzx.dnf.len(), 6);
    assert_eq!(
        render_expression(&zzx.dnf),
        "1 * 3 + 2 * 4 + 1 * 5 + 2 * 3 + 1 * 4 + 2 * 5"
    );
}

#[test]
fn test_equality_and_literal_combine() {
    let model = build(SOURCE).unwrap();
    let bit = model.output("ffy").unwrap().bit_index;
    let ffy = model.compiled(bit).unwrap();
    assert_eq!(render_expression(&ffy.dnf), "0 * !1 * !2 * !6");
    assert_eq!(ffy.clauses.len(), 2);
}

#[test]
fn test_compiled_sorted_by_bit_index() {
    let model = build(SOURCE).unwrap();
    let order: Vec<usize> = model
        .compiled_sorted()
        .iter()
        .map(|c| c.output.bit_index)
        .collect();
    assert_eq!(order, vec![0, 1]);
    assert!(model.compiled(2).is_none());
}

#[test]
fn test_evaluate_matches_threshold_semantics() {
    let model = build(SOURCE).unwrap();
    let mut input = vec![false; model.inputs().total_bits()];

    // One full track, no veto: ffy fires, zzx needs two full tracks.
    input[0] = true;
    assert_eq!(model.evaluate(&input), vec![false, true, false]);

    // Two full tracks and one short track.
    input[1] = true;
    input[3] = true;
    assert_eq!(model.evaluate(&input), vec![true, false, false]);

    // Veto suppresses ffy only.
    input[1] = false;
    input[6] = true;
    assert_eq!(model.evaluate(&input), vec![false, false, false]);
}

#[test]
fn test_unknown_signal_aborts_build() {
    let source = SOURCE.replace("(n_t3_short>0)", "(n_t3_long>0)");
    assert!(matches!(
        build(&source),
        Err(CompileError::UnresolvedSignal { name, .. }) if name == "n_t3_long"
    ));
}

#[test]
fn test_build_is_deterministic() {
    assert_eq!(build(SOURCE).unwrap(), build(SOURCE).unwrap());
}

#[test]
fn test_assignments_sharing_a_line_both_compile() {
    let source = SOURCE.replace(
        "  ffy <= '1' when (n_t3_full=1) and veto='0' else '0';\n",
        "  ffy <= '1' when veto='0' else '0'; unused <= '1' when veto='1' else '0';\n",
    );
    let model = build(&source).unwrap();
    let ffy = model.compiled(1).unwrap();
    let unused = model.compiled(2).unwrap();
    assert_eq!(render_expression(&ffy.dnf), "!6");
    assert_eq!(render_expression(&unused.dnf), "6");
}
