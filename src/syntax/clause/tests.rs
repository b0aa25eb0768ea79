use super::*;
use crate::span::Spanned;
use crate::syntax::scanner::InputDecl;

/// `n_t3_full` 0..=2, `n_t3_short` 3..=5, `c_0` 6, `veto` 7.
fn table() -> SignalTable {
    let decl = |name: &str, width: usize| InputDecl {
        name: name.to_string(),
        width,
        span: Span::dummy(),
    };
    SignalTable::build(&[
        decl("n_t3_full", 3),
        decl("n_t3_short", 3),
        decl("c_0", 1),
        decl("veto", 1),
    ])
    .unwrap()
}

fn assignment(target: &str, rhs: &str) -> Assignment {
    Assignment {
        target: target.to_string(),
        rhs: Spanned::new(rhs.to_string(), Span::new(100, 100 + rhs.len() as u32)),
        span: Span::dummy(),
    }
}

fn parse(rhs: &str) -> Result<Vec<ParsedClause>> {
    parse_condition(&assignment("zzx", rhs), &table())
}

fn clauses(rhs: &str) -> Vec<Clause> {
    parse(rhs).unwrap().into_iter().map(|c| c.clause).collect()
}

#[test]
fn test_quoted_zero_is_negated_literal() {
    let parsed = parse(" '1' when veto='0' else '0'").unwrap();
    assert_eq!(
        parsed[0].clause,
        Clause::Literal {
            bit_index: 7,
            negated: true
        }
    );
    let terms = parsed[0].expand().unwrap();
    assert_eq!(terms.len(), 1);
    assert_eq!(terms[0].to_string(), "!7");
}

#[test]
fn test_quoted_one_is_literal() {
    assert_eq!(
        clauses(" '1' when (c_0 = '1') else '0'"),
        vec![Clause::Literal {
            bit_index: 6,
            negated: false
        }]
    );
}

#[test]
fn test_comparisons_resolve_fields() {
    let t = table();
    let full = t.get("n_t3_full").unwrap().clone();
    let short = t.get("n_t3_short").unwrap().clone();
    assert_eq!(
        clauses(" '1' when (n_t3_full>1) and (n_t3_short = 0) else '0'"),
        vec![
            Clause::GreaterThan {
                field: full,
                threshold: 1
            },
            Clause::EqualTo {
                field: short,
                threshold: 0
            },
        ]
    );
}

#[test]
fn test_condition_without_when() {
    let parsed = parse(" (n_t3_full>1) and (n_t3_short>0) else '0'").unwrap();
    let texts: Vec<&str> = parsed.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["n_t3_full>1", "n_t3_short>0"]);
}

#[test]
fn test_bare_and_negated_references() {
    assert_eq!(
        clauses(" '1' when c_0 and !veto and not c_0 else '0'"),
        vec![
            Clause::Literal {
                bit_index: 6,
                negated: false
            },
            Clause::Literal {
                bit_index: 7,
                negated: true
            },
            Clause::Literal {
                bit_index: 6,
                negated: true
            },
        ]
    );
}

#[test]
fn test_keyword_case_and_line_breaks() {
    let parsed = parse(" '1' WHEN (c_0='1')\n      AND (veto='0') ELSE '0'").unwrap();
    assert_eq!(parsed.len(), 2);
}

#[test]
fn test_clause_spans_point_at_text() {
    let rhs = " '1' when (n_t3_full>1) and veto='0' else '0'";
    let parsed = parse(rhs).unwrap();
    let slice = |span: Span| &rhs[(span.start - 100) as usize..(span.end - 100) as usize];
    assert_eq!(slice(parsed[0].span), "(n_t3_full>1)");
    assert_eq!(slice(parsed[1].span), "veto='0'");
}

#[test]
fn test_less_than_is_rejected() {
    match parse(" '1' when (n_t3_full<2) else '0'") {
        Err(CompileError::UnsupportedComparator { clause, output, .. }) => {
            assert_eq!(clause, "n_t3_full<2");
            assert_eq!(output, "zzx");
        }
        other => panic!("expected UnsupportedComparator, got {:?}", other),
    }
}

#[test]
fn test_unknown_signal_is_reported() {
    match parse(" '1' when (n_t3_full>1) and (klm_hit='1') else '0'") {
        Err(CompileError::UnresolvedSignal {
            name,
            clause,
            output,
            ..
        }) => {
            assert_eq!(name, "klm_hit");
            assert_eq!(clause, "klm_hit='1'");
            assert_eq!(output, "zzx");
        }
        other => panic!("expected UnresolvedSignal, got {:?}", other),
    }
}

#[test]
fn test_negated_comparison_is_rejected() {
    assert!(matches!(
        parse(" '1' when not (n_t3_full>1) else '0'"),
        Err(CompileError::NegatedComparison { .. })
    ));
}

#[test]
fn test_empty_clause_is_malformed() {
    assert!(matches!(
        parse(" '1' when else '0'"),
        Err(CompileError::MalformedAssignment { .. })
    ));
    assert!(matches!(
        parse(" '0'"),
        Err(CompileError::MalformedAssignment { .. })
    ));
}

#[test]
fn test_threshold_errors_carry_clause_span() {
    let rhs = " '1' when (n_t3_full>5) else '0'";
    match parse(rhs).unwrap()[0].expand() {
        Err(CompileError::UnsupportedThreshold {
            op,
            field,
            threshold,
            span,
        }) => {
            assert_eq!((op, field.as_str(), threshold), (">", "n_t3_full", 5));
            assert_eq!(span, Span::new(110, 123));
        }
        other => panic!("expected UnsupportedThreshold, got {:?}", other),
    }

    match parse(" '1' when veto>1 else '0'").unwrap()[0].expand() {
        Err(CompileError::EmptyExpansion { clause, .. }) => assert_eq!(clause, "veto>1"),
        other => panic!("expected EmptyExpansion, got {:?}", other),
    }
}
