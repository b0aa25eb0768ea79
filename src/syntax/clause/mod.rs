//! Condition clauses.
//!
//! The condition of `out <= '1' when <cond> else '0';` is split on the
//! `and` keyword. Each piece is classified into a [`Clause`] and its signal
//! name resolved against the [`SignalTable`] before any expansion happens.

use super::scanner::Assignment;
use super::{find_keyword, strip_keyword};
use crate::error::{CompileError, Result};
use crate::expand::threshold::{self, ThresholdError};
use crate::expand::{Factor, Term};
use crate::model::{BitField, SignalTable};
use crate::span::Span;

/// One AND-ed condition of an output assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Clause {
    GreaterThan { field: BitField, threshold: u32 },
    EqualTo { field: BitField, threshold: u32 },
    Literal { bit_index: usize, negated: bool },
}

/// A classified clause with the text it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedClause {
    pub clause: Clause,
    pub text: String,
    pub span: Span,
}

impl ParsedClause {
    /// Alternative terms that satisfy this clause. Never empty.
    pub fn expand(&self) -> Result<Vec<Term>> {
        let expanded = match &self.clause {
            Clause::GreaterThan { field, threshold } => {
                threshold::greater_than(field.start_bit, field.width, *threshold)
                    .map_err(|e| self.threshold_error(field, e))?
            }
            Clause::EqualTo { field, threshold } => {
                vec![threshold::equal_to(field.start_bit, field.width, *threshold)
                    .map_err(|e| self.threshold_error(field, e))?]
            }
            Clause::Literal { bit_index, negated } => vec![Term::single(Factor {
                bit: *bit_index,
                negated: *negated,
            })],
        };
        Ok(expanded)
    }

    fn threshold_error(&self, field: &BitField, err: ThresholdError) -> CompileError {
        match err {
            ThresholdError::Unsupported { op, threshold } => CompileError::UnsupportedThreshold {
                op,
                field: field.name.clone(),
                threshold,
                span: self.span,
            },
            ThresholdError::Empty => CompileError::EmptyExpansion {
                clause: self.text.clone(),
                span: self.span,
            },
        }
    }
}

/// Extract and classify the condition clauses of an output assignment.
pub fn parse_condition(assignment: &Assignment, table: &SignalTable) -> Result<Vec<ParsedClause>> {
    let rhs = assignment.rhs.node.as_str();
    let base = assignment.rhs.span.start as usize;

    let when = find_keyword(rhs, "when", 0);
    if when.is_none() && matches!(rhs.trim(), "'0'" | "'1'") {
        return Err(CompileError::MalformedAssignment {
            output: assignment.target.clone(),
            span: assignment.span,
        });
    }

    let start = when.map_or(0, |i| i + "when".len());
    let end = find_keyword(rhs, "else", start).unwrap_or(rhs.len());

    let mut clauses = Vec::new();
    let mut pos = start;
    loop {
        let stop = find_keyword(&rhs[..end], "and", pos).unwrap_or(end);
        let piece = &rhs[pos..stop];
        let lead = piece.len() - piece.trim_start().len();
        let span = Span::new(
            (base + pos + lead) as u32,
            (base + pos + piece.trim_end().len().max(lead)) as u32,
        );
        clauses.push(classify(piece, span, &assignment.target, table)?);
        if stop == end {
            break;
        }
        pos = stop + "and".len();
    }
    Ok(clauses)
}

fn classify(piece: &str, span: Span, output: &str, table: &SignalTable) -> Result<ParsedClause> {
    let stripped: String = piece.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    let stripped = stripped.trim();
    let (not_keyword, body) = match strip_keyword(stripped, "not") {
        Some(rest) => (true, rest.trim()),
        None => (false, stripped),
    };
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    let text = if not_keyword {
        format!("not {}", compact)
    } else {
        compact.clone()
    };

    if compact.is_empty() {
        return Err(CompileError::MalformedAssignment {
            output: output.to_string(),
            span,
        });
    }

    let resolve = |name: &str| -> Result<BitField> {
        table
            .get(name)
            .cloned()
            .ok_or_else(|| CompileError::UnresolvedSignal {
                name: name.to_string(),
                clause: text.clone(),
                output: output.to_string(),
                span,
            })
    };
    let literal = |bit_index: usize, negated: bool| ParsedClause {
        clause: Clause::Literal {
            bit_index,
            negated: negated != not_keyword,
        },
        text: text.clone(),
        span,
    };
    let comparison = |clause: Clause| -> Result<ParsedClause> {
        if not_keyword {
            return Err(CompileError::NegatedComparison {
                clause: text.clone(),
                output: output.to_string(),
                span,
            });
        }
        Ok(ParsedClause {
            clause,
            text: text.clone(),
            span,
        })
    };

    if compact.contains('<') {
        return Err(CompileError::UnsupportedComparator {
            clause: text.clone(),
            output: output.to_string(),
            span,
        });
    }

    if let Some((name, value)) = compact.split_once('=') {
        match value {
            "'1'" => return Ok(literal(resolve(name)?.start_bit, false)),
            "'0'" => return Ok(literal(resolve(name)?.start_bit, true)),
            _ => {}
        }
    }

    let unquoted: String = compact.chars().filter(|c| !matches!(c, '\'' | '"')).collect();

    if let Some((name, value)) = unquoted.split_once('>') {
        if let Ok(threshold) = value.parse::<u32>() {
            let field = resolve(name)?;
            return comparison(Clause::GreaterThan { field, threshold });
        }
    }

    if let Some((name, value)) = unquoted.split_once('=') {
        if let Ok(threshold) = value.parse::<u32>() {
            let field = resolve(name)?;
            return comparison(Clause::EqualTo { field, threshold });
        }
    }

    let (negated, name) = match unquoted.strip_prefix('!') {
        Some(name) => (true, name),
        None => (false, unquoted.as_str()),
    };
    Ok(literal(resolve(name)?.start_bit, negated))
}

#[cfg(test)]
mod tests;
