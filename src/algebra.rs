//! Reading algebra listings back.
//!
//! A listing line is `<bit> : ( <term> + <term> ... )` with terms written
//! as `!`-prefixed or plain bit numbers joined by ` * `. Parsing a listing
//! yields the same terms the model held when it was emitted, which lets a
//! consumer evaluate output bits without the logic source.

use crate::error::{CompileError, Result};
use crate::expand::{self, Factor, Term, AND, OR};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgebraLine {
    pub bit: usize,
    pub terms: Vec<Term>,
}

impl AlgebraLine {
    pub fn evaluate(&self, input: &[bool]) -> bool {
        expand::evaluate(&self.terms, input)
    }
}

/// Parse every non-blank line of a listing.
pub fn parse_listing(text: &str) -> Result<Vec<AlgebraLine>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_line(line).map_err(|reason| CompileError::MalformedListing {
                line: i + 1,
                reason,
            })
        })
        .collect()
}

fn parse_line(line: &str) -> std::result::Result<AlgebraLine, String> {
    let (bit, expr) = line
        .split_once(" : ")
        .ok_or_else(|| "expected '<bit> : ( <expression> )'".to_string())?;
    let bit = bit
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a bit index", bit.trim()))?;

    let expr = expr
        .trim()
        .strip_prefix('(')
        .and_then(|e| e.strip_suffix(')'))
        .ok_or_else(|| "expression must be parenthesised".to_string())?
        .trim();

    let terms = expr
        .split(OR.trim())
        .map(|term| {
            term.split(AND.trim())
                .map(parse_factor)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Term::from)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(AlgebraLine { bit, terms })
}

fn parse_factor(text: &str) -> std::result::Result<Factor, String> {
    let text = text.trim();
    let (negated, digits) = match text.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let bit = digits
        .parse()
        .map_err(|_| format!("'{}' is not an input bit", text))?;
    Ok(Factor { bit, negated })
}
