//! Literal bit terms and the two expansion stages that produce them.
//!
//! A [`Factor`] is one (possibly negated) input bit, a [`Term`] is a
//! conjunction of factors. `threshold` expands one comparison clause into
//! its alternative terms; `dnf` combines the per-clause alternatives into
//! the sum of products for an output bit.

pub mod dnf;
pub mod threshold;

use std::fmt;

/// Separator between the factors of a product term.
pub const AND: &str = " * ";
/// Separator between the product terms of an expression.
pub const OR: &str = " + ";

/// One literal input bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Factor {
    pub bit: usize,
    pub negated: bool,
}

impl Factor {
    pub fn pos(bit: usize) -> Self {
        Self {
            bit,
            negated: false,
        }
    }

    pub fn neg(bit: usize) -> Self {
        Self { bit, negated: true }
    }

    pub fn is_satisfied(&self, input: &[bool]) -> bool {
        input.get(self.bit).copied().unwrap_or(false) != self.negated
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.bit)
        } else {
            write!(f, "{}", self.bit)
        }
    }
}

/// A conjunction of factors. Factor order is kept exactly as produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Term {
    pub factors: Vec<Factor>,
}

impl Term {
    pub fn single(factor: Factor) -> Self {
        Self {
            factors: vec![factor],
        }
    }

    pub fn product(factors: impl IntoIterator<Item = Factor>) -> Self {
        Self {
            factors: factors.into_iter().collect(),
        }
    }

    pub fn is_satisfied(&self, input: &[bool]) -> bool {
        self.factors.iter().all(|f| f.is_satisfied(input))
    }
}

impl From<Vec<Factor>> for Term {
    fn from(factors: Vec<Factor>) -> Self {
        Self { factors }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, factor) in self.factors.iter().enumerate() {
            if i > 0 {
                f.write_str(AND)?;
            }
            write!(f, "{}", factor)?;
        }
        Ok(())
    }
}

/// Render a sum of products, e.g. `1 * 3 + 2 * 4`.
pub fn render_expression(terms: &[Term]) -> String {
    terms
        .iter()
        .map(Term::to_string)
        .collect::<Vec<_>>()
        .join(OR)
}

/// Value of a sum of products for the given input bits.
pub fn evaluate(terms: &[Term], input: &[bool]) -> bool {
    terms.iter().any(|t| t.is_satisfied(input))
}
