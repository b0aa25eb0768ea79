//! Threshold comparisons over a bit field.
//!
//! The bits of a field are a thermometer-style count: `field > n` asks
//! whether more than `n` threshold lines fired, not whether the binary value
//! exceeds `n`. Only the small thresholds the trigger logic uses are
//! supported; anything else is refused rather than approximated.

use super::{Factor, Term};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThresholdError {
    Unsupported { op: &'static str, threshold: u32 },
    Empty,
}

/// Alternatives that together satisfy `field > n` for the field starting at
/// `min_bit` with `width` bits.
pub fn greater_than(min_bit: usize, width: usize, n: u32) -> Result<Vec<Term>, ThresholdError> {
    let single = |bit: usize| Term::single(Factor::pos(bit));
    let bits = min_bit..min_bit + width;

    let terms: Vec<Term> = match n {
        0 => bits.map(single).collect(),
        1 => bits.skip(1).map(single).collect(),
        2 => {
            let mut terms = Vec::new();
            if width >= 2 {
                terms.push(Term::product([Factor::pos(min_bit), Factor::pos(min_bit + 1)]));
            }
            terms.extend(bits.skip(2).map(single));
            terms
        }
        3 => bits.skip(2).map(single).collect(),
        _ => {
            return Err(ThresholdError::Unsupported {
                op: ">",
                threshold: n,
            })
        }
    };

    if terms.is_empty() {
        return Err(ThresholdError::Empty);
    }
    Ok(terms)
}

/// The single conjunction for `field = n`.
///
/// `n = 2` yields `!first * first * ...`, which is never true. The text is
/// kept exactly as the hardware listings spell it.
pub fn equal_to(min_bit: usize, width: usize, n: u32) -> Result<Term, ThresholdError> {
    if width == 0 {
        return Err(ThresholdError::Empty);
    }

    let head = match n {
        0 => vec![Factor::neg(min_bit)],
        1 => vec![Factor::pos(min_bit)],
        2 => vec![Factor::neg(min_bit), Factor::pos(min_bit)],
        _ => {
            return Err(ThresholdError::Unsupported {
                op: "=",
                threshold: n,
            })
        }
    };
    let rest = (min_bit + 1..min_bit + width).map(Factor::neg);
    Ok(Term::product(head.into_iter().chain(rest)))
}
