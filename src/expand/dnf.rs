//! Sum-of-products expansion.
//!
//! The term order produced here is what downstream listings are compared
//! against, so the slot walk must not be replaced by a plain nested-loop
//! Cartesian product.

use super::{Factor, Term};

/// Combine the alternatives of every clause into product terms.
///
/// There are as many slots as the product of all list lengths. For each
/// clause list, alternative `j` is appended to slots `j`, `j + len`,
/// `j + 2 * len`, and so on.
pub fn expand(alternatives: &[Vec<Term>]) -> Vec<Term> {
    let nterms: usize = alternatives.iter().map(Vec::len).product();
    let mut slots: Vec<Vec<Factor>> = vec![Vec::new(); nterms];

    for list in alternatives {
        let stride = list.len();
        for (j, alternative) in list.iter().enumerate() {
            for slot in slots.iter_mut().skip(j).step_by(stride) {
                slot.extend_from_slice(&alternative.factors);
            }
        }
    }

    slots.into_iter().map(Term::from).collect()
}
