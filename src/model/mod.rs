//! The compiled, bit-indexed model of one logic source.
//!
//! Built once per run from a [`SourceUnit`] and never mutated afterwards.
//! Input fields and output bits keep declaration order; compiled outputs
//! keep assignment order and are sorted only when emitted.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{CompileError, Result};
use crate::expand::{dnf, evaluate, Term};
use crate::syntax::clause::{parse_condition, ParsedClause};
use crate::syntax::scanner::{InputDecl, OutputDecl, SourceUnit};

// ─── Signal Table ──────────────────────────────────────────────────

/// A named input occupying `width` contiguous bits from `start_bit`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitField {
    pub name: String,
    pub start_bit: usize,
    pub width: usize,
}

impl BitField {
    pub fn bits(&self) -> std::ops::Range<usize> {
        self.start_bit..self.start_bit + self.width
    }
}

/// Input bit fields keyed by name, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignalTable {
    fields: IndexMap<String, BitField>,
    total_bits: usize,
}

impl SignalTable {
    /// Assign consecutive bit indices from 0 in declaration order.
    pub fn build(inputs: &[InputDecl]) -> Result<Self> {
        let mut fields = IndexMap::with_capacity(inputs.len());
        let mut next_bit = 0;
        for decl in inputs {
            if fields.contains_key(&decl.name) {
                return Err(CompileError::DuplicateSignal {
                    name: decl.name.clone(),
                    span: decl.span,
                });
            }
            fields.insert(
                decl.name.clone(),
                BitField {
                    name: decl.name.clone(),
                    start_bit: next_bit,
                    width: decl.width,
                },
            );
            next_bit += decl.width;
        }
        Ok(Self {
            fields,
            total_bits: next_bit,
        })
    }

    pub fn get(&self, name: &str) -> Option<&BitField> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BitField> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn total_bits(&self) -> usize {
        self.total_bits
    }
}

// ─── Outputs ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputBit {
    pub name: String,
    pub bit_index: usize,
}

/// An output bit with its sum-of-products over input bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledOutput {
    pub output: OutputBit,
    pub clauses: Vec<ParsedClause>,
    pub dnf: Vec<Term>,
}

fn build_outputs(outputs: &[OutputDecl]) -> Result<IndexMap<String, OutputBit>> {
    let mut bits = IndexMap::with_capacity(outputs.len());
    for (bit_index, decl) in outputs.iter().enumerate() {
        if bits.contains_key(&decl.name) {
            return Err(CompileError::DuplicateSignal {
                name: decl.name.clone(),
                span: decl.span,
            });
        }
        bits.insert(
            decl.name.clone(),
            OutputBit {
                name: decl.name.clone(),
                bit_index,
            },
        );
    }
    Ok(bits)
}

// ─── Model ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    inputs: SignalTable,
    outputs: IndexMap<String, OutputBit>,
    compiled: IndexMap<usize, CompiledOutput>,
}

impl Model {
    pub fn build(unit: &SourceUnit) -> Result<Self> {
        let inputs = SignalTable::build(&unit.inputs)?;
        let outputs = build_outputs(&unit.outputs)?;
        debug!(
            fields = inputs.len(),
            bits = inputs.total_bits(),
            outputs = outputs.len(),
            "bit tables assigned"
        );

        let mut compiled: IndexMap<usize, CompiledOutput> = IndexMap::new();
        for assignment in &unit.assignments {
            let Some(output) = outputs.get(&assignment.target) else {
                debug!(signal = %assignment.target, "skipping assignment to non-output signal");
                continue;
            };

            let clauses = parse_condition(assignment, &inputs)?;
            let alternatives = clauses
                .iter()
                .map(ParsedClause::expand)
                .collect::<Result<Vec<_>>>()?;
            let dnf = dnf::expand(&alternatives);
            debug!(output = %output.name, clauses = clauses.len(), terms = dnf.len(), "expanded");

            let entry = CompiledOutput {
                output: output.clone(),
                clauses,
                dnf,
            };
            if compiled.insert(output.bit_index, entry).is_some() {
                warn!(output = %output.name, "output assigned more than once; last assignment wins");
            }
        }

        for output in outputs.values() {
            if !compiled.contains_key(&output.bit_index) {
                warn!(output = %output.name, "output is never assigned; it evaluates to false");
            }
        }

        Ok(Self {
            inputs,
            outputs,
            compiled,
        })
    }

    pub fn inputs(&self) -> &SignalTable {
        &self.inputs
    }

    pub fn outputs(&self) -> impl Iterator<Item = &OutputBit> {
        self.outputs.values()
    }

    pub fn output(&self, name: &str) -> Option<&OutputBit> {
        self.outputs.get(name)
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn compiled(&self, bit_index: usize) -> Option<&CompiledOutput> {
        self.compiled.get(&bit_index)
    }

    /// Compiled outputs in ascending output bit order.
    pub fn compiled_sorted(&self) -> Vec<&CompiledOutput> {
        let mut sorted: Vec<&CompiledOutput> = self.compiled.values().collect();
        sorted.sort_by_key(|c| c.output.bit_index);
        sorted
    }

    /// Compute every output bit from the input bits. Unassigned outputs are
    /// false.
    pub fn evaluate(&self, input: &[bool]) -> Vec<bool> {
        let mut out = vec![false; self.outputs.len()];
        for (bit, compiled) in &self.compiled {
            out[*bit] = evaluate(&compiled.dnf, input);
        }
        out
    }
}

#[cfg(test)]
mod tests;
