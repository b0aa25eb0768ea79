//! Text artifacts rendered from a compiled [`Model`].
//!
//! Every renderer is a pure function of the model, so compiling the same
//! source twice produces byte-identical output.

use crate::artifact::ArtifactKind;
use crate::expand::{render_expression, Factor, Term};
use crate::model::Model;

/// The four rendered artifacts of one compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub input_bits: String,
    pub output_bits: String,
    pub algebra: String,
    pub evaluator: String,
}

impl Artifacts {
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::InputBits => &self.input_bits,
            ArtifactKind::OutputBits => &self.output_bits,
            ArtifactKind::Algebra => &self.algebra,
            ArtifactKind::Evaluator => &self.evaluator,
        }
    }
}

pub struct Emitter {
    function_name: String,
    source_name: String,
    source_hash: String,
}

impl Emitter {
    /// `function_name` names the generated evaluator; `source_name` and the
    /// hash of `source` go into its header.
    pub fn new(function_name: &str, source_name: &str, source: &str) -> Self {
        Self {
            function_name: function_name.to_string(),
            source_name: source_name.to_string(),
            source_hash: blake3::hash(source.as_bytes()).to_hex().to_string(),
        }
    }

    pub fn emit(&self, model: &Model) -> Artifacts {
        Artifacts {
            input_bits: input_table(model),
            output_bits: output_table(model),
            algebra: algebra_listing(model),
            evaluator: self.evaluator(model),
        }
    }

    /// Rust source of `fn <name>(ftdout: &mut [bool], input: &[bool])`.
    pub fn evaluator(&self, model: &Model) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "// Generated by ftdc from {}. Do not edit.\n",
            self.source_name
        ));
        out.push_str(&format!("// source blake3: {}\n\n", self.source_hash));
        out.push_str(&format!(
            "/// Computes the {} output bits from {} input bits.\n",
            model.output_count(),
            model.inputs().total_bits()
        ));
        out.push_str(&format!(
            "pub fn {}(ftdout: &mut [bool], input: &[bool]) {{\n",
            self.function_name
        ));

        let mut outputs: Vec<_> = model.outputs().collect();
        outputs.sort_by_key(|o| o.bit_index);
        for output in outputs {
            let expr = match model.compiled(output.bit_index) {
                Some(compiled) => rust_expression(&compiled.dnf),
                None => "false".to_string(),
            };
            out.push_str(&format!("    ftdout[{}] = {};\n", output.bit_index, expr));
        }
        out.push_str("}\n");
        out
    }
}

/// `<bit>   <name>` per input bit; vector bits get a `_<n>` suffix.
pub fn input_table(model: &Model) -> String {
    let mut out = String::new();
    for field in model.inputs().iter() {
        if field.width == 1 {
            out.push_str(&format!("{}   {}\n", field.start_bit, field.name));
        } else {
            for (sub, bit) in field.bits().enumerate() {
                out.push_str(&format!("{}   {}_{}\n", bit, field.name, sub));
            }
        }
    }
    out
}

/// `<bit>   <name>` per output bit.
pub fn output_table(model: &Model) -> String {
    let mut outputs: Vec<_> = model.outputs().collect();
    outputs.sort_by_key(|o| o.bit_index);
    outputs
        .iter()
        .map(|o| format!("{}   {}\n", o.bit_index, o.name))
        .collect()
}

/// `<bit> : ( <dnf> )` per compiled output, ascending.
pub fn algebra_listing(model: &Model) -> String {
    model
        .compiled_sorted()
        .iter()
        .map(|c| format!("{} : ( {} )\n", c.output.bit_index, render_expression(&c.dnf)))
        .collect()
}

/// Human-readable dump for `--verbose`.
pub fn model_dump(model: &Model) -> String {
    let inputs = model.inputs();
    let mut out = format!(
        "inputs: {} fields, {} bits\n",
        inputs.len(),
        inputs.total_bits()
    );
    for field in inputs.iter() {
        let bits = if field.width == 1 {
            field.start_bit.to_string()
        } else {
            format!("{}..={}", field.start_bit, field.start_bit + field.width - 1)
        };
        out.push_str(&format!("  {:<8} {}\n", bits, field.name));
    }

    out.push_str(&format!("outputs: {} bits\n", model.output_count()));
    for output in model.outputs() {
        out.push_str(&format!("  {:<8} {}", output.bit_index, output.name));
        match model.compiled(output.bit_index) {
            Some(compiled) => {
                let clauses: Vec<&str> = compiled.clauses.iter().map(|c| c.text.as_str()).collect();
                out.push_str(&format!(
                    " <= {}  [{} terms]\n",
                    clauses.join(" and "),
                    compiled.dnf.len()
                ));
            }
            None => out.push_str("  (unassigned)\n"),
        }
    }

    out.push_str("algebra:\n");
    for line in algebra_listing(model).lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out
}

fn rust_factor(factor: &Factor) -> String {
    if factor.negated {
        format!("!input[{}]", factor.bit)
    } else {
        format!("input[{}]", factor.bit)
    }
}

fn rust_expression(terms: &[Term]) -> String {
    if terms.is_empty() {
        return "false".to_string();
    }
    let wrap = terms.len() > 1;
    terms
        .iter()
        .map(|term| {
            if term.factors.is_empty() {
                return "true".to_string();
            }
            let product = term
                .factors
                .iter()
                .map(rust_factor)
                .collect::<Vec<_>>()
                .join(" && ");
            if wrap && term.factors.len() > 1 {
                format!("({})", product)
            } else {
                product
            }
        })
        .collect::<Vec<_>>()
        .join(" || ")
}
