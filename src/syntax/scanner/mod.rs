//! Line classifier.
//!
//! A small state machine walks the source one physical line at a time.
//! Marker comments move it from `Seeking` into the inputs and outputs
//! declaration regions, and the `begin` keyword moves it into the body,
//! where assignment statements are collected until their terminating `;`.

use tracing::{debug, warn};

use super::{is_identifier, strip_keyword};
use crate::error::{CompileError, Result};
use crate::span::{Span, Spanned};

// ─── Data Types ────────────────────────────────────────────────────

/// Which part of the source the scanner is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Seeking,
    InInputs,
    InOutputs,
    InBody,
}

/// Comment text that opens the declaration regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    pub inputs: String,
    pub outputs: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            inputs: "Inputs".to_string(),
            outputs: "Outputs".to_string(),
        }
    }
}

/// An input signal declaration, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputDecl {
    pub name: String,
    pub width: usize,
    pub span: Span,
}

/// A single-bit output signal declaration, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDecl {
    pub name: String,
    pub span: Span,
}

/// `<target> <= <rhs>;` collected from the body. `rhs` excludes the
/// terminating semicolon; comments inside it are blanked with spaces so
/// byte offsets still line up with the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub target: String,
    pub rhs: Spanned<String>,
    pub span: Span,
}

/// Everything the scanner extracts from one source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceUnit {
    pub inputs: Vec<InputDecl>,
    pub outputs: Vec<OutputDecl>,
    pub assignments: Vec<Assignment>,
}

/// A parsed `signal a, b : <type>;` line.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SignalDecl {
    names: Vec<String>,
    width: usize,
    vector: bool,
    span: Span,
}

struct PendingAssignment {
    start: usize,
    text: String,
}

// ─── Scanner ───────────────────────────────────────────────────────

/// Scan a whole source file.
pub fn scan(source: &str, markers: &Markers) -> Result<SourceUnit> {
    Scanner::new(source, markers).run()
}

pub struct Scanner<'src> {
    source: &'src str,
    inputs_marker: String,
    outputs_marker: String,
    region: Region,
    unit: SourceUnit,
    pending: Option<PendingAssignment>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str, markers: &Markers) -> Self {
        Self {
            source,
            inputs_marker: marker_label(&markers.inputs),
            outputs_marker: marker_label(&markers.outputs),
            region: Region::Seeking,
            unit: SourceUnit::default(),
            pending: None,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn run(mut self) -> Result<SourceUnit> {
        let mut offset = 0;
        for raw in self.source.split_inclusive('\n') {
            self.step(raw, offset)?;
            offset += raw.len();
        }

        if let Some(pending) = self.pending.take() {
            let target = pending
                .text
                .split("<=")
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            return Err(CompileError::MalformedAssignment {
                output: target,
                span: span(pending.start, self.source.len()),
            });
        }

        debug!(
            inputs = self.unit.inputs.len(),
            outputs = self.unit.outputs.len(),
            assignments = self.unit.assignments.len(),
            "scanned source"
        );
        Ok(self.unit)
    }

    /// Feed one physical line (including its terminator) at byte `offset`.
    fn step(&mut self, raw: &str, offset: usize) -> Result<()> {
        let line = raw.trim_end_matches(['\n', '\r']);
        let (code, comment) = match line.find("--") {
            Some(i) => (&line[..i], Some(&line[i + 2..])),
            None => (line, None),
        };

        if self.region != Region::InBody && code.trim().is_empty() {
            if let Some(comment) = comment {
                let label = marker_label(comment);
                if label == self.inputs_marker {
                    self.enter(Region::InInputs);
                } else if label == self.outputs_marker {
                    self.enter(Region::InOutputs);
                }
            }
            return Ok(());
        }

        match self.region {
            Region::Seeking => {}
            Region::InInputs | Region::InOutputs => {
                let first = code.split_whitespace().next().unwrap_or_default();
                if first.eq_ignore_ascii_case("begin") {
                    self.enter(Region::InBody);
                    return Ok(());
                }
                if let Some(decl) = parse_signal(code, offset)? {
                    self.declare(decl);
                }
            }
            Region::InBody => {
                let mut blanked = String::with_capacity(raw.len());
                blanked.push_str(code);
                blanked.extend(std::iter::repeat(' ').take(raw.len() - code.len()));
                self.collect_assignment(&blanked, offset);
            }
        }
        Ok(())
    }

    fn enter(&mut self, region: Region) {
        debug!(from = ?self.region, to = ?region, "region change");
        self.region = region;
    }

    fn declare(&mut self, decl: SignalDecl) {
        match self.region {
            Region::InInputs => {
                for name in decl.names {
                    self.unit.inputs.push(InputDecl {
                        name,
                        width: decl.width,
                        span: decl.span,
                    });
                }
            }
            Region::InOutputs if decl.vector => {
                warn!(
                    names = %decl.names.join(", "),
                    "vector declaration in outputs region ignored; outputs are single bits"
                );
            }
            Region::InOutputs => {
                for name in decl.names {
                    self.unit.outputs.push(OutputDecl {
                        name,
                        span: decl.span,
                    });
                }
            }
            Region::Seeking | Region::InBody => {}
        }
    }

    /// Accumulate body text into `<target> <= <rhs>;` statements. Several
    /// statements may share a line; body lines whose `<=` is not preceded by
    /// a plain signal name (e.g. `if cnt <= 3 then`) are skipped.
    fn collect_assignment(&mut self, blanked: &str, offset: usize) {
        let mut chunk = blanked;
        let mut chunk_offset = offset;
        loop {
            if self.pending.is_none() {
                let Some(arrow) = chunk.find("<=") else {
                    return;
                };
                if !is_identifier(chunk[..arrow].trim()) {
                    debug!(text = chunk.trim(), "skipping body statement that is not an assignment");
                    return;
                }
                self.pending = Some(PendingAssignment {
                    start: chunk_offset,
                    text: String::new(),
                });
            }
            let Some(pending) = self.pending.as_mut() else {
                return;
            };
            let carried = pending.text.len();
            pending.text.push_str(chunk);

            let Some(semi) = pending.text.find(';') else {
                return;
            };
            let start = pending.start;
            let stmt = &pending.text[..semi];
            if let Some(arrow) = stmt.find("<=") {
                let lead = stmt.len() - stmt.trim_start().len();
                self.unit.assignments.push(Assignment {
                    target: stmt[..arrow].trim().to_string(),
                    rhs: Spanned::new(
                        stmt[arrow + 2..].to_string(),
                        span(start + arrow + 2, start + semi),
                    ),
                    span: span(start + lead, start + semi + 1),
                });
            }
            self.pending = None;

            // Text carried from earlier lines never holds a `;`.
            let consumed = semi + 1 - carried;
            chunk = &chunk[consumed..];
            chunk_offset += consumed;
        }
    }
}

/// Comment text compared against the region markers: trimmed of
/// surrounding whitespace and `-`/`=`/`:` decoration, lowercased.
fn marker_label(comment: &str) -> String {
    comment
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '=' | ':'))
        .to_ascii_lowercase()
}

// ─── Declarations ──────────────────────────────────────────────────

/// Parse `signal <names> : std_logic[_vector(X downto Y)] [:= ...];`.
/// Lines that are not signal declarations of a std_logic type yield `None`.
fn parse_signal(code: &str, offset: usize) -> Result<Option<SignalDecl>> {
    let trimmed = code.trim();
    let lead = code.len() - code.trim_start().len();
    let decl_span = span(offset + lead, offset + lead + trimmed.len());

    let Some(rest) = strip_keyword(trimmed, "signal") else {
        return Ok(None);
    };
    let Some((names, ty)) = rest.split_once(':') else {
        return Ok(None);
    };

    let names: Vec<String> = names
        .split(',')
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        return Ok(None);
    }

    let ty = ty.trim().trim_end_matches(';');
    let ty = match ty.split_once(":=") {
        Some((ty, _default)) => ty,
        None => ty,
    };
    let ty = ty.trim().to_ascii_lowercase();

    if let Some(range) = ty.strip_prefix("std_logic_vector") {
        let width = parse_range(range).map_err(|reason| CompileError::MalformedDeclaration {
            name: names.join(", "),
            reason,
            span: decl_span,
        })?;
        Ok(Some(SignalDecl {
            names,
            width,
            vector: true,
            span: decl_span,
        }))
    } else if ty == "std_logic" {
        Ok(Some(SignalDecl {
            names,
            width: 1,
            vector: false,
            span: decl_span,
        }))
    } else {
        Ok(None)
    }
}

/// Width of a `(X downto Y)` range.
fn parse_range(range: &str) -> std::result::Result<usize, String> {
    let inner = range
        .trim()
        .strip_prefix('(')
        .and_then(|r| r.trim_end().strip_suffix(')'))
        .ok_or_else(|| "expected '(<high> downto <low>)'".to_string())?;

    let mut words = inner.split_whitespace();
    let (Some(high), Some(dir), Some(low), None) =
        (words.next(), words.next(), words.next(), words.next())
    else {
        return Err(format!("cannot read range '({})'", inner.trim()));
    };
    if dir != "downto" {
        return Err(format!("expected 'downto', found '{}'", dir));
    }

    let high: usize = high
        .parse()
        .map_err(|_| format!("bound '{}' is not a number", high))?;
    let low: usize = low
        .parse()
        .map_err(|_| format!("bound '{}' is not a number", low))?;
    if high < low {
        return Err(format!("range {} downto {} is empty", high, low));
    }
    (high - low)
        .checked_add(1)
        .ok_or_else(|| format!("range {} downto {} is too wide", high, low))
}

fn span(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}
