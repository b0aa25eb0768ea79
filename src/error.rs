//! Compiler error taxonomy.
//!
//! Every variant is fatal for the current run. Source-level errors carry the
//! span of the offending line or clause so they can be rendered through
//! [`Diagnostic`].

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::span::Span;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("malformed declaration of '{name}': {reason}")]
    MalformedDeclaration {
        name: String,
        reason: String,
        span: Span,
    },

    #[error("unknown signal '{name}' in clause '{clause}' of output '{output}'")]
    UnresolvedSignal {
        name: String,
        clause: String,
        output: String,
        span: Span,
    },

    #[error("less-than comparison is not supported: '{clause}' in output '{output}'")]
    UnsupportedComparator {
        clause: String,
        output: String,
        span: Span,
    },

    #[error("negated comparison '{clause}' in output '{output}' cannot be expanded")]
    NegatedComparison {
        clause: String,
        output: String,
        span: Span,
    },

    #[error("unsupported {op} threshold {threshold} on '{field}'")]
    UnsupportedThreshold {
        op: &'static str,
        field: String,
        threshold: u32,
        span: Span,
    },

    #[error("clause '{clause}' expands to no terms")]
    EmptyExpansion { clause: String, span: Span },

    #[error("signal '{name}' is declared more than once")]
    DuplicateSignal { name: String, span: Span },

    #[error("assignment to '{output}' has no condition")]
    MalformedAssignment { output: String, span: Span },

    #[error("'{}' already exists (use --force to overwrite)", .path.display())]
    OutputTargetConflict { path: PathBuf },

    #[error("'{name}' does not match '<prefix>_<major>.<minor>.vhd'")]
    InvalidFileName { name: String },

    #[error("algebra listing line {line}: {reason}")]
    MalformedListing { line: usize, reason: String },

    #[error("invalid configuration in '{}': {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Source range of the offending construct, if any.
    pub fn span(&self) -> Span {
        match self {
            Self::MalformedDeclaration { span, .. }
            | Self::UnresolvedSignal { span, .. }
            | Self::UnsupportedComparator { span, .. }
            | Self::NegatedComparison { span, .. }
            | Self::UnsupportedThreshold { span, .. }
            | Self::EmptyExpansion { span, .. }
            | Self::DuplicateSignal { span, .. }
            | Self::MalformedAssignment { span, .. } => *span,
            Self::OutputTargetConflict { .. }
            | Self::InvalidFileName { .. }
            | Self::MalformedListing { .. }
            | Self::InvalidConfig { .. }
            | Self::Io { .. } => Span::dummy(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string(), self.span());
        match self {
            Self::MalformedDeclaration { .. } => diag.with_help(
                "vector ranges must read 'std_logic_vector(<high> downto <low>)' with high >= low"
                    .to_string(),
            ),
            Self::UnresolvedSignal { .. } => diag.with_note(
                "only signals declared in the inputs region can be referenced".to_string(),
            ),
            Self::NegatedComparison { .. } => diag.with_help(
                "negate the individual bits instead, e.g. 'field = 0' for no bit set".to_string(),
            ),
            Self::UnsupportedComparator { .. } => {
                diag.with_help("rewrite the clause with '>' or '='".to_string())
            }
            Self::UnsupportedThreshold { op, .. } => {
                let supported = if *op == ">" { "0..=3" } else { "0..=2" };
                diag.with_note(format!("'{}' thresholds must be in {}", op, supported))
            }
            Self::EmptyExpansion { .. } => diag.with_note(
                "the threshold leaves no bit of the field able to satisfy the comparison".to_string(),
            ),
            _ => diag,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
