//! Artifact naming and output.
//!
//! A source named `<prefix>_<major>.<minor>.vhd` compiles to four files
//! sharing the stem `<prefix>_<major>_<minor>`, which is also the name of
//! the generated evaluator function.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::emit::Artifacts;
use crate::error::{CompileError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    InputBits,
    OutputBits,
    Algebra,
    Evaluator,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::InputBits,
        ArtifactKind::OutputBits,
        ArtifactKind::Algebra,
        ArtifactKind::Evaluator,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::InputBits => "inbits",
            ArtifactKind::OutputBits => "outbits",
            ArtifactKind::Algebra => "alg",
            ArtifactKind::Evaluator => "rs",
        }
    }
}

/// Version identifier of `<prefix>_<major>.<minor>.vhd`, e.g. `0_01` for
/// `ftd_0.01.vhd`. The major/minor separator may also be `_`.
pub fn version_id(file_name: &str, prefix: &str) -> Result<String> {
    let invalid = || CompileError::InvalidFileName {
        name: file_name.to_string(),
    };

    let lower = file_name.to_ascii_lowercase();
    let stem = if lower.ends_with(".vhdl") {
        &file_name[..file_name.len() - 5]
    } else if lower.ends_with(".vhd") {
        &file_name[..file_name.len() - 4]
    } else {
        return Err(invalid());
    };

    let rest = stem
        .strip_prefix(prefix)
        .and_then(|r| r.strip_prefix('_'))
        .ok_or_else(invalid)?;
    let (major, minor) = rest.split_once(['.', '_']).ok_or_else(invalid)?;

    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_number(major) || !is_number(minor) {
        return Err(invalid());
    }
    Ok(format!("{}_{}", major, minor))
}

/// Where the artifacts of one source go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactSet {
    pub version: String,
    pub function_name: String,
    pub out_dir: PathBuf,
}

impl ArtifactSet {
    /// Name the artifacts of `input`. Without `out_dir` they are placed next
    /// to the input file.
    pub fn for_input(input: &Path, prefix: &str, out_dir: Option<&Path>) -> Result<Self> {
        let file_name = input
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CompileError::InvalidFileName {
                name: input.display().to_string(),
            })?;
        let version = version_id(file_name, prefix)?;
        let out_dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        Ok(Self {
            function_name: format!("{}_{}", prefix, version),
            version,
            out_dir,
        })
    }

    pub fn file_name(&self, kind: ArtifactKind) -> String {
        format!("{}.{}", self.function_name, kind.extension())
    }

    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.out_dir.join(self.file_name(kind))
    }

    /// Targets that already exist on disk.
    pub fn existing(&self) -> Vec<PathBuf> {
        ArtifactKind::ALL
            .iter()
            .map(|&kind| self.path(kind))
            .filter(|path| path.exists())
            .collect()
    }

    /// Write all artifacts, replacing existing files.
    pub fn write(&self, artifacts: &Artifacts) -> Result<Vec<PathBuf>> {
        if !self.out_dir.as_os_str().is_empty() {
            std::fs::create_dir_all(&self.out_dir)
                .map_err(|e| CompileError::io(&self.out_dir, e))?;
        }

        let mut written = Vec::with_capacity(ArtifactKind::ALL.len());
        for kind in ArtifactKind::ALL {
            let path = self.path(kind);
            std::fs::write(&path, artifacts.get(kind)).map_err(|e| CompileError::io(&path, e))?;
            info!(path = %path.display(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }

    /// All artifacts concatenated for printing, each under a file header.
    pub fn preview(&self, artifacts: &Artifacts) -> String {
        let mut out = String::new();
        for (i, kind) in ArtifactKind::ALL.into_iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("==> {} <==\n", self.file_name(kind)));
            out.push_str(artifacts.get(kind));
        }
        out
    }
}
