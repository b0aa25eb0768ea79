pub mod algebra;
pub mod artifact;
pub mod config;
pub mod diagnostic;
pub mod emit;
pub mod error;
pub mod expand;
pub mod model;
pub mod span;
pub mod syntax;

use emit::{Artifacts, Emitter};
use model::Model;
use syntax::scanner::{scan, Markers};

pub use error::{CompileError, Result};

/// Options for a single compilation.
#[derive(Clone, Debug)]
pub struct CompileOptions {
    pub markers: Markers,
    /// Name of the generated evaluator function.
    pub function_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            function_name: "ftd".to_string(),
        }
    }
}

/// The model and rendered artifacts of one source.
#[derive(Clone, Debug)]
pub struct Compilation {
    pub model: Model,
    pub artifacts: Artifacts,
}

/// Scan a logic source and build its compiled model.
pub fn build_model(source: &str, markers: &Markers) -> Result<Model> {
    let unit = scan(source, markers)?;
    Model::build(&unit)
}

/// Compile a logic source into bit tables, algebra and evaluator.
pub fn compile(source: &str, filename: &str, options: &CompileOptions) -> Result<Compilation> {
    let model = build_model(source, &options.markers)?;
    let artifacts = Emitter::new(&options.function_name, filename, source).emit(&model);
    Ok(Compilation { model, artifacts })
}
