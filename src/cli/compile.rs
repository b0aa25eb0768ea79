use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use clap::Args;
use tracing::debug;

use ftdc::artifact::ArtifactSet;
use ftdc::config::Config;
use ftdc::emit::model_dump;
use ftdc::{CompileError, CompileOptions};

use super::{confirm, input_dir, usage_error};

#[derive(Args)]
pub struct CompileArgs {
    /// Logic source named <prefix>_<major>.<minor>.vhd
    pub input: PathBuf,
    /// Print the compiled model and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
    /// Overwrite existing artifacts without asking
    #[arg(short, long)]
    pub force: bool,
    /// Print the artifacts to stdout instead of writing them
    #[arg(short, long)]
    pub preview: bool,
    /// Directory for the artifacts (default: next to the input)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

pub fn cmd_compile(args: CompileArgs) {
    let CompileArgs {
        input,
        verbose,
        force,
        preview,
        out_dir,
    } = args;

    if !input.is_file() {
        usage_error(&format!("cannot find input file '{}'", input.display()));
    }

    let config = match Config::discover(&input_dir(&input)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    let out_dir = out_dir.or_else(|| config.out_dir.clone());
    let set = match ArtifactSet::for_input(&input, &config.prefix, out_dir.as_deref()) {
        Ok(s) => s,
        Err(e) => usage_error(&e.to_string()),
    };

    let source = match std::fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => usage_error(&format!("cannot read '{}': {}", input.display(), e)),
    };
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let options = CompileOptions {
        markers: config.markers.clone(),
        function_name: set.function_name.clone(),
    };
    debug!(input = %filename, function = %options.function_name, "compiling");
    let compiled = match ftdc::compile(&source, &filename, &options) {
        Ok(c) => c,
        Err(e) => {
            e.to_diagnostic().render(&filename, &source);
            process::exit(1);
        }
    };

    if verbose {
        eprint!("{}", model_dump(&compiled.model));
    }

    if preview {
        print!("{}", set.preview(&compiled.artifacts));
        return;
    }

    if let Err(e) = check_targets(&set, force, &mut io::stdin().lock()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
    match set.write(&compiled.artifacts) {
        Ok(written) => {
            for path in written {
                eprintln!("Compiled -> {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// Refuse to replace existing artifacts unless forced or confirmed. All
/// targets are checked before anything is written.
fn check_targets(set: &ArtifactSet, force: bool, answer: &mut impl BufRead) -> ftdc::Result<()> {
    let existing = set.existing();
    let Some(first) = existing.first() else {
        return Ok(());
    };
    if force {
        debug!(count = existing.len(), "overwriting existing artifacts");
        return Ok(());
    }

    for path in &existing {
        eprintln!("warning: '{}' already exists", path.display());
    }
    if confirm("Overwrite existing artifacts?", answer) {
        Ok(())
    } else {
        Err(CompileError::OutputTargetConflict {
            path: first.clone(),
        })
    }
}
