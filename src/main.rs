mod cli;

use clap::Parser;

use cli::compile::{cmd_compile, CompileArgs};

#[derive(Parser)]
#[command(
    name = "ftdc",
    version,
    about = "Compile trigger final-decision logic into bit tables, DNF algebra and a bit evaluator"
)]
pub(crate) struct Cli {
    #[command(flatten)]
    args: CompileArgs,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cmd_compile(cli.args);
}
