pub mod compile;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::CommandFactory;

/// Print an error followed by the usage line and exit.
pub fn usage_error(message: &str) -> ! {
    eprintln!("error: {}", message);
    eprintln!();
    eprintln!("{}", crate::Cli::command().render_usage());
    process::exit(1);
}

/// Directory a relative input lives in, `.` for bare file names.
pub fn input_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Ask a yes/no question on stderr and read the answer from `reader`.
/// Anything but `y` or `yes` counts as no.
pub fn confirm(prompt: &str, reader: &mut impl BufRead) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if reader.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
