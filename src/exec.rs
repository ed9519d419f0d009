//! Runs the station's external collaborator commands, echoing their output
//! line by line while it accumulates.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use crate::{console, BurnInError, Result};

/// Runs a command, streaming its stdout to the terminal as it arrives.
///
/// Returns the accumulated stdout. A non-zero exit status is reported as
/// [`BurnInError::ExternalProcess`]; callers that tolerate failures
/// downgrade it to a warning.
pub fn run_command(argv: &[&str]) -> Result<String> {
    let (program, args) = argv
        .split_first()
        .expect("run_command requires a program name");
    console::info(&format!("\nRunning command: {}", argv.join(" ")));

    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .spawn()?;

    let mut output = String::new();
    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let line = line?;
            println!("{line}");
            output.push_str(&line);
            output.push('\n');
        }
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(BurnInError::ExternalProcess {
            command: argv.join(" "),
            status,
        });
    }
    Ok(output)
}

/// Runs a command whose failure must not abort the station; a non-zero
/// exit or a spawn failure becomes a warning.
pub fn run_tolerant(argv: &[&str]) {
    if let Err(err) = run_command(argv) {
        console::warn(&format!("Command did not complete cleanly: {err}"));
    }
}
