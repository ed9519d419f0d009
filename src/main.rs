use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use xray_burnin::{condition, console, default_catalog, identify, Resolver};

/// Factory burn-in station for X-ray generator sources: identifies the
/// attached source over the serial link, then preps the station for the
/// external conditioning tool.
#[derive(Debug, Parser)]
#[command(name = "burnin_cli", version)]
struct Cli {
    /// Serial port the source's control link is attached to.
    #[arg(default_value = "/dev/ttyUSBXRAY")]
    port: String,

    /// File the resolved settings-model name is written to.
    #[arg(long, default_value = identify::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Usage-history file consumed by the conditioning tool.
    #[arg(long, default_value = condition::DEFAULT_USAGE_HISTORY)]
    usage_history: PathBuf,

    /// Controller-board firmware variant marker file.
    #[arg(long, default_value = condition::DEFAULT_VARIANT_FILE)]
    variant_file: PathBuf,

    /// Toggle the firmware variant and flash the controller board before
    /// conditioning prep.
    #[arg(long)]
    flash: bool,

    /// Prep only; do not launch the conditioning tool afterwards.
    #[arg(long)]
    no_launch: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            // Unresolved source: the station already degraded gracefully,
            // but downstream automation gets the failure via the exit code.
            ExitCode::FAILURE
        }
        Err(err) => {
            console::error(&format!("Burn-in prep failed: {err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Runs the station flow; `Ok(true)` means the source was resolved.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    println!("==============================");
    println!("  X-Ray Source Burn-In Prep   ");
    println!("==============================");

    let resolver = Resolver::new(default_catalog(), &cli.output);
    let result = resolver
        .identify(&cli.port)
        .with_context(|| format!("could not persist {}", cli.output.display()))?;

    let resolved = result.matched_profile.is_some();
    if !resolved {
        if result.raw_response.is_empty() {
            console::warn(
                "Source not responding, please check it is plugged in and all interlocks are closed.",
            );
        } else {
            console::warn(&format!(
                "Unknown source reported identity {:?}; no catalog entry matched.",
                result.raw_response
            ));
        }
    }

    if cli.flash {
        condition::flash_controller(&cli.variant_file)
            .with_context(|| format!("firmware flash via {}", cli.variant_file.display()))?;
    }

    condition::prep_for_condition(&cli.usage_history);

    if !cli.no_launch {
        condition::launch_conditioning();
    }

    Ok(resolved)
}
