//! Conditioning prep: resets the usage-history state so the downstream
//! conditioning tool treats the source as unwarmed, and handles the
//! controller-board firmware variant toggle.

use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::{console, exec, Result};

/// Usage-history artifact consumed by the conditioning tool.
pub const DEFAULT_USAGE_HISTORY: &str = "/var/seah/vjx_usage_history.json";
/// One-line marker file selecting the controller firmware variant.
pub const DEFAULT_VARIANT_FILE: &str = "/etc/homer_firmware_variant";
/// Name of the external conditioning process.
pub const CONDITIONING_PROCESS: &str = "seah";
/// External executable that flashes the controller board.
pub const FLASH_EXECUTABLE: &str = "flash-homer-firmware";

/// Variant token for AC-style sources.
pub const VARIANT_AC: &str = "+cfg11";
/// Variant token for DC-style sources.
pub const VARIANT_DC: &str = "+cfg15";

/// Outcome of a firmware-variant toggle.
#[derive(Debug, PartialEq)]
pub struct VariantToggle {
    /// Trimmed prior content of the marker file; empty when the file was
    /// missing.
    pub previous: String,
    /// Token written by the toggle.
    pub current: &'static str,
    /// Operator-facing style name for the new variant.
    pub source_style: &'static str,
}

/// Flips the firmware-variant marker file between its two known tokens.
///
/// The only recognized prior state is an exact `+cfg15`; any other content
/// (including `+cfg11`, garbage, or a missing file) lands on the `+cfg15`
/// branch. Two-state flip-flop, no further validation.
pub fn toggle_variant(variant_path: &Path) -> io::Result<VariantToggle> {
    let previous = match fs::read_to_string(variant_path) {
        Ok(content) => content.trim().to_string(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err),
    };

    let (current, source_style) = if previous == VARIANT_DC {
        (VARIANT_AC, "AC")
    } else {
        (VARIANT_DC, "DC")
    };
    fs::write(variant_path, current)?;

    Ok(VariantToggle {
        previous,
        current,
        source_style,
    })
}

/// Toggles the firmware variant and invokes the external flash tool.
pub fn flash_controller(variant_path: &Path) -> Result<()> {
    let toggle = toggle_variant(variant_path)?;
    exec::run_tolerant(&[FLASH_EXECUTABLE]);
    println!(
        "Controller board flashed to {} style source. Previous variant was {:?}.",
        toggle.source_style, toggle.previous
    );
    Ok(())
}

/// Clears warming state ahead of the conditioning hand-off: kills any
/// stale conditioning processes, removes the usage-history file, and gives
/// the operator a moment to read the cue.
pub fn prep_for_condition(usage_history: &Path) {
    exec::run_tolerant(&["pkill", CONDITIONING_PROCESS]);

    match fs::remove_file(usage_history) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => console::warn(&format!(
            "Could not remove {}: {err}",
            usage_history.display()
        )),
    }

    console::info("Warming reset, please warm the source when the conditioning tool launches...");
    thread::sleep(Duration::from_secs(2));
}

/// Hands off to the external conditioning executable.
pub fn launch_conditioning() {
    exec::run_tolerant(&[CONDITIONING_PROCESS]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dc_variant_toggles_to_ac() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("firmware_variant");
        fs::write(&marker, "+cfg15").unwrap();

        let toggle = toggle_variant(&marker).unwrap();
        assert_eq!(toggle.previous, "+cfg15");
        assert_eq!(toggle.current, "+cfg11");
        assert_eq!(toggle.source_style, "AC");
        assert_eq!(fs::read_to_string(&marker).unwrap(), "+cfg11");
    }

    #[test]
    fn ac_variant_toggles_to_dc() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("firmware_variant");
        fs::write(&marker, "+cfg11").unwrap();

        let toggle = toggle_variant(&marker).unwrap();
        assert_eq!(toggle.current, "+cfg15");
        assert_eq!(toggle.source_style, "DC");
        assert_eq!(fs::read_to_string(&marker).unwrap(), "+cfg15");
    }

    #[test]
    fn unrecognized_content_defaults_to_dc() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("firmware_variant");
        fs::write(&marker, "garbage\n").unwrap();

        let toggle = toggle_variant(&marker).unwrap();
        assert_eq!(toggle.previous, "garbage");
        assert_eq!(toggle.current, "+cfg15");
        assert_eq!(fs::read_to_string(&marker).unwrap(), "+cfg15");
    }

    #[test]
    fn missing_marker_file_defaults_to_dc() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("firmware_variant");

        let toggle = toggle_variant(&marker).unwrap();
        assert_eq!(toggle.previous, "");
        assert_eq!(toggle.current, "+cfg15");
        assert_eq!(fs::read_to_string(&marker).unwrap(), "+cfg15");
    }

    #[test]
    fn trailing_whitespace_in_marker_is_ignored() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("firmware_variant");
        fs::write(&marker, "+cfg15\n").unwrap();

        let toggle = toggle_variant(&marker).unwrap();
        assert_eq!(toggle.previous, "+cfg15");
        assert_eq!(toggle.current, "+cfg11");
    }
}
