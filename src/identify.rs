//! Orchestrates the identity exchange and catalog lookup, and persists the
//! resolved model name for downstream consumers.

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use serialport::SerialPort;

use crate::catalog::{Catalog, SourceProfile};
use crate::{console, framing, Result};

/// Baud rate of the source's control link.
pub const BAUD_RATE: u32 = 9600;
/// Read timeout bounding every serial read.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);
/// Default artifact the resolved model name is written to.
pub const DEFAULT_OUTPUT_FILE: &str = "model_output_file.txt";

/// Result of one identification run.
#[derive(Debug, PartialEq)]
pub struct IdentificationResult<'a> {
    /// The decoded, trimmed identity string the device reported; empty
    /// when the device did not respond.
    pub raw_response: String,
    /// The catalog entry the identity resolved to, if any.
    pub matched_profile: Option<&'a SourceProfile>,
}

impl IdentificationResult<'_> {
    /// The model name handed off to downstream tools; empty when the
    /// source is unknown or silent.
    pub fn resolved_model(&self) -> &str {
        self.matched_profile
            .map(|profile| profile.settings_model)
            .unwrap_or("")
    }
}

/// Resolves the attached source against a catalog and persists the
/// outcome.
pub struct Resolver<'a> {
    catalog: Catalog<'a>,
    output_path: PathBuf,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: Catalog<'a>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            output_path: output_path.into(),
        }
    }

    /// Opens the serial port at the station's fixed link settings. The
    /// returned handle is dropped (and the port released) on every exit
    /// path of the exchange.
    pub fn open_port(&self, port_path: &str) -> Result<Box<dyn SerialPort>> {
        let port = serialport::new(port_path, BAUD_RATE)
            .timeout(READ_TIMEOUT)
            .open()?;
        Ok(port)
    }

    /// Runs the full identification flow against a serial port path.
    ///
    /// Channel failures (port cannot be opened, read/decode fails) are
    /// absorbed: they are reported as warnings and identification
    /// degrades to "no identity obtained" so the station stays operable.
    /// The output artifact is written on every branch.
    pub fn identify(&self, port_path: &str) -> Result<IdentificationResult<'a>> {
        let raw_response = match self.open_port(port_path) {
            Ok(mut port) => match framing::request_identity(&mut port) {
                Ok(identity) => identity,
                Err(err) => {
                    console::warn(&format!("Identity exchange failed: {err}"));
                    String::new()
                }
            },
            Err(err) => {
                console::warn(&format!("Could not open port {port_path}: {err}"));
                String::new()
            }
        };
        self.resolve(raw_response)
    }

    /// Identification flow over an already-open channel. This is the seam
    /// the serial port plugs into; tests drive it with in-memory channels.
    pub fn identify_with<C: Read + Write>(&self, channel: &mut C) -> Result<IdentificationResult<'a>> {
        let raw_response = framing::request_identity(channel)?;
        self.resolve(raw_response)
    }

    fn resolve(&self, raw_response: String) -> Result<IdentificationResult<'a>> {
        let matched_profile = if raw_response.is_empty() {
            // A silent device never reaches the catalog scan.
            None
        } else {
            self.catalog.lookup(&raw_response)
        };

        let result = IdentificationResult {
            raw_response,
            matched_profile,
        };

        // All branches converge here: the artifact is present after every
        // run, empty string meaning "unresolved".
        fs::write(&self.output_path, result.resolved_model())?;

        if let Some(profile) = matched_profile {
            console::success("Source type found!");
            println!("{}", profile.settings_model);
            println!("kV range {} - {}", profile.kv_min, profile.kv_max);
            println!("uA range {} - {}", profile.ua_min, profile.ua_max);
        }

        Ok(result)
    }
}
