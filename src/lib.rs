//! # X-Ray Source Burn-In Library
//!
//! This library contains the core logic for the factory burn-in station.
//! It identifies the attached X-ray source over a serial link, resolves it
//! against the catalog of known source profiles, and prepares the station
//! for the external conditioning tool.

use thiserror::Error;

pub mod catalog;
pub mod condition;
pub mod console;
pub mod exec;
pub mod framing;
pub mod identify;

pub use catalog::{default_catalog, Catalog, SourceProfile};
pub use identify::{IdentificationResult, Resolver};

// Custom error type for station operations.
#[derive(Debug, Error)]
pub enum BurnInError {
    /// The serial port could not be opened.
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
    /// A read, write, or file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// An invoked external command exited with a non-zero status.
    #[error("command `{command}` exited with {status}")]
    ExternalProcess {
        command: String,
        status: std::process::ExitStatus,
    },
}

pub type Result<T> = std::result::Result<T, BurnInError>;
