//! Severity-classed, color-coded status output for the operator terminal.
//! Presentation only; nothing parses these lines.

use crossterm::style::Stylize;

pub fn info(message: &str) {
    println!("{}", message.blue());
}

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn warn(message: &str) {
    eprintln!("{}", message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{}", message.red());
}
