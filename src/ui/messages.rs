//! One-line status messages for the CLI.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

fn emit(color: &str, icon: &str, msg: impl fmt::Display) {
    println!("{color}{BOLD}{icon} {RESET}{msg}");
}

pub fn info<T: fmt::Display>(msg: T) {
    emit("\x1b[34m", "ℹ️", msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit("\x1b[32m", "✅", msg);
}

/// Used for anomalies and invalid check-ins: the command still succeeded.
pub fn warning<T: fmt::Display>(msg: T) {
    emit("\x1b[33m", "⚠️", msg);
}
