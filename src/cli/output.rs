//! Colored status lines around a run
//!
//! Data (the config template, effective settings) goes to stdout
//! uncolored so it can be redirected into a file. `colored` honours
//! NO_COLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

/// Fatal failure, on stderr.
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Non-fatal oddity such as a scan that found no wizard files.
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

/// Summary of a finished write or check.
pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Plain data.
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
