//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Shown when the two positional arguments are not given.
pub const USAGE_MESSAGE: &str =
    "Please provide a top level directory to scan and a file to write into.";

/// Extract translatable strings from JSON wizard definitions into a QT_TRANSLATE_NOOP stub
#[derive(Parser, Debug)]
#[command(name = "wizstrings")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Top level directory to scan for wizard files
    #[arg(value_hint = ValueHint::DirPath)]
    pub top_directory: Option<PathBuf>,

    /// Generated source file to write
    #[arg(value_hint = ValueHint::FilePath)]
    pub target_file: Option<PathBuf>,

    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Verify that the target is up to date instead of writing it
    #[arg(long)]
    pub check: bool,

    /// Name of the wizard definition files
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Prefix of keys holding translatable strings
    #[arg(long, value_name = "PREFIX")]
    pub key_prefix: Option<String>,

    /// Translation context for QT_TRANSLATE_NOOP
    #[arg(long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print a configuration template and exit
    #[arg(long)]
    pub config_template: bool,

    /// Generate shell completions
    #[arg(long = "generate", value_enum, value_name = "SHELL")]
    pub generator: Option<clap_complete::Shell>,
}
