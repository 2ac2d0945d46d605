//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, USAGE_MESSAGE};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;

/// Execute the CLI invocation.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.generator {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }
    if cli.config_template {
        output::info(&Settings::template());
        return Ok(());
    }

    if cli.show_config {
        let settings = load_settings(cli, cli.top_directory.as_deref())?;
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    let (top_directory, target_file) = match (&cli.top_directory, &cli.target_file) {
        (Some(top), Some(target)) => (top.as_path(), target.as_path()),
        _ => return Err(CliError::Usage(USAGE_MESSAGE.to_string())),
    };

    let settings = load_settings(cli, Some(top_directory))?;
    let container = ServiceContainer::new(settings);
    if cli.check {
        check(&container, top_directory, target_file)
    } else {
        extract(&container, top_directory, target_file)
    }
}

/// Layered settings with command line flags applied last.
fn load_settings(cli: &Cli, top_directory: Option<&Path>) -> CliResult<Settings> {
    let mut settings = Settings::load(top_directory)?;
    if let Some(name) = &cli.file_name {
        settings.file_name = name.clone();
    }
    if let Some(prefix) = &cli.key_prefix {
        settings.key_prefix = prefix.clone();
    }
    if let Some(context) = &cli.context {
        settings.context = context.clone();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(container))]
fn extract(container: &ServiceContainer, top_directory: &Path, target_file: &Path) -> CliResult<()> {
    let options = container.extract_options();
    let summary = container
        .extraction
        .run(top_directory, target_file, &options)?;

    if summary.files == 0 {
        output::warning(&format!(
            "no {} found under {}",
            options.file_name,
            top_directory.display()
        ));
    }
    output::success(&format!(
        "{} strings from {} files written to {}",
        summary.records,
        summary.files,
        target_file.display()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn check(container: &ServiceContainer, top_directory: &Path, target_file: &Path) -> CliResult<()> {
    let options = container.extract_options();
    let built = container
        .extraction
        .build_document(top_directory, &options)?;
    container
        .extraction
        .check_document(target_file, &built.document)?;

    output::success(&format!(
        "{} is up to date ({} strings)",
        target_file.display(),
        built.summary.records
    ));
    Ok(())
}
