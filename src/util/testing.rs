//! Test-time setup shared by unit and integration tests

use std::env;
use std::sync::{Once, OnceLock};

use tempfile::TempDir;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();
static USER_CONFIG_HOME: OnceLock<Option<TempDir>> = OnceLock::new();

/// Install a global tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `wizstrings=debug`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

/// Hide the developer's own settings from `Settings::load`.
///
/// Points `XDG_CONFIG_HOME` at an empty directory that lives as long as
/// the test binary and drops inherited `WIZSTRINGS_*` variables. Call it
/// before a test sets its own variables.
pub fn isolate_user_config() {
    USER_CONFIG_HOME.get_or_init(|| {
        let home = TempDir::new().ok();
        if let Some(dir) = &home {
            env::set_var("XDG_CONFIG_HOME", dir.path());
        }
        for (name, _) in env::vars_os() {
            if name.to_string_lossy().starts_with("WIZSTRINGS_") {
                env::remove_var(&name);
            }
        }
        home
    });
}

fn setup_test_logging() {
    let env_filter = match env::var("RUST_LOG") {
        Ok(spec) => EnvFilter::new(spec),
        Err(_) => EnvFilter::new("wizstrings=debug"),
    };

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
