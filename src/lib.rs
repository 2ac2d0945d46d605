//! Extract translatable strings from JSON wizard definitions.
//!
//! Every `wizard.json` under a directory is parsed, each leaf reached
//! through a `tr`-prefixed key is collected, and a C++ stub listing them
//! as `QT_TRANSLATE_NOOP` markers is written for the translation tools.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
