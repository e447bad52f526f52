//! cli
//!
//! Command-line interface layer for repofetch.
//!
//! # Flow
//!
//! 1. Scan for `--config` and `--debug`, set up logging
//! 2. Load the config file and dotenv files
//! 3. Build the plugin registry from the config
//! 4. Parse the full command line (plugin shortcut flags need the registry)
//! 5. Resolve the plugin, fetch, render, print
//!
//! Plugin usage errors are printed as-is and exit with status 1.

pub mod args;

pub use args::{Cli, EarlyArgs};

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::Config;
use crate::core::env;
use crate::git::Git;
use crate::plugin::{resolve, Plugin, PluginError, PluginRegistry, Selection};
use crate::providers::builtin_registry;
use crate::render::{render, FormatOptions};
use crate::ui::output;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    run_from(std::env::args_os().collect())
}

/// Run with explicit arguments (including the binary name).
pub fn run_from(argv: Vec<OsString>) -> Result<ExitCode> {
    let early = EarlyArgs::scan(&argv);
    init_logging(early.debug);

    let config = match &early.config {
        Some(path) => Config::load_from(path),
        None => Config::load_or_init(),
    }?;
    debug!(path = ?config.loaded_from(), "loaded config");

    env::load_dotenv();

    let registry = builtin_registry(config.plugins());
    let cli = match Cli::try_parse_with(&registry, argv) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let options = FormatOptions::with_emojis(config.emojis_enabled());
    match fetch_plugin(&registry, &cli) {
        Ok(plugin) => {
            output::print(&render(plugin.as_ref(), &options)).context("failed to write output")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => match e.downcast_ref::<PluginError>() {
            Some(PluginError::Usage(message)) => {
                output::usage(message);
                Ok(ExitCode::from(1))
            }
            _ => Err(e),
        },
    }
}

/// Resolve the plugin for this invocation and fetch its data.
fn fetch_plugin(registry: &PluginRegistry, cli: &Cli) -> Result<Box<dyn Plugin>> {
    let mut plugin = match &cli.plugin {
        Some(name) => {
            let descriptor = registry
                .find(name)
                .ok_or_else(|| anyhow!("unknown plugin: {}", name))?;
            resolve(registry, Selection::Explicit(descriptor), &cli.plugin_args)?
        }
        None => {
            let repo = Git::open(&cli.repository)?;
            resolve(registry, Selection::Repository(&repo), &cli.plugin_args)?
        }
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(plugin.fetch())?;
    Ok(plugin)
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
