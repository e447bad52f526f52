//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `-r/--repository/-p/--path <PATH>`: repository to inspect
//! - `-P/--plugin <NAME>`: select a plugin instead of detecting one
//! - `--<NAME>`: shortcut for `--plugin NAME`, one per registered plugin
//! - `-c/--config <PATH>`: config file
//! - `--debug`: enable debug logging
//! - `-- <ARGS>...`: passed to the selected plugin
//!
//! The shortcut flags depend on the registry, so the derived command is
//! extended at runtime by [`Cli::command_for`].

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgGroup, CommandFactory, FromArgMatches, Parser};

use crate::core::config::Config;
use crate::core::env::dotenv_paths;
use crate::plugin::PluginRegistry;
use crate::ui::output::format_list;

/// Long flags that plugin shortcuts may not take over.
const RESERVED_LONGS: [&str; 7] = [
    "repository",
    "path",
    "plugin",
    "config",
    "debug",
    "help",
    "version",
];

/// Group id shared by the shortcut flags.
const SHORTCUT_GROUP: &str = "plugin_shortcut";

/// Fetch and display stats about a repository's remote host
#[derive(Parser, Debug)]
#[command(name = "repofetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use the repository at this path
    #[arg(
        short = 'r',
        long = "repository",
        visible_alias = "path",
        visible_short_alias = 'p',
        value_name = "PATH",
        default_value = "."
    )]
    pub repository: PathBuf,

    /// Use this plugin instead of detecting one
    #[arg(short = 'P', long, value_name = "PLUGIN")]
    pub plugin: Option<String>,

    /// Read configuration from this file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Arguments for the plugin
    #[arg(last = true, value_name = "PLUGIN_ARGS")]
    pub plugin_args: Vec<String>,
}

impl Cli {
    /// The command with one shortcut flag per plugin in `registry`.
    pub fn command_for(registry: &PluginRegistry) -> clap::Command {
        let mut command = Self::command().after_help(help_notes(registry));

        let shortcuts: Vec<&str> = registry
            .names()
            .into_iter()
            .filter(|name| !RESERVED_LONGS.contains(name))
            .collect();
        if shortcuts.is_empty() {
            return command;
        }

        command = command.group(
            ArgGroup::new(SHORTCUT_GROUP)
                .multiple(false)
                .conflicts_with("plugin"),
        );
        for name in shortcuts {
            let display = registry
                .find(name)
                .map(|p| p.display_name().to_string())
                .unwrap_or_else(|| name.to_string());
            command = command.arg(
                Arg::new(shortcut_id(name))
                    .long(name.to_string())
                    .action(ArgAction::SetTrue)
                    .group(SHORTCUT_GROUP)
                    .help(format!("Use the {} plugin", display)),
            );
        }
        command
    }

    /// Parse `args` (including the binary name) against `registry`.
    ///
    /// A shortcut flag is folded into [`Cli::plugin`].
    pub fn try_parse_with<I, T>(registry: &PluginRegistry, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_for(registry).try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;

        let shortcut = registry
            .names()
            .into_iter()
            .filter(|name| !RESERVED_LONGS.contains(name))
            .find(|name| {
                matches
                    .try_get_one::<bool>(&shortcut_id(name))
                    .ok()
                    .flatten()
                    .copied()
                    .unwrap_or(false)
            });
        if let Some(name) = shortcut {
            cli.plugin = Some(name.to_string());
        }
        Ok(cli)
    }
}

fn shortcut_id(name: &str) -> String {
    format!("shortcut-{}", name)
}

/// Settings needed before the full parse: the config decides which plugins
/// (and therefore which flags) exist, and logging should cover config loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EarlyArgs {
    pub config: Option<PathBuf>,
    pub debug: bool,
}

impl EarlyArgs {
    /// Scan raw arguments for `--config` and `--debug`, stopping at `--`.
    pub fn scan(args: &[OsString]) -> Self {
        let mut early = Self::default();
        let mut iter = args.iter().skip(1).map(|a| a.to_string_lossy());
        while let Some(arg) = iter.next() {
            match arg.as_ref() {
                "--" => break,
                "--debug" => early.debug = true,
                "-c" | "--config" => early.config = iter.next().map(|p| PathBuf::from(p.as_ref())),
                other => {
                    if let Some(path) = other.strip_prefix("--config=") {
                        early.config = Some(PathBuf::from(path));
                    } else if let Some(path) = other.strip_prefix("-c").filter(|p| !p.is_empty()) {
                        early.config = Some(PathBuf::from(path));
                    }
                }
            }
        }
        early
    }
}

fn help_notes(registry: &PluginRegistry) -> String {
    let dotenv = dotenv_paths()
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>();
    let config = Config::default_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(no home directory)".to_string());
    let plugins = if registry.is_empty() {
        "  (none)".to_string()
    } else {
        format_list(&registry.names(), "  ")
    };

    format!(
        "Plugin arguments follow `--`, e.g. `repofetch --github -- OWNER/REPOSITORY`.\n\n\
         Dotenv files:\n{}\n\n\
         Config file:\n  {}\n\n\
         Installed plugins:\n{}",
        format_list(&dotenv, "  "),
        config,
        plugins
    )
}
