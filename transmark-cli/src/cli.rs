//! Command-line interface definitions for `transmark`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Parsed CLI arguments for `transmark`.
#[derive(Debug, Parser)]
#[command(name = "transmark")]
#[command(about = "Render and check ICU-style translation catalogs")]
#[command(version)]
pub struct Cli {
    /// Configuration file; defaults to `<config dir>/transmark/config.toml`.
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Overrides the configured locale.
    #[arg(long, global = true, value_name = "locale")]
    pub locale: Option<String>,
    /// Raises log verbosity; repeat for more detail.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of `transmark`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render one message and print it as markup.
    Render(RenderArgs),
    /// Parse every catalog template and report errors.
    Check(CheckArgs),
}

/// Arguments for `transmark render`.
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Message id to look up.
    pub id: String,
    /// Fallback message used when the catalogs lack `id`.
    #[arg(long, value_name = "template")]
    pub message: Option<String>,
    /// Binds a placeholder, as `key=value`.
    #[arg(long = "value", value_name = "key=value", value_parser = parse_binding)]
    pub values: Vec<(String, String)>,
    /// Binds a tag to an element name, as `key=tag`.
    #[arg(long = "component", value_name = "key=tag", value_parser = parse_binding)]
    pub components: Vec<(String, String)>,
}

/// Arguments for `transmark check`.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Locales to check; defaults to every catalog in the directory.
    #[arg(value_name = "locale")]
    pub locales: Vec<String>,
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("binding '{raw}' has an empty key"));
    }
    Ok((key.to_owned(), value.to_owned()))
}
