//! Library half of the `transmark` binary.
//!
//! [`run`] executes a parsed [`Cli`] against a writer so commands can be
//! exercised without spawning a process.

pub mod cli;
pub mod error;
mod markup;

use std::io::Write;
use std::str::FromStr;

use camino::Utf8PathBuf;
use transmark::{
    I18n, LanguageIdentifier, Number, Provider, RenderConfig, Trans, Value, available_locales,
    load_catalog, syntax::parse,
};

pub use crate::cli::{CheckArgs, Cli, Command, RenderArgs};
pub use crate::error::CliError;
pub use crate::markup::to_markup;

/// Runs the selected subcommand, writing results to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when configuration, catalogs, or rendering fail, and
/// [`CliError::InvalidTemplates`] when `check` finds malformed templates.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let config = load_config(cli)?;
    match &cli.command {
        Command::Render(args) => render(&config, args, out),
        Command::Check(args) => check(&config, args, out),
    }
}

/// Loads configuration from `--config` or the default location, then
/// applies `--locale`.
///
/// # Errors
///
/// Returns [`CliError::Config`] when a configuration layer is invalid.
pub fn load_config(cli: &Cli) -> Result<RenderConfig, CliError> {
    let path = cli.config.clone().or_else(default_config_path);
    tracing::debug!(path = ?path, "loading configuration");
    let mut config = RenderConfig::load(path.as_deref())?;
    if let Some(locale) = &cli.locale {
        config.locale.clone_from(locale);
    }
    Ok(config)
}

/// `<config dir>/transmark/config.toml`, when the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<Utf8PathBuf> {
    let base = dirs::config_dir()?;
    let dir = Utf8PathBuf::from_path_buf(base).ok()?;
    Some(dir.join("transmark").join("config.toml"))
}

/// Renders one message as markup followed by a newline.
///
/// Values that read as numbers are bound as numbers so plural and number
/// placeholders apply.
///
/// # Errors
///
/// Returns [`CliError`] when the catalogs cannot be loaded, the template is
/// malformed, or writing fails.
pub fn render(
    config: &RenderConfig,
    args: &RenderArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let i18n: I18n = config.build_i18n()?;
    let provider = Provider::new(i18n);

    let mut props = Trans::<String>::new(args.id.clone());
    if let Some(message) = &args.message {
        props = props.with_message(message.clone());
    }
    for (key, raw) in &args.values {
        let value: Value<String> =
            Number::parse(raw).map_or_else(|| Value::from(raw.as_str()), Value::from);
        props = props.with_value(key.clone(), value);
    }
    for (key, tag) in &args.components {
        props = props.with_component(key.clone(), tag.clone());
    }

    let output = props.render(&provider)?;
    writeln!(out, "{}", to_markup(&output))?;
    Ok(())
}

/// Parses every template of the selected catalogs and lists failures.
///
/// # Errors
///
/// Returns [`CliError::NoCatalogDir`] without a catalog directory,
/// [`CliError::InvalidTemplates`] when any template fails to parse, and
/// catalog or output errors otherwise.
pub fn check(
    config: &RenderConfig,
    args: &CheckArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let Some(dir) = config.catalog_dir.as_deref() else {
        return Err(CliError::NoCatalogDir);
    };
    let locales = if args.locales.is_empty() {
        available_locales(dir)?
    } else {
        args.locales
            .iter()
            .map(String::as_str)
            .map(parse_locale)
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut failures = 0_usize;
    let mut checked = 0_usize;
    for locale in &locales {
        let catalog = load_catalog(dir, locale)?;
        for (id, template) in catalog.entries() {
            checked += 1;
            if let Err(err) = parse(template) {
                failures += 1;
                writeln!(out, "{locale} {id}: {err}")?;
            }
        }
        tracing::info!(locale = %locale, entries = catalog.len(), "checked catalog");
    }

    writeln!(
        out,
        "checked {checked} template(s) in {} locale(s), {failures} invalid",
        locales.len()
    )?;
    if failures > 0 {
        return Err(CliError::InvalidTemplates { count: failures });
    }
    Ok(())
}

fn parse_locale(value: &str) -> Result<LanguageIdentifier, CliError> {
    LanguageIdentifier::from_str(value).map_err(|err| CliError::InvalidLocale {
        value: value.to_owned(),
        message: err.to_string(),
    })
}
