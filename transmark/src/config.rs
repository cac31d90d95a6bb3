//! Layered render configuration.
//!
//! Values merge in increasing precedence: built-in defaults, an optional TOML
//! file, then `TRANSMARK_*` environment variables. Nested keys in the
//! environment use `__`, so `TRANSMARK_FORMATS__PRICE__STYLE=currency` sets
//! `formats.price.style`. Environment keys are lowercased, so camelCase format
//! options such as `dateStyle` can only be set from the file.

use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::catalog::load_catalog_chain;
use crate::error::ConfigError;
use crate::format::FormatTable;
use crate::trans::I18n;

/// Prefix of environment variables read by [`RenderConfig::load`].
pub const ENV_PREFIX: &str = "TRANSMARK_";

/// Settings needed to build an [`I18n`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Active locale identifier.
    pub locale: String,
    /// Locales consulted, in order, when the active catalog lacks an id.
    pub fallback_locales: Vec<String>,
    /// Directory holding `<locale>.toml` catalogs.
    pub catalog_dir: Option<Utf8PathBuf>,
    /// Named number and date formats.
    pub formats: FormatTable,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            locale: String::from("en"),
            fallback_locales: Vec::new(),
            catalog_dir: None,
            formats: FormatTable::new(),
        }
    }
}

impl RenderConfig {
    /// Builds the provider chain without extracting it.
    #[must_use]
    pub fn figment(file: Option<&Utf8Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from defaults, `file`, and the environment.
    ///
    /// A missing `file` contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Gathering`] when a layer fails to parse or a
    /// value has the wrong type.
    pub fn load(file: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment(file))
    }

    /// Extracts configuration from a prepared figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Gathering`] when extraction fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Parses the active locale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocale`] for malformed identifiers.
    pub fn locale(&self) -> Result<LanguageIdentifier, ConfigError> {
        parse_locale(&self.locale)
    }

    /// Parses the fallback chain, dropping duplicates and the active locale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocale`] for malformed identifiers.
    pub fn fallback_locales(&self) -> Result<Vec<LanguageIdentifier>, ConfigError> {
        let active = self.locale()?;
        let mut chain: Vec<LanguageIdentifier> = Vec::new();
        for value in &self.fallback_locales {
            let locale = parse_locale(value)?;
            if locale == active || chain.contains(&locale) {
                continue;
            }
            chain.push(locale);
        }
        Ok(chain)
    }

    /// Builds an [`I18n`] for the configured locale.
    ///
    /// Without a `catalog_dir` every message falls back to its id or message.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocale`] for malformed identifiers and
    /// [`ConfigError::Catalog`] when catalogs cannot be loaded.
    pub fn build_i18n(&self) -> Result<I18n, ConfigError> {
        let locale = self.locale()?;
        let fallbacks = self.fallback_locales()?;
        let base = I18n::new(locale.clone()).with_formats(self.formats.clone());
        let Some(dir) = self.catalog_dir.as_deref() else {
            tracing::debug!(locale = %locale, "no catalog directory configured");
            return Ok(base);
        };
        let stack = load_catalog_chain(dir, &locale, &fallbacks)?;
        Ok(base.with_catalog(stack))
    }
}

fn parse_locale(value: &str) -> Result<LanguageIdentifier, ConfigError> {
    LanguageIdentifier::from_str(value).map_err(|err| ConfigError::InvalidLocale {
        value: value.to_owned(),
        message: err.to_string(),
    })
}
