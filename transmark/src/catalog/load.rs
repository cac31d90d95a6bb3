//! Catalog files on disk.
//!
//! A catalog directory holds one file per locale named `<locale>.toml` (or
//! `<locale>.json` with the `serde_json` feature). Nested tables flatten into
//! dotted message ids, so `[nav] home = "Home"` defines `nav.home`.

use std::io::Read;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use unic_langid::LanguageIdentifier;

use super::{CatalogStack, MessageCatalog};
use crate::error::CatalogError;

const EXTENSIONS: &[&str] = &["toml", "json"];

impl MessageCatalog {
    /// Parses a TOML catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Toml`] for malformed TOML and
    /// [`CatalogError::InvalidEntry`] for entries that are neither strings nor
    /// tables.
    ///
    /// # Examples
    /// ```rust
    /// use transmark::{Catalog, MessageCatalog};
    /// use unic_langid::langid;
    ///
    /// let catalog = MessageCatalog::from_toml_str(
    ///     langid!("cs"),
    ///     "[nav]\nhome = \"Domů\"\n",
    /// )
    /// .expect("valid catalog");
    /// assert_eq!(catalog.lookup("nav.home"), Some("Domů"));
    /// ```
    pub fn from_toml_str(locale: LanguageIdentifier, text: &str) -> Result<Self, CatalogError> {
        let table: toml::Table = toml::from_str(text).map_err(|source| CatalogError::Toml {
            locale: locale.to_string(),
            source: Box::new(source),
        })?;
        let mut catalog = Self::new(locale);
        flatten_toml(&mut catalog, "", &table)?;
        Ok(catalog)
    }

    /// Parses a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for malformed JSON and
    /// [`CatalogError::InvalidEntry`] for entries that are neither strings nor
    /// objects.
    #[cfg(feature = "serde_json")]
    pub fn from_json_str(locale: LanguageIdentifier, text: &str) -> Result<Self, CatalogError> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)
            .map_err(|source| CatalogError::Json {
                locale: locale.to_string(),
                source,
            })?;
        let mut catalog = Self::new(locale);
        flatten_json(&mut catalog, "", &object)?;
        Ok(catalog)
    }
}

fn join_id(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

fn flatten_toml(
    catalog: &mut MessageCatalog,
    prefix: &str,
    table: &toml::Table,
) -> Result<(), CatalogError> {
    for (key, value) in table {
        let id = join_id(prefix, key);
        match value {
            toml::Value::String(template) => {
                catalog.insert(id, template.as_str());
            }
            toml::Value::Table(nested) => flatten_toml(catalog, &id, nested)?,
            other => {
                return Err(CatalogError::InvalidEntry {
                    id,
                    locale: catalog.locale().to_string(),
                    found: other.type_str().to_owned(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(feature = "serde_json")]
fn flatten_json(
    catalog: &mut MessageCatalog,
    prefix: &str,
    object: &serde_json::Map<String, serde_json::Value>,
) -> Result<(), CatalogError> {
    for (key, value) in object {
        let id = join_id(prefix, key);
        match value {
            serde_json::Value::String(template) => {
                catalog.insert(id, template.as_str());
            }
            serde_json::Value::Object(nested) => flatten_json(catalog, &id, nested)?,
            other => {
                return Err(CatalogError::InvalidEntry {
                    id,
                    locale: catalog.locale().to_string(),
                    found: json_kind(other).to_owned(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(feature = "serde_json")]
const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn open_dir(path: &Utf8Path) -> Result<Dir, CatalogError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(dir: &Dir, dir_path: &Utf8Path, name: &str) -> Result<Option<String>, CatalogError> {
    let io_error = |source| CatalogError::Io {
        path: dir_path.join(name),
        source,
    };
    let mut handle = match dir.open(name) {
        Ok(handle) => handle,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_error(err)),
    };
    let mut buffer = String::new();
    handle.read_to_string(&mut buffer).map_err(io_error)?;
    Ok(Some(buffer))
}

/// Loads the catalog for `locale` from `dir`.
///
/// `<locale>.toml` is preferred over `<locale>.json`.
///
/// # Errors
///
/// Returns [`CatalogError::MissingLocale`] when neither file exists,
/// [`CatalogError::Io`] when the directory or file cannot be read, and parse
/// errors from [`MessageCatalog::from_toml_str`].
pub fn load_catalog(
    dir: &Utf8Path,
    locale: &LanguageIdentifier,
) -> Result<MessageCatalog, CatalogError> {
    let handle = open_dir(dir)?;
    let stem = locale.to_string();

    if let Some(text) = read_file(&handle, dir, &format!("{stem}.toml"))? {
        tracing::debug!(locale = %locale, dir = %dir, "loaded TOML catalog");
        return MessageCatalog::from_toml_str(locale.clone(), &text);
    }

    #[cfg(feature = "serde_json")]
    if let Some(text) = read_file(&handle, dir, &format!("{stem}.json"))? {
        tracing::debug!(locale = %locale, dir = %dir, "loaded JSON catalog");
        return MessageCatalog::from_json_str(locale.clone(), &text);
    }

    Err(CatalogError::MissingLocale {
        locale: stem,
        dir: dir.to_path_buf(),
    })
}

/// Loads catalogs for `locale` then each fallback, skipping locales without
/// a file, and stacks them in that order.
///
/// # Errors
///
/// Returns [`CatalogError::MissingLocale`] when none of the locales has a
/// catalog, and any read or parse error from [`load_catalog`].
pub fn load_catalog_chain(
    dir: &Utf8Path,
    locale: &LanguageIdentifier,
    fallbacks: &[LanguageIdentifier],
) -> Result<CatalogStack, CatalogError> {
    let mut stack = CatalogStack::new();
    for candidate in std::iter::once(locale).chain(fallbacks) {
        match load_catalog(dir, candidate) {
            Ok(catalog) => stack.push(std::sync::Arc::new(catalog)),
            Err(CatalogError::MissingLocale { .. }) => {
                tracing::warn!(locale = %candidate, dir = %dir, "no catalog for locale; skipping");
            }
            Err(err) => return Err(err),
        }
    }
    if stack.is_empty() {
        return Err(CatalogError::MissingLocale {
            locale: locale.to_string(),
            dir: dir.to_path_buf(),
        });
    }
    Ok(stack)
}

/// Lists locales that have a catalog file in `dir`, sorted and deduplicated.
///
/// Files whose stem is not a locale identifier are skipped with a warning.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] when the directory cannot be read.
pub fn available_locales(dir: &Utf8Path) -> Result<Vec<LanguageIdentifier>, CatalogError> {
    let handle = open_dir(dir)?;
    let io_error = |source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut locales = Vec::new();
    for entry_result in handle.read_dir(".").map_err(io_error)? {
        let entry = entry_result.map_err(io_error)?;
        let file_name = entry.file_name().map_err(io_error)?;
        let path = Utf8PathBuf::from(file_name);
        let Some(extension) = path.extension() else {
            continue;
        };
        if !EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
        {
            continue;
        }
        let Some(stem) = path.file_stem() else {
            continue;
        };
        let parsed = LanguageIdentifier::from_str(stem).inspect_err(|err| {
            tracing::warn!(file = %path, error = %err, "skipping catalog file with invalid locale name");
        });
        if let Ok(locale) = parsed {
            locales.push(locale);
        }
    }
    locales.sort_by_key(ToString::to_string);
    locales.dedup();
    Ok(locales)
}
