//! Catalog directories inside a `figment::Jail`.
//!
//! [`with_catalogs`] writes one `{locale}.toml` file per entry into the jail's
//! scratch directory and hands the directory to the test body. The jail also
//! isolates the `TRANSMARK_*` environment.

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

/// A catalog written as `{locale}.toml`: locale stem and TOML body.
pub type CatalogFile<'a> = (&'a str, &'a str);

/// Runs `f` in a jail whose directory holds `catalogs`.
///
/// # Errors
///
/// Returns an error if a catalog cannot be written, the jail directory is not
/// UTF-8, or the closure fails.
pub fn with_catalogs<F, T>(catalogs: &[CatalogFile<'_>], f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail, &Utf8Path) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        for (locale, body) in catalogs {
            jail.create_file(format!("{locale}.toml"), body)?;
        }
        let dir = catalog_dir(jail)?;
        output = Some(f(jail, &dir)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("catalog jail produced no output"))
}

fn catalog_dir(jail: &figment::Jail) -> figment::error::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(jail.directory().to_path_buf())
        .map_err(|path| figment::Error::from(format!("jail path is not UTF-8: {}", path.display())))
}

/// Wraps a transmark error so it can leave a jail closure with `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a map_err adapter, which hands over owned errors"
)]
pub fn jail_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
