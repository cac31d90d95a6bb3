//! Message catalogs: id to template lookup for the active locale.
//!
//! [`Catalog`] is the seam between rendering and wherever translations live.
//! It is object-safe so a loaded catalog can sit behind `Arc<dyn Catalog>` and
//! be shared across render calls. [`CatalogStack`] layers catalogs so a
//! regional catalog can fall back to its base language.

mod load;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use unic_langid::LanguageIdentifier;

pub use load::{available_locales, load_catalog, load_catalog_chain};

/// Outcome of resolving a message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Template text to parse.
    pub template: &'a str,
    /// True when the template came from a catalog entry.
    pub translated: bool,
}

/// Looks up translated templates by message id.
pub trait Catalog: Send + Sync {
    /// Returns the template stored for `id`, if any.
    fn lookup(&self, id: &str) -> Option<&str>;

    /// Resolves `id` to a template: the catalog entry when present and
    /// non-empty, else `fallback`, else the id itself.
    ///
    /// # Examples
    /// ```rust
    /// use transmark::{Catalog, NoOpCatalog};
    ///
    /// let catalog = NoOpCatalog;
    /// assert_eq!(catalog.resolve("greeting", Some("Hello")).template, "Hello");
    /// assert_eq!(catalog.resolve("greeting", None).template, "greeting");
    /// ```
    fn resolve<'a>(&'a self, id: &'a str, fallback: Option<&'a str>) -> Resolution<'a> {
        self.lookup(id)
            .filter(|template| !template.is_empty())
            .map_or_else(
                || Resolution {
                    template: fallback.unwrap_or(id),
                    translated: false,
                },
                |template| Resolution {
                    template,
                    translated: true,
                },
            )
    }
}

/// Catalog with no entries; every id resolves to its fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCatalog;

impl NoOpCatalog {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Catalog for NoOpCatalog {
    fn lookup(&self, _id: &str) -> Option<&str> {
        None
    }
}

/// In-memory catalog for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    locale: LanguageIdentifier,
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new(locale: LanguageIdentifier) -> Self {
        Self {
            locale,
            messages: HashMap::new(),
        }
    }

    /// Adds an entry, replacing any previous template for the id.
    #[must_use]
    pub fn with_message(mut self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(id, template);
        self
    }

    /// Inserts an entry, returning the template it replaced.
    pub fn insert(&mut self, id: impl Into<String>, template: impl Into<String>) -> Option<String> {
        self.messages.insert(id.into(), template.into())
    }

    /// Locale the catalog translates into.
    #[must_use]
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true when the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates `(id, template)` pairs sorted by id.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .messages
            .iter()
            .map(|(id, template)| (id.as_str(), template.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries.into_iter()
    }
}

impl Catalog for MessageCatalog {
    fn lookup(&self, id: &str) -> Option<&str> {
        self.messages.get(id).map(String::as_str)
    }
}

impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    fn lookup(&self, id: &str) -> Option<&str> {
        (**self).lookup(id)
    }
}

/// Ordered catalog layers; the first layer holding an id wins.
#[derive(Clone, Default)]
pub struct CatalogStack {
    layers: Vec<Arc<dyn Catalog>>,
}

impl CatalogStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer consulted after the existing ones.
    #[must_use]
    pub fn with_layer(mut self, catalog: impl Catalog + 'static) -> Self {
        self.push(Arc::new(catalog));
        self
    }

    /// Appends a shared layer.
    pub fn push(&mut self, catalog: Arc<dyn Catalog>) {
        self.layers.push(catalog);
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true when no layers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl fmt::Debug for CatalogStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStack")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl Catalog for CatalogStack {
    fn lookup(&self, id: &str) -> Option<&str> {
        self.layers
            .iter()
            .find_map(|layer| layer.lookup(id).filter(|template| !template.is_empty()))
    }
}

#[cfg(test)]
mod tests;
