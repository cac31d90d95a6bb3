//! Core crate for the `transmark` translation renderer.
//!
//! A message id is resolved against a [`Catalog`], the resulting ICU-style
//! template is parsed into a [`syntax::TokenTree`], and the tree is bound to
//! caller values and components to produce a sequence of [`OutputNode`]s.
//! The component type `C` is opaque: it can be an HTML tag name, a widget
//! handle, or anything else the caller's renderer understands.
//!
//! ```rust
//! use transmark::{I18n, MessageCatalog, OutputNode, Trans, Provider};
//! use unic_langid::langid;
//!
//! let catalog = MessageCatalog::new(langid!("cs"))
//!     .with_message("My name is {name}", "Jmenuji se {name}");
//! let provider = Provider::new(I18n::new(langid!("cs")).with_catalog(catalog));
//! let output = Trans::<&str>::new("My name is {name}")
//!     .with_value("name", "Dave")
//!     .render(&provider)
//!     .expect("valid template");
//! assert_eq!(output, vec![OutputNode::Text(String::from("Jmenuji se Dave"))]);
//! ```

mod bind;
mod catalog;
pub mod config;
mod error;
pub mod format;
pub mod plural;
pub mod syntax;
mod trans;
mod value;

pub use bind::{Binder, OutputNode, text_content};
pub use catalog::{
    Catalog, CatalogStack, MessageCatalog, NoOpCatalog, Resolution, available_locales,
    load_catalog, load_catalog_chain,
};
pub use chrono::NaiveDate;
pub use config::RenderConfig;
pub use error::{CaseTableError, CatalogError, ConfigError, ParseError, TransError};
pub use format::{FormatHook, FormatOptions, FormatTable};
pub use plural::{CldrPlurals, PluralCategorizer, PluralCategory, PluralKind};
pub use trans::{
    DiagnosticReporter, I18n, I18nHandle, Provider, RenderCallback, RenderSlot, RenderStrategy,
    Trans, TransComponent, TransDiagnostic, TransRenderProps, default_reporter,
};
pub use unic_langid::LanguageIdentifier;
pub use value::{Bindings, ComponentBinding, Key, Number, Value};
