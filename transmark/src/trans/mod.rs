//! The translation adapter: catalog lookup, parsing, binding, and the final
//! presentation step.
//!
//! [`I18n`] bundles everything one locale needs and translates messages
//! directly. [`I18nHandle`] lets an application switch the active locale
//! while render calls keep a consistent snapshot. [`Trans`] mirrors the props
//! of a translation component and renders through a [`Provider`].

mod strategy;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use unic_langid::LanguageIdentifier;

pub use strategy::{
    DiagnosticReporter, RenderCallback, RenderSlot, RenderStrategy, TransComponent,
    TransDiagnostic, TransRenderProps, default_reporter,
};

use crate::bind::{Binder, OutputNode, text_content};
use crate::catalog::{Catalog, NoOpCatalog};
use crate::error::TransError;
use crate::format::{FormatHook, FormatTable};
use crate::plural::{CldrPlurals, PluralCategorizer};
use crate::syntax::parse;
use crate::value::{Bindings, Key, Value};

/// Locale, catalog, plural rules, and named formats for one language.
#[derive(Clone)]
pub struct I18n {
    locale: LanguageIdentifier,
    catalog: Arc<dyn Catalog>,
    plurals: Arc<dyn PluralCategorizer>,
    formats: FormatTable,
}

impl I18n {
    /// Creates an instance with no translations and CLDR plural rules.
    #[must_use]
    pub fn new(locale: LanguageIdentifier) -> Self {
        let plurals = Arc::new(CldrPlurals::new(locale.clone()));
        Self {
            locale,
            catalog: Arc::new(NoOpCatalog),
            plurals,
            formats: FormatTable::new(),
        }
    }

    /// Replaces the catalog.
    #[must_use]
    pub fn with_catalog(self, catalog: impl Catalog + 'static) -> Self {
        self.with_shared_catalog(Arc::new(catalog))
    }

    /// Replaces the catalog with a shared one.
    #[must_use]
    pub fn with_shared_catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replaces the plural rules.
    #[must_use]
    pub fn with_plurals(mut self, plurals: impl PluralCategorizer + 'static) -> Self {
        self.plurals = Arc::new(plurals);
        self
    }

    /// Replaces the base named formats.
    #[must_use]
    pub fn with_formats(mut self, formats: FormatTable) -> Self {
        self.formats = formats;
        self
    }

    /// Active locale.
    #[must_use]
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Catalog used for lookups.
    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    /// Base named formats.
    #[must_use]
    pub const fn formats(&self) -> &FormatTable {
        &self.formats
    }

    /// Translates `id` with the base formats.
    ///
    /// # Errors
    ///
    /// Returns [`TransError::Parse`] when the resolved template is malformed.
    pub fn translate<C: Clone>(
        &self,
        id: &str,
        message: Option<&str>,
        bindings: &Bindings<C>,
    ) -> Result<Vec<OutputNode<C>>, TransError> {
        self.translate_with(id, message, bindings, None)
    }

    /// Translates `id`, consulting `formats` before the base formats.
    ///
    /// # Errors
    ///
    /// Returns [`TransError::Parse`] when the resolved template is malformed.
    pub fn translate_with<C: Clone>(
        &self,
        id: &str,
        message: Option<&str>,
        bindings: &Bindings<C>,
        formats: Option<&FormatTable>,
    ) -> Result<Vec<OutputNode<C>>, TransError> {
        let resolution = self.catalog.resolve(id, message);
        if !resolution.translated {
            tracing::debug!(id, locale = %self.locale, "no translation; using fallback");
        }
        let tree = parse(resolution.template).map_err(|source| TransError::Parse {
            id: id.to_owned(),
            source,
        })?;

        let hook = formats
            .into_iter()
            .fold(FormatHook::new(&self.locale), FormatHook::with_layer)
            .with_layer(&self.formats);
        let binder = Binder::new(bindings, hook, self.plurals.as_ref());
        Ok(binder.bind(&tree))
    }

    /// Translates a message to plain text. Components contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TransError::Parse`] when the resolved template is malformed.
    ///
    /// # Examples
    /// ```rust
    /// use transmark::{Bindings, I18n};
    /// use unic_langid::langid;
    ///
    /// let i18n = I18n::new(langid!("en"));
    /// let bindings = Bindings::<()>::new().with_value("name", "Dave");
    /// let text = i18n
    ///     .translate_text("unknown", Some("Not translated yet, {name}"), &bindings)
    ///     .expect("valid template");
    /// assert_eq!(text, "Not translated yet, Dave");
    /// ```
    pub fn translate_text<C: Clone>(
        &self,
        id: &str,
        message: Option<&str>,
        bindings: &Bindings<C>,
    ) -> Result<String, TransError> {
        self.translate(id, message, bindings)
            .map(|nodes| text_content(&nodes))
    }
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("locale", &self.locale)
            .field("formats", &self.formats)
            .finish_non_exhaustive()
    }
}

/// Shared, switchable [`I18n`].
///
/// Render calls take a [`snapshot`](Self::snapshot) and use it throughout, so
/// activating another locale mid-render never mixes languages.
#[derive(Clone)]
pub struct I18nHandle {
    active: Arc<RwLock<Arc<I18n>>>,
}

impl I18nHandle {
    /// Wraps an initial instance.
    #[must_use]
    pub fn new(i18n: I18n) -> Self {
        Self {
            active: Arc::new(RwLock::new(Arc::new(i18n))),
        }
    }

    /// Returns the active instance.
    #[must_use]
    pub fn snapshot(&self) -> Arc<I18n> {
        Arc::clone(&self.active.read())
    }

    /// Makes `i18n` the active instance for subsequent snapshots.
    pub fn activate(&self, i18n: I18n) {
        let locale = i18n.locale().clone();
        *self.active.write() = Arc::new(i18n);
        tracing::debug!(locale = %locale, "activated locale");
    }

    /// Locale of the active instance.
    #[must_use]
    pub fn locale(&self) -> LanguageIdentifier {
        self.active.read().locale().clone()
    }
}

impl fmt::Debug for I18nHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18nHandle")
            .field("locale", &self.locale())
            .finish()
    }
}

impl From<I18n> for I18nHandle {
    fn from(value: I18n) -> Self {
        Self::new(value)
    }
}

/// Context shared by [`Trans`] renders: the i18n handle, an optional default
/// component, and the diagnostic reporter.
pub struct Provider<C> {
    i18n: I18nHandle,
    default_component: Option<RenderCallback<C>>,
    report: DiagnosticReporter,
}

impl<C> Provider<C> {
    /// Creates a provider that reports diagnostics through `tracing`.
    #[must_use]
    pub fn new(i18n: impl Into<I18nHandle>) -> Self {
        Self {
            i18n: i18n.into(),
            default_component: None,
            report: default_reporter(),
        }
    }

    /// Sets the component used when a call supplies neither `render` nor
    /// `component`.
    #[must_use]
    pub fn with_default_component(mut self, component: RenderCallback<C>) -> Self {
        self.default_component = Some(component);
        self
    }

    /// Replaces the diagnostic reporter.
    #[must_use]
    pub fn with_reporter(mut self, report: DiagnosticReporter) -> Self {
        self.report = report;
        self
    }

    /// The i18n handle.
    #[must_use]
    pub const fn i18n(&self) -> &I18nHandle {
        &self.i18n
    }
}

impl<C> Clone for Provider<C> {
    fn clone(&self) -> Self {
        Self {
            i18n: self.i18n.clone(),
            default_component: self.default_component.clone(),
            report: Arc::clone(&self.report),
        }
    }
}

impl<C> fmt::Debug for Provider<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("i18n", &self.i18n)
            .field("default_component", &self.default_component.is_some())
            .finish_non_exhaustive()
    }
}

/// Props of one translation render.
///
/// # Examples
/// ```rust
/// use transmark::{I18n, MessageCatalog, OutputNode, Provider, Trans};
/// use unic_langid::langid;
///
/// let catalog = MessageCatalog::new(langid!("cs"))
///     .with_message("Read <0>the docs</0>", "Přečtěte si <0>dokumentaci</0>");
/// let provider = Provider::new(I18n::new(langid!("cs")).with_catalog(catalog));
/// let output = Trans::new("Read <0>the docs</0>")
///     .with_component(0, "a")
///     .render(&provider)
///     .expect("valid template");
/// assert_eq!(
///     output,
///     vec![
///         OutputNode::Text(String::from("Přečtěte si ")),
///         OutputNode::Element {
///             component: "a",
///             children: vec![OutputNode::Text(String::from("dokumentaci"))],
///         },
///     ]
/// );
/// ```
pub struct Trans<C> {
    id: String,
    message: Option<String>,
    bindings: Bindings<C>,
    formats: Option<FormatTable>,
    render: RenderSlot<RenderCallback<C>>,
    component: RenderSlot<TransComponent<C>>,
}

impl<C: Clone> Trans<C> {
    /// Starts props for message `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: None,
            bindings: Bindings::new(),
            formats: None,
            render: RenderSlot::Unset,
            component: RenderSlot::Unset,
        }
    }

    /// Sets the fallback message used when the catalog has no entry.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Binds a placeholder value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<Key>, value: impl Into<Value<C>>) -> Self {
        self.bindings.insert_value(key, value);
        self
    }

    /// Binds a wrapper component to a tag.
    #[must_use]
    pub fn with_component(mut self, key: impl Into<Key>, component: C) -> Self {
        self.bindings = self.bindings.with_component(key, component);
        self
    }

    /// Binds a list of components emitted in place of a tag.
    #[must_use]
    pub fn with_components(
        mut self,
        key: impl Into<Key>,
        components: impl IntoIterator<Item = C>,
    ) -> Self {
        self.bindings = self.bindings.with_components(key, components);
        self
    }

    /// Replaces all bindings.
    #[must_use]
    pub fn with_bindings(mut self, bindings: Bindings<C>) -> Self {
        self.bindings = bindings;
        self
    }

    /// Sets call-level named formats; they override provider formats of the
    /// same name.
    #[must_use]
    pub fn with_formats(mut self, formats: FormatTable) -> Self {
        self.formats = Some(formats);
        self
    }

    /// Sets the `render` prop.
    #[must_use]
    pub fn with_render(mut self, render: RenderSlot<RenderCallback<C>>) -> Self {
        self.render = render;
        self
    }

    /// Sets the `component` prop to a wrapper around the translation.
    #[must_use]
    pub fn with_wrapper(mut self, component: RenderSlot<C>) -> Self {
        self.component = component.map(TransComponent::Wrapper);
        self
    }

    /// Sets the `component` prop to a function of the render props.
    #[must_use]
    pub fn with_component_fn(mut self, component: RenderCallback<C>) -> Self {
        self.component = RenderSlot::Set(TransComponent::Function(component));
        self
    }

    /// Message id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Renders through `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`TransError::Parse`] when the resolved template is malformed.
    pub fn render(&self, provider: &Provider<C>) -> Result<Vec<OutputNode<C>>, TransError> {
        let i18n = provider.i18n.snapshot();
        let translation = i18n.translate_with(
            &self.id,
            self.message.as_deref(),
            &self.bindings,
            self.formats.as_ref(),
        )?;
        let strategy = RenderStrategy::resolve(
            &self.render,
            &self.component,
            provider.default_component.as_ref(),
            &provider.report,
        );
        tracing::debug!(id = self.id.as_str(), strategy = strategy.name(), "rendering translation");
        Ok(strategy.apply(TransRenderProps {
            id: &self.id,
            message: self.message.as_deref(),
            translation,
        }))
    }

    /// Renders through `provider` when one is available.
    ///
    /// # Errors
    ///
    /// Returns [`TransError::MissingProvider`] when `provider` is `None`, and
    /// the errors of [`render`](Self::render) otherwise.
    pub fn render_in(
        &self,
        provider: Option<&Provider<C>>,
    ) -> Result<Vec<OutputNode<C>>, TransError> {
        let Some(context) = provider else {
            return Err(TransError::MissingProvider {
                id: self.id.clone(),
                message: self.message.clone(),
            });
        };
        self.render(context)
    }
}

impl<C> fmt::Debug for Trans<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trans")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("render", &self.render)
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}
