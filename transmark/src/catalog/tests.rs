//! Tests for catalog lookup, layering, and file loading.

use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use unic_langid::langid;

use super::*;
use crate::error::CatalogError;

#[fixture]
fn czech() -> MessageCatalog {
    MessageCatalog::new(langid!("cs"))
        .with_message("All human beings are born free", "Všichni lidé rodí se svobodní")
        .with_message("blank", "")
}

struct CatalogDir {
    _temp: TempDir,
    path: Utf8PathBuf,
}

impl CatalogDir {
    fn write(&self, name: &str, contents: &str) {
        fs::write(self.path.join(name), contents).expect("write catalog file");
    }
}

#[fixture]
fn catalog_dir() -> CatalogDir {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 temp path");
    CatalogDir { _temp: temp, path }
}

#[rstest]
fn resolves_translated_entries(czech: MessageCatalog) {
    let resolution = czech.resolve("All human beings are born free", None);
    assert_eq!(resolution.template, "Všichni lidé rodí se svobodní");
    assert!(resolution.translated);
}

#[rstest]
#[case::fallback_message(Some("Fallback"), "Fallback")]
#[case::id_when_no_message(None, "missing")]
fn untranslated_ids_fall_back(
    czech: MessageCatalog,
    #[case] fallback: Option<&str>,
    #[case] expected: &str,
) {
    let resolution = czech.resolve("missing", fallback);
    assert_eq!(resolution.template, expected);
    assert!(!resolution.translated);
}

#[rstest]
fn empty_entries_count_as_missing(czech: MessageCatalog) {
    assert_eq!(czech.lookup("blank"), Some(""));
    assert_eq!(czech.resolve("blank", Some("Shown")).template, "Shown");
}

#[test]
fn noop_catalog_returns_id() {
    let catalog = NoOpCatalog::new();
    assert_eq!(catalog.resolve("msg.hello", None).template, "msg.hello");
}

#[rstest]
fn stacks_consult_layers_in_order(czech: MessageCatalog) {
    let base = MessageCatalog::new(langid!("en"))
        .with_message("All human beings are born free", "ignored")
        .with_message("blank", "From base")
        .with_message("only.base", "Base only");
    let stack = CatalogStack::new().with_layer(czech).with_layer(base);

    assert_eq!(stack.len(), 2);
    assert_eq!(
        stack.lookup("All human beings are born free"),
        Some("Všichni lidé rodí se svobodní")
    );
    assert_eq!(stack.lookup("blank"), Some("From base"));
    assert_eq!(stack.lookup("only.base"), Some("Base only"));
    assert_eq!(stack.lookup("nowhere"), None);
}

#[test]
fn shared_catalogs_implement_catalog() {
    let shared: Arc<dyn Catalog> =
        Arc::new(MessageCatalog::new(langid!("en")).with_message("a", "A"));
    assert_eq!(shared.lookup("a"), Some("A"));
}

#[test]
fn entries_are_sorted_by_id() {
    let catalog = MessageCatalog::new(langid!("en"))
        .with_message("b", "B")
        .with_message("a", "A");
    let ids: Vec<&str> = catalog.entries().map(|(id, _)| id).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn toml_tables_flatten_to_dotted_ids() {
    let catalog = MessageCatalog::from_toml_str(
        langid!("cs"),
        "title = \"Vítejte\"\n\n[nav]\nhome = \"Domů\"\n\n[nav.menu]\nopen = \"Otevřít\"\n",
    )
    .expect("valid catalog");
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.lookup("title"), Some("Vítejte"));
    assert_eq!(catalog.lookup("nav.home"), Some("Domů"));
    assert_eq!(catalog.lookup("nav.menu.open"), Some("Otevřít"));
}

#[test]
fn non_string_entries_are_rejected() {
    let err = MessageCatalog::from_toml_str(langid!("cs"), "count = 3\n")
        .expect_err("integers are not templates");
    assert!(matches!(
        err,
        CatalogError::InvalidEntry { ref id, ref found, .. } if id == "count" && found == "integer"
    ));
}

#[test]
fn malformed_toml_is_reported() {
    let err = MessageCatalog::from_toml_str(langid!("cs"), "title = \n")
        .expect_err("malformed TOML");
    assert!(matches!(err, CatalogError::Toml { ref locale, .. } if locale == "cs"));
}

#[cfg(feature = "serde_json")]
#[test]
fn json_objects_flatten_to_dotted_ids() {
    let catalog = MessageCatalog::from_json_str(
        langid!("de"),
        r#"{"greeting": "Hallo", "nav": {"home": "Start"}}"#,
    )
    .expect("valid catalog");
    assert_eq!(catalog.lookup("greeting"), Some("Hallo"));
    assert_eq!(catalog.lookup("nav.home"), Some("Start"));

    let err = MessageCatalog::from_json_str(langid!("de"), r#"{"list": []}"#)
        .expect_err("arrays are not templates");
    assert!(matches!(err, CatalogError::InvalidEntry { ref found, .. } if found == "array"));
}

#[rstest]
fn loads_catalog_from_directory(catalog_dir: CatalogDir) {
    catalog_dir.write("cs.toml", "hello = \"Ahoj\"\n");
    let catalog = load_catalog(&catalog_dir.path, &langid!("cs")).expect("load catalog");
    assert_eq!(catalog.locale(), &langid!("cs"));
    assert_eq!(catalog.lookup("hello"), Some("Ahoj"));
}

#[rstest]
fn missing_locale_file_is_an_error(catalog_dir: CatalogDir) {
    let err = load_catalog(&catalog_dir.path, &langid!("fr")).expect_err("no fr catalog");
    assert!(matches!(err, CatalogError::MissingLocale { ref locale, .. } if locale == "fr"));
}

#[test]
fn missing_directory_is_an_io_error() {
    let err = load_catalog(
        camino::Utf8Path::new("/nonexistent/transmark/catalogs"),
        &langid!("en"),
    )
    .expect_err("missing directory");
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[rstest]
fn chains_skip_missing_locales(catalog_dir: CatalogDir) {
    catalog_dir.write("cs.toml", "hello = \"Ahoj\"\n");
    catalog_dir.write("en.toml", "hello = \"Hello\"\nbye = \"Bye\"\n");
    let stack = load_catalog_chain(
        &catalog_dir.path,
        &langid!("cs-CZ"),
        &[langid!("cs"), langid!("en")],
    )
    .expect("load chain");
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.lookup("hello"), Some("Ahoj"));
    assert_eq!(stack.lookup("bye"), Some("Bye"));
}

#[rstest]
fn chains_without_any_catalog_fail(catalog_dir: CatalogDir) {
    let err = load_catalog_chain(&catalog_dir.path, &langid!("cs"), &[langid!("en")])
        .expect_err("nothing to load");
    assert!(matches!(err, CatalogError::MissingLocale { .. }));
}

#[rstest]
fn lists_available_locales(catalog_dir: CatalogDir) {
    catalog_dir.write("en.toml", "");
    catalog_dir.write("cs.toml", "");
    catalog_dir.write("de.json", "{}");
    catalog_dir.write("README.md", "not a catalog");
    catalog_dir.write("not a locale.toml", "");
    let locales = available_locales(&catalog_dir.path).expect("list locales");
    assert_eq!(locales, vec![langid!("cs"), langid!("de"), langid!("en")]);
}
