//! Test helpers shared across crates.
//!
//! This crate provides an HTML-flavoured component type for asserting on
//! rendered output, a diagnostic recorder, and jailed catalog directories.

pub mod catalogs;
pub mod html;
pub mod report;

pub use catalogs::{CatalogFile, jail_error, with_catalogs};
pub use html::{Html, render_html};
pub use report::RecordingReporter;
