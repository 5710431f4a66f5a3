//! YAML-backed quiz content.

mod document;
mod yaml_catalog;

pub use yaml_catalog::{CatalogError, YamlQuizCatalog};
