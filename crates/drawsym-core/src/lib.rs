#![forbid(unsafe_code)]

//! Symbol catalog extraction and BPMN-to-draw.io generation (headless).
//!
//! Two pipelines share one artifact, the [`SymbolRegistry`]:
//! - extraction scans a corpus of draw.io files, classifies each styled cell against the
//!   [`TemplateSet`] and harvests the style entries that differ from the template's base style
//! - generation resolves each input element to a template plus modifier fragments and emits an
//!   `mxfile` document

pub mod catalog;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod generate;
pub mod model;
pub mod mxfile;
pub mod registry;
pub mod style;
pub mod template;
pub mod utils;

pub use catalog::{CatalogBuild, CatalogBuilder, CatalogStats, ShapeRecord, build_catalog};
pub use config::{DocumentSettings, DrawsymConfig};
pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use generate::{GenerateOptions, Generated, Resolved, generate_diagram, resolve};
pub use model::{
    Connection, ConversionInput, DiagramDocument, EdgeRecord, Element, Point, VertexRecord,
};
pub use registry::{ModifierCatalog, SymbolRegistry, TemplateProperties};
pub use style::Style;
pub use template::{Template, TemplateSet};

use std::path::Path;

/// Output of one conversion request.
#[derive(Debug, Clone)]
pub struct Converted {
    pub xml: String,
    pub document: DiagramDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// A loaded registry plus the settings that shape generated documents.
///
/// The registry is immutable once loaded and may be reused across requests.
#[derive(Debug, Clone)]
pub struct Converter {
    registry: SymbolRegistry,
    config: DrawsymConfig,
}

impl Converter {
    pub fn new(registry: SymbolRegistry) -> Self {
        Self {
            registry,
            config: DrawsymConfig::default(),
        }
    }

    /// Loads the registry from `config.symbols_path`.
    pub fn from_config(config: DrawsymConfig) -> Result<Self> {
        let registry = SymbolRegistry::load(&config.symbols_path)?;
        Ok(Self { registry, config })
    }

    pub fn with_config(mut self, config: DrawsymConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DrawsymConfig {
        &self.config
    }

    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            preserve_fallback_dimensions: self.config.preserve_fallback_dimensions,
        }
    }

    pub fn generate(&self, input: &ConversionInput) -> Generated {
        generate_diagram(input, &self.registry, self.options())
    }

    pub fn convert(&self, input: &ConversionInput) -> Converted {
        let Generated {
            document,
            diagnostics,
        } = self.generate(input);
        let xml = mxfile::render_mxfile(&document, &self.config.document);
        Converted {
            xml,
            document,
            diagnostics,
        }
    }

    pub fn convert_str(&self, json: &str) -> Result<Converted> {
        let input: ConversionInput = serde_json::from_str(json)
            .map_err(|source| Error::InvalidJson { path: None, source })?;
        Ok(self.convert(&input))
    }

    /// Reads a JSON request from `input` and writes the `mxfile` document to `output`.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<Converted> {
        let text = std::fs::read_to_string(input).map_err(|e| Error::io(input, e))?;
        let request: ConversionInput =
            serde_json::from_str(&text).map_err(|source| Error::InvalidJson {
                path: Some(input.to_path_buf()),
                source,
            })?;
        let converted = self.convert(&request);
        std::fs::write(output, &converted.xml).map_err(|e| Error::io(output, e))?;
        Ok(converted)
    }
}

/// Builds the registry from `config.assets_dir` and writes it to `config.symbols_path`.
pub fn extract_symbols(config: &DrawsymConfig) -> Result<CatalogBuild> {
    let build = build_catalog(&config.assets_dir, &TemplateSet::bpmn(), config);
    build.registry.save(&config.symbols_path)?;
    Ok(build)
}

#[cfg(test)]
mod tests;
