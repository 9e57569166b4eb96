//! Modifier catalog extraction from a corpus of draw.io files.
//!
//! Each styled cell is classified against the [`TemplateSet`]; every style entry that differs
//! from the matched template's base style is harvested as a reusable modifier fragment.

use crate::config::DrawsymConfig;
use crate::diagnostic::Diagnostic;
use crate::registry::SymbolRegistry;
use crate::style::{self, Style};
use crate::template::TemplateSet;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// A styled cell as found in a corpus file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeRecord {
    pub id: Option<String>,
    pub style: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub shapes_processed: usize,
    pub shapes_per_category: IndexMap<&'static str, usize>,
}

#[derive(Debug, Clone)]
pub struct CatalogBuild {
    pub registry: SymbolRegistry,
    pub stats: CatalogStats,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reads the `mxCell` children of the first `mxGraphModel/root` in a draw.io document.
///
/// Documents without that structure (for example compressed diagrams) yield no records.
pub fn read_shape_records(xml: &str) -> Result<Vec<ShapeRecord>, String> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| e.to_string())?;
    let Some(model) = doc.descendants().find(|n| n.has_tag_name("mxGraphModel")) else {
        return Ok(Vec::new());
    };
    let Some(root) = model.children().find(|n| n.has_tag_name("root")) else {
        return Ok(Vec::new());
    };

    let records = root
        .children()
        .filter(|n| n.has_tag_name("mxCell"))
        .map(|cell| {
            let geometry = cell.children().find(|n| n.has_tag_name("mxGeometry"));
            let dimension = |name: &str| {
                geometry
                    .and_then(|g| g.attribute(name))
                    .and_then(|v| v.trim().parse::<f64>().ok())
            };
            ShapeRecord {
                id: cell.attribute("id").map(str::to_string),
                style: cell.attribute("style").map(str::to_string),
                width: dimension("width"),
                height: dimension("height"),
            }
        })
        .collect();
    Ok(records)
}

pub struct CatalogBuilder<'a> {
    templates: &'a TemplateSet,
    bases: IndexMap<&'static str, Style>,
    registry: SymbolRegistry,
    stats: CatalogStats,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(templates: &'a TemplateSet) -> Self {
        Self {
            templates,
            bases: templates.iter().map(|t| (t.id, t.base_style())).collect(),
            registry: SymbolRegistry::from_templates(templates),
            stats: CatalogStats::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Classifies one shape and records its style delta. Returns the matched category.
    pub fn add_shape(&mut self, file: &Path, shape: &ShapeRecord) -> Option<&'static str> {
        let raw = shape.style.as_deref().filter(|s| !s.is_empty())?;

        let templates = self.templates;
        let Some(template) = templates.classify(raw) else {
            self.push_diagnostic(Diagnostic::UnclassifiableShape {
                file: file.to_path_buf(),
                cell_id: shape.id.clone(),
                style: raw.to_string(),
            });
            return None;
        };

        let observed = Style::decode(raw);
        if let Some(base) = self.bases.get(template.id) {
            for (key, value) in observed.delta(base) {
                self.registry
                    .modifiers
                    .record(key, value, style::fragment(key, value));
            }
        }

        tracing::trace!(
            cell = shape.id.as_deref().unwrap_or(""),
            category = template.id,
            width = ?shape.width,
            height = ?shape.height,
            "classified shape"
        );
        self.stats.shapes_processed += 1;
        *self
            .stats
            .shapes_per_category
            .entry(template.id)
            .or_default() += 1;
        Some(template.id)
    }

    /// Adds every shape of one document. A document that fails to parse is reported and
    /// contributes nothing.
    pub fn add_document(&mut self, file: &Path, xml: &str) {
        self.stats.files_scanned += 1;
        match read_shape_records(xml) {
            Ok(records) => {
                tracing::debug!(file = %file.display(), cells = records.len(), "scanning corpus file");
                for record in &records {
                    self.add_shape(file, record);
                }
            }
            Err(message) => {
                self.stats.files_skipped += 1;
                self.push_diagnostic(Diagnostic::CorpusFileError {
                    file: file.to_path_buf(),
                    message,
                });
            }
        }
    }

    pub fn add_file(&mut self, file: &Path) {
        match std::fs::read_to_string(file) {
            Ok(xml) => self.add_document(file, &xml),
            Err(err) => {
                self.stats.files_scanned += 1;
                self.stats.files_skipped += 1;
                self.push_diagnostic(Diagnostic::CorpusFileError {
                    file: file.to_path_buf(),
                    message: err.to_string(),
                });
            }
        }
    }

    pub fn finish(self) -> CatalogBuild {
        tracing::info!(
            shapes = self.stats.shapes_processed,
            modifiers = self.registry.modifiers.fragment_count(),
            "catalog extraction finished"
        );
        CatalogBuild {
            registry: self.registry,
            stats: self.stats,
            diagnostics: self.diagnostics,
        }
    }

    fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }
}

/// Diagram files directly inside `dir`, in lexicographic order.
///
/// A missing or unreadable directory yields an empty list.
pub fn list_corpus_files(dir: &Path, config: &DrawsymConfig) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), "cannot read corpus directory: {err}");
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && config.is_corpus_file(p))
        .collect();
    files.sort();
    files
}

/// Builds a symbol registry from every diagram file in `dir`.
///
/// This never fails: unreadable files are skipped with a diagnostic, and an empty or missing
/// corpus still produces the template properties with an empty modifier catalog.
pub fn build_catalog(dir: &Path, templates: &TemplateSet, config: &DrawsymConfig) -> CatalogBuild {
    let mut builder = CatalogBuilder::new(templates);
    for file in list_corpus_files(dir, config) {
        builder.add_file(&file);
    }
    builder.finish()
}
