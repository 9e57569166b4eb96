use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawsymConfig {
    pub assets_dir: PathBuf,
    pub symbols_path: PathBuf,
    /// File extensions (without the dot) that count as diagram files in the corpus.
    pub corpus_extensions: Vec<String>,
    /// Keep element-declared width/height when the element type has no template.
    pub preserve_fallback_dimensions: bool,
    pub document: DocumentSettings,
}

impl Default for DrawsymConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            symbols_path: PathBuf::from("symbols.json"),
            corpus_extensions: vec!["xml".to_string(), "drawio".to_string()],
            preserve_fallback_dimensions: false,
            document: DocumentSettings::default(),
        }
    }
}

impl DrawsymConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| Error::InvalidJson {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    pub fn is_corpus_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.corpus_extensions
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(ext))
            })
    }
}

/// `mxfile` metadata and `mxGraphModel` page settings of generated documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentSettings {
    pub host: String,
    pub agent: String,
    pub version: String,
    pub diagram_name: String,
    pub diagram_id: String,
    pub dx: u32,
    pub dy: u32,
    pub grid: bool,
    pub grid_size: u32,
    pub guides: bool,
    pub tooltips: bool,
    pub connect: bool,
    pub arrows: bool,
    pub fold: bool,
    pub page: bool,
    pub page_scale: u32,
    pub page_width: u32,
    pub page_height: u32,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            host: "app.diagrams.net".to_string(),
            agent: "BPMNConverter/1.0".to_string(),
            version: "21.0.0".to_string(),
            diagram_name: "BPMN Process".to_string(),
            diagram_id: "generated_diagram_id".to_string(),
            dx: 1426,
            dy: 753,
            grid: true,
            grid_size: 10,
            guides: true,
            tooltips: true,
            connect: true,
            arrows: true,
            fold: true,
            page: true,
            page_scale: 1,
            page_width: 850,
            page_height: 1100,
        }
    }
}
