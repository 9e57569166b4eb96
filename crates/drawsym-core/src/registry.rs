//! The persisted `{templates, modifiers}` artifact shared by extraction and generation.

use crate::error::{Error, Result};
use crate::template::TemplateSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Value key used for flag entries, which carry no value of their own.
pub const DEFAULT_VALUE_KEY: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default = "vertex_flag")]
    pub vertex: String,
    #[serde(default)]
    pub style_base: String,
}

fn vertex_flag() -> String {
    "1".to_string()
}

impl TemplateProperties {
    pub fn is_vertex(&self) -> bool {
        self.vertex == "1"
    }
}

/// modifier key -> observed value (or [`DEFAULT_VALUE_KEY`]) -> style fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierCatalog(IndexMap<String, IndexMap<String, String>>);

impl ModifierCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fragment. An existing entry under the same key/value is overwritten.
    pub fn record(&mut self, key: &str, value: Option<&str>, fragment: String) {
        let value_key = value.unwrap_or(DEFAULT_VALUE_KEY);
        self.0
            .entry(key.to_string())
            .or_default()
            .insert(value_key.to_string(), fragment);
    }

    pub fn values(&self, key: &str) -> Option<&IndexMap<String, String>> {
        self.0.get(key)
    }

    pub fn fragment(&self, key: &str, value: &str) -> Option<&str> {
        self.0.get(key)?.get(value).map(|s| s.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of distinct modifier keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of key/value fragments.
    pub fn fragment_count(&self) -> usize {
        self.0.values().map(|m| m.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, String>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolRegistry {
    #[serde(default)]
    pub templates: IndexMap<String, TemplateProperties>,
    #[serde(default)]
    pub modifiers: ModifierCatalog,
}

impl SymbolRegistry {
    /// A registry holding the public properties of every template and no modifiers.
    pub fn from_templates(set: &TemplateSet) -> Self {
        let templates = set
            .iter()
            .map(|t| {
                (
                    t.id.to_string(),
                    TemplateProperties {
                        width: t.width,
                        height: t.height,
                        vertex: vertex_flag(),
                        style_base: t.style_base.to_string(),
                    },
                )
            })
            .collect();
        Self {
            templates,
            modifiers: ModifierCatalog::new(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| Error::InvalidJson { path: None, source })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|source| Error::InvalidJson { path: None, source })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingRegistry {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| Error::InvalidJson {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_json_pretty()?;
        std::fs::write(path, text).map_err(|e| Error::io(path, e))
    }
}
