//! Non-fatal problems. Each one skips the offending unit and lets the batch continue.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnclassifiableShape {
        file: PathBuf,
        cell_id: Option<String>,
        style: String,
    },
    CorpusFileError {
        file: PathBuf,
        message: String,
    },
    UnknownElementType {
        element_id: String,
        element_type: String,
    },
    UnknownModifierValue {
        element_id: String,
        key: String,
        value: String,
    },
    DanglingConnection {
        connection_id: String,
        source: String,
        target: String,
    },
}

impl Diagnostic {
    /// Logs the diagnostic at the level its kind warrants.
    pub fn emit(&self) {
        match self {
            Diagnostic::UnclassifiableShape { .. } => tracing::debug!("{self}"),
            _ => tracing::warn!("{self}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnclassifiableShape {
                file,
                cell_id,
                style,
            } => write!(
                f,
                "No template matches cell {} in {}: {style}",
                cell_id.as_deref().unwrap_or("<unnamed>"),
                file.display()
            ),
            Diagnostic::CorpusFileError { file, message } => {
                write!(f, "Error processing {}: {message}", file.display())
            }
            Diagnostic::UnknownElementType {
                element_id,
                element_type,
            } => write!(
                f,
                "Template type '{element_type}' not found for element {element_id}. Using generic task."
            ),
            Diagnostic::UnknownModifierValue {
                element_id,
                key,
                value,
            } => write!(
                f,
                "Value '{value}' for modifier '{key}' not found (element {element_id})."
            ),
            Diagnostic::DanglingConnection {
                connection_id,
                source,
                target,
            } => write!(
                f,
                "Connection {connection_id} refers to missing nodes {source}->{target}"
            ),
        }
    }
}
