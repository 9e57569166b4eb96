//! Style resolution and cell emission for a conversion request.

use crate::diagnostic::Diagnostic;
use crate::model::{
    Connection, ConversionInput, DiagramDocument, EdgeRecord, Element, Geometry, ROOT_PARENT,
    VertexRecord,
};
use crate::registry::SymbolRegistry;
use crate::utils::attribute_value_string;
use rustc_hash::FxHashSet;

/// Element keys that never select a modifier.
pub const RESERVED_ATTRIBUTES: [&str; 7] = ["id", "type", "label", "x", "y", "width", "height"];

pub const FALLBACK_STYLE: &str =
    "shape=mxgraph.bpmn.task2;rectStyle=rounded;size=10;html=1;whiteSpace=wrap;";
pub const FALLBACK_WIDTH: f64 = 120.0;
pub const FALLBACK_HEIGHT: f64 = 80.0;

pub const EDGE_STYLE: &str =
    "edgeStyle=orthogonalEdgeStyle;rounded=0;orthogonalLoop=1;jettySize=auto;html=1;";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Keep element-declared width/height when falling back to the generic style.
    pub preserve_fallback_dimensions: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub style: String,
    pub width: f64,
    pub height: f64,
    /// `None` when the generic fallback was used.
    pub template: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Generated {
    pub document: DiagramDocument,
    pub diagnostics: Vec<Diagnostic>,
}

fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    diagnostic.emit();
    diagnostics.push(diagnostic);
}

/// Resolves the rendering style and size of one element.
///
/// The declared type is looked up verbatim in the registry; styles are never re-classified
/// here. Modifier fragments are appended in attribute declaration order, each terminated by
/// `;` unless it already ends with one.
pub fn resolve(
    element: &Element,
    registry: &SymbolRegistry,
    options: GenerateOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Resolved {
    let Some(template) = registry.templates.get(&element.kind) else {
        report(
            diagnostics,
            Diagnostic::UnknownElementType {
                element_id: element.id.clone(),
                element_type: element.kind.clone(),
            },
        );
        let (width, height) = if options.preserve_fallback_dimensions {
            (
                element.width.unwrap_or(FALLBACK_WIDTH),
                element.height.unwrap_or(FALLBACK_HEIGHT),
            )
        } else {
            (FALLBACK_WIDTH, FALLBACK_HEIGHT)
        };
        return Resolved {
            style: FALLBACK_STYLE.to_string(),
            width,
            height,
            template: None,
        };
    };

    let mut style = template.style_base.clone();
    for (key, value) in &element.attributes {
        if RESERVED_ATTRIBUTES.contains(&key.as_str()) {
            continue;
        }
        if !registry.modifiers.contains_key(key) {
            continue;
        }
        let value = attribute_value_string(value);
        match registry.modifiers.fragment(key, &value) {
            Some(fragment) => {
                style.push_str(fragment);
                if !fragment.ends_with(';') {
                    style.push(';');
                }
            }
            None => report(
                diagnostics,
                Diagnostic::UnknownModifierValue {
                    element_id: element.id.clone(),
                    key: key.clone(),
                    value,
                },
            ),
        }
    }

    Resolved {
        style,
        width: element
            .width
            .or(template.width)
            .unwrap_or(FALLBACK_WIDTH),
        height: element
            .height
            .or(template.height)
            .unwrap_or(FALLBACK_HEIGHT),
        template: Some(element.kind.clone()),
    }
}

pub fn generate_vertex(element: &Element, resolved: Resolved) -> VertexRecord {
    VertexRecord {
        id: element.id.clone(),
        label: element.label.clone().unwrap_or_default(),
        style: resolved.style,
        parent: element.parent(),
        geometry: Geometry {
            x: element.x.unwrap_or(0.0),
            y: element.y.unwrap_or(0.0),
            width: resolved.width,
            height: resolved.height,
        },
    }
}

/// Returns `None` (and reports a dangling connection) unless both endpoints were emitted.
pub fn generate_edge(
    connection: &Connection,
    known_vertex_ids: &FxHashSet<&str>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<EdgeRecord> {
    if !known_vertex_ids.contains(connection.source.as_str())
        || !known_vertex_ids.contains(connection.target.as_str())
    {
        report(
            diagnostics,
            Diagnostic::DanglingConnection {
                connection_id: connection.id.clone(),
                source: connection.source.clone(),
                target: connection.target.clone(),
            },
        );
        return None;
    }

    Some(EdgeRecord {
        id: connection.id.clone(),
        label: connection.label.clone().unwrap_or_default(),
        style: EDGE_STYLE.to_string(),
        parent: ROOT_PARENT.to_string(),
        source: connection.source.clone(),
        target: connection.target.clone(),
        waypoints: connection.waypoints.clone(),
    })
}

/// Emits one vertex per element (input order), then one edge per valid connection.
///
/// All vertex ids are known before any connection is checked, so connections may reference
/// elements declared after them.
pub fn generate_diagram(
    input: &ConversionInput,
    registry: &SymbolRegistry,
    options: GenerateOptions,
) -> Generated {
    let mut diagnostics = Vec::new();
    let mut document = DiagramDocument::default();

    for element in &input.elements {
        let resolved = resolve(element, registry, options, &mut diagnostics);
        document.vertices.push(generate_vertex(element, resolved));
    }

    let known: FxHashSet<&str> = input.elements.iter().map(|e| e.id.as_str()).collect();
    for connection in &input.connections {
        if let Some(edge) = generate_edge(connection, &known, &mut diagnostics) {
            document.edges.push(edge);
        }
    }

    tracing::info!(
        vertices = document.vertices.len(),
        edges = document.edges.len(),
        dropped = input.connections.len() - document.edges.len(),
        "diagram generated"
    );
    Generated {
        document,
        diagnostics,
    }
}
