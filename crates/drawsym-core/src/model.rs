use crate::utils::attribute_value_string;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Container id every top-level cell hangs off.
pub const ROOT_PARENT: &str = "1";

/// A conversion request: `{ "elements": [...], "connections": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionInput {
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    /// `null` or a missing `type` reads as the empty string, which no template matches.
    #[serde(rename = "type", default, deserialize_with = "scalar_string")]
    pub kind: String,
    #[serde(
        default,
        deserialize_with = "opt_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub x: Option<f64>,
    #[serde(
        default,
        deserialize_with = "opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub y: Option<f64>,
    #[serde(
        default,
        deserialize_with = "opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<f64>,
    #[serde(
        default,
        deserialize_with = "opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<f64>,
    /// Every other key, in declaration order. Includes `parent`.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The declared container id, stringified; [`ROOT_PARENT`] when absent or `null`.
    pub fn parent(&self) -> String {
        match self.attributes.get("parent") {
            None | Some(Value::Null) => ROOT_PARENT.to_string(),
            Some(v) => attribute_value_string(v),
        }
    }
}

// Request documents are hand-written; scalars of the "wrong" JSON type are coerced rather
// than failing the whole request.

fn scalar_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(opt_scalar_string(d)?.unwrap_or_default())
}

fn opt_scalar_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => None,
        Some(v) => Some(attribute_value_string(&v)),
    })
}

/// Numbers or numeric strings. Anything else reads as absent.
fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub source: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub target: String,
    #[serde(
        default,
        deserialize_with = "opt_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<Point>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: String,
    pub label: String,
    pub style: String,
    pub parent: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    pub label: String,
    pub style: String,
    pub parent: String,
    pub source: String,
    pub target: String,
    /// `None` omits the point list entirely; `Some(vec![])` emits an empty one.
    pub waypoints: Option<Vec<Point>>,
}

/// The emitted cells, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramDocument {
    pub vertices: Vec<VertexRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl DiagramDocument {
    pub fn cell_ids(&self) -> impl Iterator<Item = &str> {
        self.vertices
            .iter()
            .map(|v| v.id.as_str())
            .chain(self.edges.iter().map(|e| e.id.as_str()))
    }
}
