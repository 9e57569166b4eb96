//! Serialization of a [`DiagramDocument`] into the draw.io `mxfile` XML dialect.

use crate::config::DocumentSettings;
use crate::model::{DiagramDocument, EdgeRecord, VertexRecord};
use crate::utils::{escape_xml_into, fmt_number};

const INDENT: &str = "  ";

struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        let mut out = String::with_capacity(4096);
        out.push_str("<?xml version='1.0' encoding='UTF-8'?>\n");
        Self { out, depth: 0 }
    }

    fn start_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            escape_xml_into(&mut self.out, value);
            self.out.push('"');
        }
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.start_tag(name, attrs);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.start_tag(name, attrs);
        self.out.push_str(" />\n");
    }

    fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    fn finish(self) -> String {
        self.out
    }
}

fn flag(v: bool) -> &'static str {
    if v { "1" } else { "0" }
}

fn write_vertex(w: &mut XmlWriter, vertex: &VertexRecord) {
    w.open(
        "mxCell",
        &[
            ("id", vertex.id.as_str()),
            ("value", vertex.label.as_str()),
            ("style", vertex.style.as_str()),
            ("parent", vertex.parent.as_str()),
            ("vertex", "1"),
        ],
    );
    let g = &vertex.geometry;
    let (x, y, width, height) = (
        fmt_number(g.x),
        fmt_number(g.y),
        fmt_number(g.width),
        fmt_number(g.height),
    );
    w.empty(
        "mxGeometry",
        &[
            ("x", x.as_str()),
            ("y", y.as_str()),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("as", "geometry"),
        ],
    );
    w.close("mxCell");
}

fn write_edge(w: &mut XmlWriter, edge: &EdgeRecord) {
    w.open(
        "mxCell",
        &[
            ("id", edge.id.as_str()),
            ("value", edge.label.as_str()),
            ("style", edge.style.as_str()),
            ("edge", "1"),
            ("parent", edge.parent.as_str()),
            ("source", edge.source.as_str()),
            ("target", edge.target.as_str()),
        ],
    );
    let geometry_attrs = [("relative", "1"), ("as", "geometry")];
    match &edge.waypoints {
        None => w.empty("mxGeometry", &geometry_attrs),
        Some(points) => {
            w.open("mxGeometry", &geometry_attrs);
            if points.is_empty() {
                w.empty("Array", &[("as", "points")]);
            } else {
                w.open("Array", &[("as", "points")]);
                for p in points {
                    let (x, y) = (fmt_number(p.x), fmt_number(p.y));
                    w.empty("mxPoint", &[("x", x.as_str()), ("y", y.as_str())]);
                }
                w.close("Array");
            }
            w.close("mxGeometry");
        }
    }
    w.close("mxCell");
}

/// Renders the full `mxfile` document: metadata, one page, the two base cells (`0` and `1`),
/// then every vertex and every edge in emission order.
pub fn render_mxfile(document: &DiagramDocument, settings: &DocumentSettings) -> String {
    let mut w = XmlWriter::new();
    w.open(
        "mxfile",
        &[
            ("host", settings.host.as_str()),
            ("agent", settings.agent.as_str()),
            ("version", settings.version.as_str()),
        ],
    );
    w.open(
        "diagram",
        &[
            ("name", settings.diagram_name.as_str()),
            ("id", settings.diagram_id.as_str()),
        ],
    );

    let dx = settings.dx.to_string();
    let dy = settings.dy.to_string();
    let grid_size = settings.grid_size.to_string();
    let page_scale = settings.page_scale.to_string();
    let page_width = settings.page_width.to_string();
    let page_height = settings.page_height.to_string();
    w.open(
        "mxGraphModel",
        &[
            ("dx", dx.as_str()),
            ("dy", dy.as_str()),
            ("grid", flag(settings.grid)),
            ("gridSize", grid_size.as_str()),
            ("guides", flag(settings.guides)),
            ("tooltips", flag(settings.tooltips)),
            ("connect", flag(settings.connect)),
            ("arrows", flag(settings.arrows)),
            ("fold", flag(settings.fold)),
            ("page", flag(settings.page)),
            ("pageScale", page_scale.as_str()),
            ("pageWidth", page_width.as_str()),
            ("pageHeight", page_height.as_str()),
        ],
    );
    w.open("root", &[]);
    w.empty("mxCell", &[("id", "0")]);
    w.empty("mxCell", &[("id", "1"), ("parent", "0")]);

    for vertex in &document.vertices {
        write_vertex(&mut w, vertex);
    }
    for edge in &document.edges {
        write_edge(&mut w, edge);
    }

    w.close("root");
    w.close("mxGraphModel");
    w.close("diagram");
    w.close("mxfile");
    w.finish()
}
