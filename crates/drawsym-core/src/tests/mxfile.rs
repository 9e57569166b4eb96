use crate::config::DocumentSettings;
use crate::model::{DiagramDocument, EdgeRecord, Geometry, Point, VertexRecord};
use crate::mxfile::render_mxfile;

fn vertex(id: &str, label: &str) -> VertexRecord {
    VertexRecord {
        id: id.to_string(),
        label: label.to_string(),
        style: "shape=mxgraph.bpmn.task2;".to_string(),
        parent: "1".to_string(),
        geometry: Geometry {
            x: 10.0,
            y: 20.5,
            width: 120.0,
            height: 80.0,
        },
    }
}

fn edge(id: &str, waypoints: Option<Vec<Point>>) -> EdgeRecord {
    EdgeRecord {
        id: id.to_string(),
        label: String::new(),
        style: "edgeStyle=orthogonalEdgeStyle;".to_string(),
        parent: "1".to_string(),
        source: "a".to_string(),
        target: "b".to_string(),
        waypoints,
    }
}

fn render(doc: &DiagramDocument) -> String {
    render_mxfile(doc, &DocumentSettings::default())
}

#[test]
fn empty_document_has_base_layer_only() {
    let xml = render(&DiagramDocument::default());
    assert!(xml.starts_with("<?xml version='1.0' encoding='UTF-8'?>\n<mxfile host=\"app.diagrams.net\""));
    assert!(xml.contains("<diagram name=\"BPMN Process\" id=\"generated_diagram_id\">"));
    assert!(xml.contains("pageWidth=\"850\" pageHeight=\"1100\""));
    assert!(xml.contains("      <root>\n        <mxCell id=\"0\" />\n        <mxCell id=\"1\" parent=\"0\" />\n      </root>"));

    let parsed = roxmltree::Document::parse(&xml).unwrap();
    let cells = parsed
        .descendants()
        .filter(|n| n.has_tag_name("mxCell"))
        .count();
    assert_eq!(cells, 2);
}

#[test]
fn vertex_geometry_uses_shortest_numbers() {
    let doc = DiagramDocument {
        vertices: vec![vertex("t1", "Task")],
        edges: Vec::new(),
    };
    let xml = render(&doc);
    assert!(xml.contains(
        "<mxGeometry x=\"10\" y=\"20.5\" width=\"120\" height=\"80\" as=\"geometry\" />"
    ));
    assert!(xml.contains("vertex=\"1\""));
}

#[test]
fn labels_are_escaped() {
    let doc = DiagramDocument {
        vertices: vec![vertex("t1", "Check <a> & \"b\"\nnext")],
        edges: Vec::new(),
    };
    let xml = render(&doc);
    assert!(xml.contains("value=\"Check &lt;a&gt; &amp; &quot;b&quot;&#10;next\""));

    let parsed = roxmltree::Document::parse(&xml).unwrap();
    let cell = parsed
        .descendants()
        .find(|n| n.attribute("id") == Some("t1"))
        .unwrap();
    assert_eq!(cell.attribute("value"), Some("Check <a> & \"b\"\nnext"));
}

#[test]
fn edge_without_waypoints_omits_point_list() {
    let doc = DiagramDocument {
        vertices: Vec::new(),
        edges: vec![edge("f1", None)],
    };
    let xml = render(&doc);
    assert!(xml.contains("<mxGeometry relative=\"1\" as=\"geometry\" />"));
    assert!(!xml.contains("Array"));
}

#[test]
fn edge_waypoints_are_nested_in_order() {
    let doc = DiagramDocument {
        vertices: Vec::new(),
        edges: vec![
            edge(
                "f1",
                Some(vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.5, y: 4.0 }]),
            ),
            edge("f2", Some(Vec::new())),
        ],
    };
    let xml = render(&doc);
    let parsed = roxmltree::Document::parse(&xml).unwrap();

    let f1 = parsed
        .descendants()
        .find(|n| n.attribute("id") == Some("f1"))
        .unwrap();
    assert_eq!(f1.attribute("edge"), Some("1"));
    let points: Vec<_> = f1
        .descendants()
        .filter(|n| n.has_tag_name("mxPoint"))
        .map(|p| (p.attribute("x").unwrap(), p.attribute("y").unwrap()))
        .collect();
    assert_eq!(points, vec![("1", "2"), ("3.5", "4")]);

    let f2 = parsed
        .descendants()
        .find(|n| n.attribute("id") == Some("f2"))
        .unwrap();
    let array = f2
        .descendants()
        .find(|n| n.has_tag_name("Array"))
        .unwrap();
    assert_eq!(array.attribute("as"), Some("points"));
    assert_eq!(array.children().filter(|n| n.is_element()).count(), 0);
}
