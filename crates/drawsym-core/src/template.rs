use crate::style::Style;

pub type MatchFn = fn(raw_style: &str) -> bool;

/// One shape category: how to recognize it in a raw style, and what to render it with.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: &'static str,
    pub matches: MatchFn,
    pub style_base: &'static str,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Template {
    pub fn base_style(&self) -> Style {
        Style::decode(self.style_base)
    }
}

/// Priority-ordered list of templates. Classification is first-match-wins, so the order in
/// which templates are added is part of the behavior.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: Vec<Template>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, template: Template) {
        self.templates.push(template);
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Matches against the raw, undecoded style text.
    pub fn classify(&self, raw_style: &str) -> Option<&Template> {
        self.templates.iter().find(|t| (t.matches)(raw_style))
    }

    pub fn bpmn() -> Self {
        let mut set = Self::new();

        // Priority order. `sub_process` shadows `pool`; keep it that way.
        set.add(Template {
            id: "task",
            matches: match_task,
            style_base: TASK_STYLE,
            width: Some(120.0),
            height: Some(80.0),
        });
        set.add(Template {
            id: "event",
            matches: match_event,
            style_base: EVENT_STYLE,
            width: Some(50.0),
            height: Some(50.0),
        });
        set.add(Template {
            id: "gateway",
            matches: match_gateway,
            style_base: GATEWAY_STYLE,
            width: Some(60.0),
            height: Some(60.0),
        });
        set.add(Template {
            id: "data_object",
            matches: match_data_object,
            style_base: DATA_OBJECT_STYLE,
            width: Some(40.0),
            height: Some(60.0),
        });
        set.add(Template {
            id: "sub_process",
            matches: match_sub_process,
            style_base: SUB_PROCESS_STYLE,
            width: None,
            height: None,
        });
        set.add(Template {
            id: "pool",
            matches: match_pool,
            style_base: POOL_STYLE,
            width: Some(600.0),
            height: Some(400.0),
        });
        set.add(Template {
            id: "lane",
            matches: match_lane,
            style_base: LANE_STYLE,
            width: Some(600.0),
            height: Some(120.0),
        });

        set
    }
}

const TASK_STYLE: &str = "shape=mxgraph.bpmn.task2;rectStyle=rounded;size=10;html=1;container=1;collapsible=0;expand=0;points=[[0.25,0,0],[0.5,0,0],[0.75,0,0],[1,0.25,0],[1,0.5,0],[1,0.75,0],[0.75,1,0],[0.5,1,0],[0.25,1,0],[0,0.75,0],[0,0.5,0],[0,0.25,0]];";
const EVENT_STYLE: &str = "shape=mxgraph.bpmn.event;html=1;verticalLabelPosition=bottom;labelBackgroundColor=#ffffff;verticalAlign=top;align=center;perimeter=ellipsePerimeter;outlineConnect=0;aspect=fixed;points=[[0.145,0.145,0],[0.5,0,0],[0.855,0.145,0],[1,0.5,0],[0.855,0.855,0],[0.5,1,0],[0.145,0.855,0],[0,0.5,0]];";
const GATEWAY_STYLE: &str = "shape=mxgraph.bpmn.gateway2;html=1;verticalLabelPosition=bottom;labelBackgroundColor=#ffffff;verticalAlign=top;align=center;perimeter=rhombusPerimeter;outlineConnect=0;verticalAlign=top;align=center;points=[[0.25,0.25,0],[0.5,0,0],[0.75,0.25,0],[1,0.5,0],[0.75,0.75,0],[0.5,1,0],[0.25,0.75,0],[0,0.5,0]];";
const DATA_OBJECT_STYLE: &str = "shape=mxgraph.bpmn.data2;labelPosition=center;verticalLabelPosition=bottom;align=center;verticalAlign=top;size=15;html=1;";
const SUB_PROCESS_STYLE: &str =
    "swimlane;html=1;childLayout=stackLayout;resizeParent=1;resizeParentMax=0;startSize=20;";
const POOL_STYLE: &str = "swimlane;html=1;childLayout=stackLayout;resizeParent=1;resizeParentMax=0;startSize=20;horizontal=0;whiteSpace=wrap;";
const LANE_STYLE: &str = "swimlane;html=1;startSize=20;horizontal=0;";

fn is_swimlane(s: &str) -> bool {
    s.to_lowercase().contains("swimlane")
}

fn match_task(s: &str) -> bool {
    s.contains("shape=mxgraph.bpmn.task2")
}

fn match_event(s: &str) -> bool {
    s.contains("shape=mxgraph.bpmn.event")
}

fn match_gateway(s: &str) -> bool {
    s.contains("shape=mxgraph.bpmn.gateway2")
}

fn match_data_object(s: &str) -> bool {
    s.contains("shape=mxgraph.bpmn.data2")
}

fn match_sub_process(s: &str) -> bool {
    is_swimlane(s) && (s.contains("childLayout") || s.contains("stackLayout"))
}

fn match_pool(s: &str) -> bool {
    is_swimlane(s) && s.contains("childLayout")
}

fn match_lane(s: &str) -> bool {
    is_swimlane(s) && !s.contains("childLayout") && !s.contains("stackLayout")
}
