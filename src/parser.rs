use crate::ir::{Diagram, Edge, Group, Junction, Layer, Port, Service};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static LAYER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^layer\s+(\w+)(?:\(([^)]+)\))?(?:\[([^\]]+)\])?").unwrap());
static GROUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^group\s+(\w+)(?:\(([^)]+)\))?(?:\[([^\]]+)\])?(?:\s+in\s+(\w+))?").unwrap()
});
static SERVICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^service\s+(\w+)(?:\(([^)]+)\))?(?:\[([^\]]+)\])?(?:\s+in\s+(\w+))?").unwrap()
});
static JUNCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^junction\s+(\w+)(?:\s+in\s+(\w+))?").unwrap());
static EDGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+):([LRTB])\s*(--?>?)\s*([LRTB]):(\w+)").unwrap());

/// Parses architecture source into a [`Diagram`].
///
/// Never fails: blank lines, `#` comments, the `architecture` header and any
/// line that matches no statement are skipped. Statements are tried in the
/// order layer, group, service, junction, edge and the first match wins.
pub fn parse_architecture(input: &str) -> Diagram {
    let mut diagram = Diagram::new();
    let mut skipped = 0usize;

    for raw_line in input.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with("architecture") {
            continue;
        }

        if parse_layer(line, &mut diagram)
            || parse_group(line, &mut diagram)
            || parse_service(line, &mut diagram)
            || parse_junction(line, &mut diagram)
            || parse_edge(line, &mut diagram)
        {
            continue;
        }

        skipped += 1;
        trace!(line; "Skipping unrecognized line");
    }

    debug!(
        services = diagram.services.len(),
        groups = diagram.groups.len(),
        junctions = diagram.junctions.len(),
        layers = diagram.layers.len(),
        edges = diagram.edges.len(),
        skipped;
        "Parsed architecture diagram"
    );
    diagram
}

fn capture(caps: &Captures<'_>, idx: usize) -> Option<String> {
    caps.get(idx).map(|m| m.as_str().to_string())
}

fn parse_layer(line: &str, diagram: &mut Diagram) -> bool {
    let Some(caps) = LAYER_RE.captures(line) else {
        return false;
    };
    let id = &caps[1];
    let mut layer = Layer::new(id, diagram.layers.len());
    layer.icon = capture(&caps, 2);
    layer.label = capture(&caps, 3);
    diagram.declaration_order.push(id.to_string());
    diagram.layers.insert(id.to_string(), layer);
    true
}

fn parse_group(line: &str, diagram: &mut Diagram) -> bool {
    let Some(caps) = GROUP_RE.captures(line) else {
        return false;
    };
    let id = &caps[1];
    let mut group = Group::new(id);
    group.icon = capture(&caps, 2);
    group.label = capture(&caps, 3);
    group.parent = capture(&caps, 4);
    diagram.declaration_order.push(id.to_string());
    diagram.groups.insert(id.to_string(), group);
    true
}

fn parse_service(line: &str, diagram: &mut Diagram) -> bool {
    let Some(caps) = SERVICE_RE.captures(line) else {
        return false;
    };
    let id = &caps[1];
    let mut service = Service::new(id);
    service.icon = capture(&caps, 2);
    service.label = capture(&caps, 3);
    service.parent = capture(&caps, 4);
    diagram.declaration_order.push(id.to_string());
    diagram.services.insert(id.to_string(), service);
    true
}

fn parse_junction(line: &str, diagram: &mut Diagram) -> bool {
    let Some(caps) = JUNCTION_RE.captures(line) else {
        return false;
    };
    let id = &caps[1];
    let mut junction = Junction::new(id);
    junction.parent = capture(&caps, 2);
    diagram.declaration_order.push(id.to_string());
    diagram.junctions.insert(id.to_string(), junction);
    true
}

fn parse_edge(line: &str, diagram: &mut Diagram) -> bool {
    let Some(caps) = EDGE_RE.captures(line) else {
        return false;
    };
    let (Some(source_port), Some(target_port)) =
        (Port::from_token(&caps[2]), Port::from_token(&caps[4]))
    else {
        return false;
    };
    diagram.edges.push(Edge {
        source: caps[1].to_string(),
        source_port,
        target: caps[5].to_string(),
        target_port,
        label: None,
        arrow: caps[3].contains('>'),
    });
    true
}
