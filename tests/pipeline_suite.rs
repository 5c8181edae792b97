use std::path::Path;

use arch_lottie::ir::Diagram;
use arch_lottie::validate::ValidationIssue;
use arch_lottie::{
    AnimationConfig, Config, Document, LayoutConfig, Theme, compute_layout, parse_architecture,
    render_architecture, render_architecture_json, render_document, validate,
};
use serde_json::Value;

fn fixture_source(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).expect("fixture read failed")
}

fn laid_out(name: &str) -> Diagram {
    let mut diagram = parse_architecture(&fixture_source(name));
    compute_layout(&mut diagram, &LayoutConfig::default());
    diagram
}

fn render(diagram: &Diagram) -> Document {
    render_document(diagram, &Theme::dark(), &AnimationConfig::default())
}

fn expected_layer_count(diagram: &Diagram) -> usize {
    let drawn_edges = diagram
        .edges
        .iter()
        .filter(|edge| diagram.contains(&edge.source) && diagram.contains(&edge.target))
        .count();
    let layer_labels = diagram.layers.values().filter(|l| l.label.is_some()).count();
    let icons = diagram
        .services
        .values()
        .filter(|service| {
            matches!(
                service.icon.as_deref(),
                Some(icon) if icon.parse::<arch_lottie::icon::Icon>().is_ok()
                    && !matches!(icon, "cloud" | "box" | "node")
            )
        })
        .count();
    let service_labels = diagram.services.values().filter(|s| s.label.is_some()).count();
    let group_labels = diagram.groups.values().filter(|g| g.label.is_some()).count();
    drawn_edges
        + diagram.groups.len()
        + layer_labels
        + diagram.layers.len()
        + icons
        + diagram.services.len()
        + service_labels
        + group_labels
        + 1
}

fn last_dash_offset(arrow: &Value) -> (u64, f64) {
    let stroke = arrow["shapes"][0]["it"]
        .as_array()
        .and_then(|items| items.iter().find(|item| item["ty"] == "st"))
        .expect("arrow line has a stroke");
    let offset = stroke["d"]
        .as_array()
        .and_then(|entries| entries.iter().find(|entry| entry["n"] == "o"))
        .expect("stroke has a dash offset");
    let last = offset["v"]["k"]
        .as_array()
        .and_then(|keyframes| keyframes.last())
        .expect("offset is animated");
    (
        last["t"].as_u64().unwrap_or_default(),
        last["s"][0].as_f64().unwrap_or_default(),
    )
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = ["api.mmd", "layered.mmd", "nested.mmd", "loose.mmd"];
    let mut failures = Vec::new();

    for name in candidates {
        let diagram = laid_out(name);
        let document = render(&diagram);
        let json = serde_json::to_value(&document).expect("document serializes");
        let layers = json["layers"].as_array().cloned().unwrap_or_default();

        if layers.len() != expected_layer_count(&diagram) {
            failures.push(format!(
                "{name}: {} layers, expected {}",
                layers.len(),
                expected_layer_count(&diagram)
            ));
        }
        for (position, layer) in layers.iter().enumerate() {
            if layer["ind"].as_u64() != Some(position as u64 + 1) {
                failures.push(format!("{name}: layer {position} has ind {}", layer["ind"]));
            }
        }
        if layers.last().map(|layer| layer["nm"].clone()) != Some(Value::from("Background")) {
            failures.push(format!("{name}: background is not the last layer"));
        }
        for arrow in layers.iter().filter(|layer| {
            layer["nm"]
                .as_str()
                .is_some_and(|nm| nm.starts_with("Arrow "))
        }) {
            let (t, s) = last_dash_offset(arrow);
            if t != json["op"].as_u64().unwrap_or_default() - 1 || (s + 120.0).abs() > 1e-3 {
                failures.push(format!("{name}: {} does not loop ({t}, {s})", arrow["nm"]));
            }
        }
    }

    assert!(failures.is_empty(), "fixture failures:\n{}", failures.join("\n"));
}

#[test]
fn api_fixture_renders_eighteen_layers() {
    let document = render_architecture(&fixture_source("api.mmd"), &Config::default());
    assert_eq!(document.layers.len(), 18);
    assert_eq!(document.layers[0].nm, "Arrow db-server");
    assert_eq!(document.layers[3].nm, "Group api");
    assert_eq!(document.layers[16].nm, "Label api");
    assert_eq!(document.op, 120);
    assert_eq!(document.fr, 60);
}

#[test]
fn groups_contain_their_descendants() {
    for name in ["api.mmd", "nested.mmd"] {
        let diagram = laid_out(name);
        for group in diagram.groups.values() {
            for child in diagram.children(&group.id) {
                let bounds = diagram.bounds(&child).expect("child has bounds");
                assert!(
                    group.bounds.contains(&bounds),
                    "{name}: {child} escapes group {}",
                    group.id
                );
            }
        }
    }

    let nested = laid_out("nested.mmd");
    assert!(nested.groups["edge"].bounds.contains(&nested.groups["core"].bounds));
    assert!(nested.groups["edge"].bounds.contains(&nested.junctions["fan"].bounds));
}

#[test]
fn standard_fixtures_place_leaves_on_distinct_cells() {
    for name in ["api.mmd", "nested.mmd"] {
        let mut diagram = parse_architecture(&fixture_source(name));
        let report = compute_layout(&mut diagram, &LayoutConfig::default());
        assert!(!report.has_overlap(), "{name}: {:?}", report.collisions);
        assert_eq!(report.grid.len(), diagram.leaf_ids().len());
    }
}

#[test]
fn layered_fixture_stacks_bands() {
    let diagram = laid_out("layered.mmd");
    assert!(diagram.is_layered());

    let bands: Vec<f32> = diagram
        .layers_ordered()
        .iter()
        .map(|layer| layer.bounds.y)
        .collect();
    assert!(bands.windows(2).all(|pair| pair[0] < pair[1]));

    for layer in diagram.layers.values() {
        for child in diagram.children(&layer.id) {
            let bounds = diagram.bounds(&child).expect("child has bounds");
            assert!((bounds.y - layer.bounds.y).abs() < 1e-3);
            assert!(bounds.left() > layer.bounds.right());
        }
    }

    let document = render(&diagram);
    let labels: Vec<&str> = document
        .layers
        .iter()
        .filter(|layer| layer.nm.starts_with("LayerLabel"))
        .map(|layer| layer.nm.as_str())
        .collect();
    assert_eq!(
        labels,
        vec!["LayerLabel sense", "LayerLabel think", "LayerLabel act"]
    );
}

#[test]
fn strict_validation_reports_every_problem() {
    assert!(validate(&parse_architecture(&fixture_source("api.mmd"))).is_ok());
    assert!(validate(&parse_architecture(&fixture_source("nested.mmd"))).is_ok());

    let err = validate(&parse_architecture(&fixture_source("loose.mmd"))).unwrap_err();
    assert!(err.issues.iter().any(|issue| matches!(
        issue,
        ValidationIssue::UnknownIcon { icon, .. } if icon == "mystery"
    )));
    assert!(err.issues.iter().any(|issue| matches!(
        issue,
        ValidationIssue::DanglingEdge { missing, .. } if missing == "ghost"
    )));
    assert_eq!(err.issues.len(), 2);
}

#[test]
fn output_is_deterministic() {
    let config = Config::default();
    for name in ["api.mmd", "layered.mmd", "nested.mmd"] {
        let source = fixture_source(name);
        let first = render_architecture_json(&source, &config).unwrap();
        let second = render_architecture_json(&source, &config).unwrap();
        assert_eq!(first, second, "{name}");
    }
}

#[test]
fn json_document_has_lottie_header() {
    let json = render_architecture_json(&fixture_source("nested.mmd"), &Config::default()).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["v"], "5.7.4");
    assert_eq!(value["ip"], 0);
    assert_eq!(value["w"], 800);
    assert_eq!(value["h"], 600);
    assert_eq!(value["ddd"], 0);
    assert_eq!(value["assets"], Value::Array(Vec::new()));
    assert_eq!(value["fonts"]["list"][0]["fFamily"], "Arial");
    assert_eq!(value["layers"].as_array().unwrap().last().unwrap()["ty"], 1);
}

#[test]
fn unknown_lines_and_dangling_edges_are_tolerated() {
    let diagram = laid_out("loose.mmd");
    assert_eq!(diagram.services.len(), 3);
    assert_eq!(diagram.junctions.len(), 1);
    assert_eq!(diagram.edges.len(), 3);

    let document = render(&diagram);
    let arrows = document
        .layers
        .iter()
        .filter(|layer| layer.nm.starts_with("Arrow "))
        .count();
    assert_eq!(arrows, 2);
    assert!(document.layers.iter().all(|layer| layer.nm != "b_icon"));
}
