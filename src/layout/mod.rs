mod grid;
mod layered;
mod standard;
pub(crate) mod types;
pub use types::*;
use layered::*;
use standard::*;

use log::info;

use crate::config::LayoutConfig;
use crate::ir::Diagram;

/// Assigns pixel centers and sizes to every node of `diagram` in place.
///
/// Diagrams with at least one layer get the swimlane layout; everything else
/// goes through the port-directed grid layout.
pub fn compute_layout(diagram: &mut Diagram, config: &LayoutConfig) -> LayoutReport {
    let report = if diagram.is_layered() {
        compute_layered_layout(diagram, config)
    } else {
        compute_standard_layout(diagram, config)
    };
    info!(
        strategy:? = report.strategy,
        nodes = diagram.node_count(),
        collisions = report.collisions.len(),
        width = report.content_width,
        height = report.content_height;
        "Computed layout"
    );
    report
}

fn apply_node_sizes(diagram: &mut Diagram, config: &LayoutConfig) {
    for service in diagram.services.values_mut() {
        service.bounds.width = config.node_width;
        service.bounds.height = config.node_height;
    }
    for junction in diagram.junctions.values_mut() {
        junction.bounds.width = config.junction_size;
        junction.bounds.height = config.junction_size;
    }
}

/// Right and bottom extent of all placed boxes plus the canvas padding.
fn content_extent(diagram: &Diagram, config: &LayoutConfig) -> (f32, f32) {
    let boxes = diagram
        .services
        .values()
        .map(|s| s.bounds)
        .chain(diagram.junctions.values().map(|j| j.bounds))
        .chain(diagram.groups.values().map(|g| g.bounds));
    let (right, bottom) = boxes.fold((0.0f32, 0.0f32), |(r, b), bounds| {
        (r.max(bounds.right()), b.max(bounds.bottom()))
    });
    (right + config.canvas_padding, bottom + config.canvas_padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_architecture;
    use float_cmp::assert_approx_eq;

    const API_SAMPLE: &str = "\
architecture-beta
group api(cloud)[API]
service db(database)[Database] in api
service disk1(disk)[Storage] in api
service disk2(disk)[Storage] in api
service server(server)[Server] in api
db:L -- R:server
disk1:T -- B:server
disk2:T -- B:db
";

    fn api_config() -> LayoutConfig {
        LayoutConfig {
            origin: Some("db".to_string()),
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn api_sample_respects_port_directions() {
        let mut diagram = parse_architecture(API_SAMPLE);
        let report = compute_layout(&mut diagram, &api_config());
        assert_eq!(report.strategy, LayoutStrategy::Standard);
        assert_eq!(report.origin.as_deref(), Some("db"));
        assert!(!report.has_overlap());

        let db = diagram.services["db"].bounds;
        let server = diagram.services["server"].bounds;
        let disk1 = diagram.services["disk1"].bounds;
        let disk2 = diagram.services["disk2"].bounds;
        assert!(server.x < db.x);
        assert_approx_eq!(f32, disk1.x, server.x);
        assert_approx_eq!(f32, disk2.x, db.x);
        assert!(disk1.y > server.y);
        assert!(disk2.y > db.y);

        assert_approx_eq!(f32, server.x, 90.0);
        assert_approx_eq!(f32, db.x, 290.0);
        assert_approx_eq!(f32, disk2.y, 270.0);

        let group = diagram.groups["api"].bounds;
        for service in diagram.services.values() {
            assert!(group.contains(&service.bounds));
        }
        assert_approx_eq!(f32, group.width, 360.0);
        assert_approx_eq!(f32, group.height, 340.0);
        assert_approx_eq!(f32, report.content_width, 420.0);
        assert_approx_eq!(f32, report.content_height, 400.0);
    }

    #[test]
    fn layout_is_deterministic() {
        let mut first = parse_architecture(API_SAMPLE);
        let mut second = parse_architecture(API_SAMPLE);
        let a = compute_layout(&mut first, &api_config());
        let b = compute_layout(&mut second, &api_config());
        assert_eq!(a.grid, b.grid);
        for (id, service) in &first.services {
            assert_eq!(service.bounds, second.services[id].bounds);
        }
    }

    #[test]
    fn layered_diagrams_use_swimlanes() {
        let mut diagram = parse_architecture("layer in1(input)[In]\nservice s in in1");
        let report = compute_layout(&mut diagram, &LayoutConfig::default());
        assert_eq!(report.strategy, LayoutStrategy::Layered);
        assert!(report.grid.is_empty());
    }

    #[test]
    fn empty_diagram_is_a_no_op() {
        let mut diagram = parse_architecture("");
        let report = compute_layout(&mut diagram, &LayoutConfig::default());
        assert!(report.grid.is_empty());
        assert!(report.origin.is_none());
        assert_approx_eq!(f32, report.content_width, 50.0);
    }
}
