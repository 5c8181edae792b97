use std::collections::HashSet;

use indexmap::IndexMap;
use log::warn;

use crate::config::LayoutConfig;
use crate::ir::{Bounds, Diagram};

use super::grid::{assign_grid_positions, build_adjacency, find_collisions};
use super::{GridPos, LayoutReport, LayoutStrategy, apply_node_sizes, content_extent};

/// Grid layout for diagrams without layers: BFS cells, pixel centers,
/// group boxes, then a shift so content starts at the canvas padding.
pub(super) fn compute_standard_layout(diagram: &mut Diagram, config: &LayoutConfig) -> LayoutReport {
    apply_node_sizes(diagram, config);
    let adjacency = build_adjacency(diagram);
    let assignment = assign_grid_positions(diagram, &adjacency, config.origin.as_deref());

    apply_grid_positions(diagram, &assignment.positions, config);
    compute_group_bounds(diagram, config);
    center_diagram(diagram, config);

    let collisions = find_collisions(&assignment.positions);
    for collision in &collisions {
        warn!(
            row = collision.cell.row,
            col = collision.cell.col,
            nodes:? = collision.nodes;
            "Grid cell shared by several nodes"
        );
    }

    let (content_width, content_height) = content_extent(diagram, config);
    LayoutReport {
        strategy: LayoutStrategy::Standard,
        origin: assignment.origin,
        grid: assignment.positions,
        collisions,
        content_width,
        content_height,
    }
}

/// Scales grid cells to pixel centers after normalising the minimum row and
/// column to zero.
fn apply_grid_positions(
    diagram: &mut Diagram,
    positions: &IndexMap<String, GridPos>,
    config: &LayoutConfig,
) {
    let Some(min_row) = positions.values().map(|cell| cell.row).min() else {
        return;
    };
    let min_col = positions.values().map(|cell| cell.col).min().unwrap_or(0);
    let pad = config.canvas_padding;

    for (id, cell) in positions {
        let col = (cell.col - min_col) as f32;
        let row = (cell.row - min_row) as f32;
        if let Some(bounds) = diagram.bounds_mut(id) {
            bounds.x = pad + col * (config.node_width + config.node_spacing_x) + config.node_width / 2.0;
            bounds.y = pad + row * (config.node_height + config.node_spacing_y) + config.node_height / 2.0;
        }
    }
}

/// Nesting depth of a group through its group ancestors. Parent cycles stop
/// at the first repeat.
fn group_depth(diagram: &Diagram, id: &str) -> usize {
    let mut depth = 0;
    let mut seen: HashSet<&str> = HashSet::from([id]);
    let mut current = diagram.groups.get(id).and_then(|g| g.parent.as_deref());
    while let Some(parent) = current {
        if !seen.insert(parent) {
            break;
        }
        let Some(group) = diagram.groups.get(parent) else {
            break;
        };
        depth += 1;
        current = group.parent.as_deref();
    }
    depth
}

/// Sets each group box to the padded union of its direct children.
/// Deeper groups go first so an outer group sees its inner groups' final
/// boxes. A group with no children keeps its center and gets a default
/// node-sized box.
pub(super) fn compute_group_bounds(diagram: &mut Diagram, config: &LayoutConfig) {
    let mut order: Vec<(usize, String)> = diagram
        .groups
        .keys()
        .map(|id| (group_depth(diagram, id), id.clone()))
        .collect();
    order.sort_by(|a, b| b.0.cmp(&a.0));

    let pad = config.group_padding;
    for (_, group_id) in order {
        let union = diagram
            .children(&group_id)
            .iter()
            .filter(|child| **child != group_id)
            .filter_map(|child| diagram.bounds(child))
            .reduce(|acc, bounds| acc.union(&bounds));
        let Some(group) = diagram.groups.get_mut(&group_id) else {
            continue;
        };
        group.bounds = match union {
            Some(union) => union.expand(pad),
            None => Bounds {
                x: group.bounds.x,
                y: group.bounds.y,
                width: config.node_width + pad * 2.0,
                height: config.node_height + pad * 2.0,
            },
        };
    }
}

/// Translates everything so the leftmost/topmost node edge sits at the
/// canvas padding.
fn center_diagram(diagram: &mut Diagram, config: &LayoutConfig) {
    let leaves = diagram
        .services
        .values()
        .map(|s| s.bounds)
        .chain(diagram.junctions.values().map(|j| j.bounds));
    let Some((min_left, min_top)) = leaves
        .map(|b| (b.left(), b.top()))
        .reduce(|(l, t), (bl, bt)| (l.min(bl), t.min(bt)))
    else {
        return;
    };

    let dx = config.canvas_padding - min_left;
    let dy = config.canvas_padding - min_top;
    for service in diagram.services.values_mut() {
        service.bounds.translate(dx, dy);
    }
    for junction in diagram.junctions.values_mut() {
        junction.bounds.translate(dx, dy);
    }
    for group in diagram.groups.values_mut() {
        group.bounds.translate(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_architecture;
    use float_cmp::assert_approx_eq;

    #[test]
    fn nested_groups_contain_their_children() {
        let mut diagram = parse_architecture(
            "group outer(cloud)[Outer]\n\
             group inner[Inner] in outer\n\
             service a(server)[A] in inner\n\
             service b(server)[B] in outer\n\
             a:R --> L:b",
        );
        let config = LayoutConfig::default();
        compute_standard_layout(&mut diagram, &config);

        let outer = diagram.groups["outer"].bounds;
        let inner = diagram.groups["inner"].bounds;
        let a = diagram.services["a"].bounds;
        let b = diagram.services["b"].bounds;
        assert!(inner.contains(&a));
        assert!(outer.contains(&inner));
        assert!(outer.contains(&b));
        assert_approx_eq!(f32, inner.width, a.width + 2.0 * config.group_padding);
        assert_approx_eq!(f32, outer.left(), inner.left() - config.group_padding);
    }

    #[test]
    fn empty_group_gets_default_box() {
        let mut diagram = parse_architecture("group empty[Nothing]\nservice a");
        let config = LayoutConfig::default();
        compute_standard_layout(&mut diagram, &config);
        let group = diagram.groups["empty"].bounds;
        assert_approx_eq!(f32, group.width, 160.0);
        assert_approx_eq!(f32, group.height, 160.0);
    }

    #[test]
    fn content_starts_at_canvas_padding() {
        let mut diagram = parse_architecture(
            "service a\nservice b\nservice c\na:L -- R:b\nb:T -- B:c",
        );
        let config = LayoutConfig::default();
        compute_standard_layout(&mut diagram, &config);

        let min_left = diagram
            .services
            .values()
            .map(|s| s.bounds.left())
            .fold(f32::INFINITY, f32::min);
        let min_top = diagram
            .services
            .values()
            .map(|s| s.bounds.top())
            .fold(f32::INFINITY, f32::min);
        assert_approx_eq!(f32, min_left, config.canvas_padding);
        assert_approx_eq!(f32, min_top, config.canvas_padding);
        assert!(diagram.services["b"].bounds.x < diagram.services["a"].bounds.x);
        assert!(diagram.services["c"].bounds.y < diagram.services["b"].bounds.y);
    }

    #[test]
    fn junctions_use_junction_size() {
        let mut diagram = parse_architecture("service a\njunction j\na:R -- L:j");
        let config = LayoutConfig::default();
        compute_standard_layout(&mut diagram, &config);
        let junction = diagram.junctions["j"].bounds;
        assert_approx_eq!(f32, junction.width, config.junction_size);
        assert_approx_eq!(f32, junction.x, 290.0);
    }

    #[test]
    fn group_parent_cycle_terminates() {
        let mut diagram = parse_architecture("group a in b\ngroup b in a\nservice s in a");
        assert_eq!(group_depth(&diagram, "a"), 1);
        compute_group_bounds(&mut diagram, &LayoutConfig::default());
        assert!(diagram.groups["a"].bounds.width > 0.0);
    }
}
