use indexmap::IndexMap;

use crate::config::LayoutConfig;
use crate::ir::{Bounds, Diagram};

use super::{LayoutReport, LayoutStrategy, apply_node_sizes};

/// Inset applied to a layer's label box on each axis.
const LAYER_BOX_INSET: f32 = 20.0;

/// Swimlane layout: one row per layer in `order`, with the layer's direct
/// children spread across a shared column area to the right of the label.
pub(super) fn compute_layered_layout(diagram: &mut Diagram, config: &LayoutConfig) -> LayoutReport {
    apply_node_sizes(diagram, config);

    let layer_ids: Vec<String> = diagram
        .layers_ordered()
        .into_iter()
        .map(|layer| layer.id.clone())
        .collect();
    let max_children = layer_ids
        .iter()
        .map(|id| diagram.children(id).len())
        .max()
        .unwrap_or(0);

    let pad = config.canvas_padding;
    let slot = config.node_width + config.node_spacing_x;
    let children_area = max_children as f32 * slot;
    let start_x = pad + config.layer_label_width + config.node_spacing_x / 2.0;

    let mut y_offset = pad;
    for layer_id in &layer_ids {
        let row_center = y_offset + config.layer_height / 2.0;
        if let Some(layer) = diagram.layers.get_mut(layer_id) {
            layer.bounds = Bounds {
                x: pad + config.layer_label_width / 2.0,
                y: row_center,
                width: config.layer_label_width - LAYER_BOX_INSET,
                height: config.layer_height - LAYER_BOX_INSET,
            };
        }

        let children = diagram.children(layer_id);
        if let [only] = children.as_slice() {
            if let Some(bounds) = diagram.bounds_mut(only) {
                bounds.x = start_x + children_area / 2.0;
                bounds.y = row_center;
            }
        } else {
            for (idx, child) in children.iter().enumerate() {
                if let Some(bounds) = diagram.bounds_mut(child) {
                    bounds.x = start_x + idx as f32 * slot + config.node_width / 2.0;
                    bounds.y = row_center;
                }
            }
        }

        y_offset += config.layer_height + config.layer_spacing;
    }

    let content_width = pad * 2.0 + config.layer_label_width + children_area;
    let content_height = if layer_ids.is_empty() {
        pad * 2.0
    } else {
        y_offset - config.layer_spacing + pad
    };

    LayoutReport {
        strategy: LayoutStrategy::Layered,
        origin: None,
        grid: IndexMap::new(),
        collisions: Vec::new(),
        content_width,
        content_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_architecture;
    use float_cmp::assert_approx_eq;

    const PIPELINE: &str = "\
architecture-beta
layer sense(input)[Sense Input]
layer think(process)[Think]
service cam(sensor)[Camera] in sense
service mic(sensor)[Mic] in sense
service lidar(sensor)[Lidar] in sense
service planner(brain)[Planner] in think
cam:B --> T:planner
";

    #[test]
    fn layers_stack_in_declaration_order() {
        let mut diagram = parse_architecture(PIPELINE);
        let config = LayoutConfig::default();
        let report = compute_layered_layout(&mut diagram, &config);
        assert_eq!(report.strategy, LayoutStrategy::Layered);

        let sense = diagram.layers["sense"].bounds;
        let think = diagram.layers["think"].bounds;
        assert_approx_eq!(f32, sense.x, 110.0);
        assert_approx_eq!(f32, sense.y, 120.0);
        assert_approx_eq!(f32, sense.width, 100.0);
        assert_approx_eq!(f32, sense.height, 120.0);
        assert_approx_eq!(f32, think.y, 320.0);
    }

    #[test]
    fn children_spread_across_shared_area() {
        let mut diagram = parse_architecture(PIPELINE);
        let config = LayoutConfig::default();
        let report = compute_layered_layout(&mut diagram, &config);

        let cam = diagram.services["cam"].bounds;
        let mic = diagram.services["mic"].bounds;
        let lidar = diagram.services["lidar"].bounds;
        assert_approx_eq!(f32, cam.x, 270.0);
        assert_approx_eq!(f32, mic.x, 470.0);
        assert_approx_eq!(f32, lidar.x, 670.0);
        assert_approx_eq!(f32, cam.y, 120.0);

        // a lone child sits in the middle of the area
        let planner = diagram.services["planner"].bounds;
        assert_approx_eq!(f32, planner.x, 530.0);
        assert_approx_eq!(f32, planner.y, 320.0);

        assert_approx_eq!(f32, report.content_width, 820.0);
        assert_approx_eq!(f32, report.content_height, 440.0);
    }

    #[test]
    fn layer_order_field_controls_stacking() {
        let mut diagram = parse_architecture("layer a\nlayer b\nservice s in a");
        diagram.layers["a"].order = 5;
        compute_layered_layout(&mut diagram, &LayoutConfig::default());
        assert!(diagram.layers["b"].bounds.y < diagram.layers["a"].bounds.y);
        assert_approx_eq!(f32, diagram.services["s"].bounds.y, diagram.layers["a"].bounds.y);
    }
}
