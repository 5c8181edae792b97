use crate::icon::{Icon, resolve_icon};
use crate::ir::{Group, Layer as ArchLayer, Service};
use crate::theme::Theme;

use super::icons::icon_shapes;
use super::model::{DashEntry, Layer, Property, Shape};

const CORNER_RADIUS: f32 = 8.0;
const GROUP_STROKE_OPACITY: f32 = 60.0;
const GROUP_STROKE_WIDTH: f32 = 2.0;
const GROUP_DASH: f32 = 8.0;
const GROUP_GAP: f32 = 5.0;
const CLOUD_OPACITY: f32 = 80.0;

pub(super) fn service_box(service: &Service, theme: &Theme, ind: u32, op: u32) -> Layer {
    let color_key = resolve_icon(service.icon.as_deref()).and_then(Icon::color_key);
    let fill = theme.color_for_key(color_key).with_alpha(1.0);
    let bounds = service.bounds;
    Layer::shape(
        ind,
        service.id.clone(),
        [bounds.x, bounds.y],
        vec![Shape::group(
            "Box",
            vec![
                Shape::rect([bounds.width, bounds.height], [0.0, 0.0], CORNER_RADIUS),
                Shape::fill(fill, 100.0),
            ],
        )],
        op,
    )
}

/// Icon overlay for a service; `None` for icons without a glyph.
pub(super) fn service_icon(service: &Service, ind: u32, op: u32) -> Option<Layer> {
    let icon = resolve_icon(service.icon.as_deref())?;
    let shapes = icon_shapes(icon);
    if shapes.is_empty() {
        return None;
    }
    Some(Layer::shape(
        ind,
        format!("{}_icon", service.id),
        [service.bounds.x, service.bounds.y],
        shapes,
        op,
    ))
}

/// Small three-lobed cloud in the group's top-left corner, in group-local
/// coordinates.
fn cloud_glyph(width: f32, height: f32, theme: &Theme) -> Shape {
    let x = -width / 2.0 + 25.0;
    let y = -height / 2.0 + 20.0;
    Shape::group(
        "CloudIcon",
        vec![
            Shape::ellipse([24.0, 16.0], [x, y]),
            Shape::ellipse([16.0, 14.0], [x - 10.0, y + 2.0]),
            Shape::ellipse([14.0, 12.0], [x + 10.0, y + 2.0]),
            Shape::fill(theme.group_stroke.with_alpha(1.0), CLOUD_OPACITY),
        ],
    )
}

pub(super) fn group_layer(group: &Group, theme: &Theme, ind: u32, op: u32) -> Layer {
    let bounds = group.bounds;
    let mut shapes = vec![Shape::group(
        "Border",
        vec![
            Shape::rect([bounds.width, bounds.height], [0.0, 0.0], CORNER_RADIUS),
            Shape::Stroke {
                c: Property::fixed(theme.group_stroke.with_alpha(1.0)),
                o: Property::fixed(GROUP_STROKE_OPACITY),
                w: Property::fixed(GROUP_STROKE_WIDTH),
                lc: None,
                lj: None,
                d: vec![DashEntry::dash(GROUP_DASH), DashEntry::gap(GROUP_GAP)],
            },
        ],
    )];
    if group.icon.as_deref() == Some(Icon::Cloud.keyword()) {
        shapes.push(cloud_glyph(bounds.width, bounds.height, theme));
    }
    Layer::shape(
        ind,
        format!("Group {}", group.id),
        [bounds.x, bounds.y],
        shapes,
        op,
    )
}

/// Filled box in the label column of a layered diagram.
pub(super) fn layer_box(layer: &ArchLayer, theme: &Theme, ind: u32, op: u32) -> Layer {
    let bounds = layer.bounds;
    let fill = theme.layer_color(layer.icon.as_deref()).with_alpha(1.0);
    Layer::shape(
        ind,
        format!("Layer {}", layer.id),
        [bounds.x, bounds.y],
        vec![Shape::group(
            "LayerBox",
            vec![
                Shape::rect([bounds.width, bounds.height], [0.0, 0.0], CORNER_RADIUS),
                Shape::fill(fill, 100.0),
            ],
        )],
        op,
    )
}
