use log::debug;

use crate::config::AnimationConfig;
use crate::ir::{Bounds, Diagram, Edge, Port};
use crate::theme::Theme;

use super::model::{Bezier, DashEntry, Easing, Keyframe, Layer, Property, ROUND, Shape};

/// The visible line stops this far before the tip so the head covers its end.
const LINE_SHORTEN: f32 = 15.0;
/// Distance from the tip back to the arrowhead base.
const HEAD_LENGTH: f32 = 18.0;
const HEAD_HALF_WIDTH: f32 = 10.0;
const EASE: f32 = 0.167;

/// Connector endpoint just outside the given side of a node.
pub(super) fn port_position(bounds: &Bounds, port: Port, clearance: f32) -> [f32; 2] {
    match port {
        Port::Left => [bounds.left() - clearance, bounds.y],
        Port::Right => [bounds.right() + clearance, bounds.y],
        Port::Top => [bounds.x, bounds.top() - clearance],
        Port::Bottom => [bounds.x, bounds.bottom() + clearance],
    }
}

struct ArrowGeometry {
    start: [f32; 2],
    line_end: [f32; 2],
    tip: [f32; 2],
    head_left: [f32; 2],
    head_right: [f32; 2],
}

fn arrow_geometry(start: [f32; 2], tip: [f32; 2]) -> ArrowGeometry {
    let (dx, dy) = (tip[0] - start[0], tip[1] - start[1]);
    let length = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if length > 0.0 {
        (dx / length, dy / length)
    } else {
        (1.0, 0.0)
    };
    let (px, py) = (-ny, nx);
    let base = [tip[0] - nx * HEAD_LENGTH, tip[1] - ny * HEAD_LENGTH];
    ArrowGeometry {
        start,
        line_end: [tip[0] - nx * LINE_SHORTEN, tip[1] - ny * LINE_SHORTEN],
        tip,
        head_left: [base[0] + px * HEAD_HALF_WIDTH, base[1] + py * HEAD_HALF_WIDTH],
        head_right: [base[0] - px * HEAD_HALF_WIDTH, base[1] - py * HEAD_HALF_WIDTH],
    }
}

/// Dash offset runs from 0 to a whole number of pattern periods over the
/// last rendered frame, so the loop seam is invisible.
pub(super) fn dash_offset_keyframes(config: &AnimationConfig) -> Vec<Keyframe> {
    let last_frame = config.total_frames().saturating_sub(1);
    vec![
        Keyframe {
            t: 0,
            s: vec![0.0],
            i: Some(Easing::uniform(EASE)),
            o: Some(Easing::uniform(EASE)),
        },
        Keyframe {
            t: last_frame,
            s: vec![config.loop_offset()],
            i: None,
            o: None,
        },
    ]
}

/// Shape layer for one edge, or `None` when either endpoint is unknown.
pub(super) fn arrow_layer(
    edge: &Edge,
    diagram: &Diagram,
    theme: &Theme,
    config: &AnimationConfig,
    ind: u32,
) -> Option<Layer> {
    let (Some(source), Some(target)) = (diagram.bounds(&edge.source), diagram.bounds(&edge.target))
    else {
        debug!(source = edge.source.as_str(), target = edge.target.as_str(); "Dropping edge with unknown endpoint");
        return None;
    };

    let geometry = arrow_geometry(
        port_position(&source, edge.source_port, config.port_clearance),
        port_position(&target, edge.target_port, config.port_clearance),
    );
    let color = theme.arrow.with_alpha(1.0);

    let line = Shape::group(
        "Line",
        vec![
            Shape::path(Bezier::polyline(vec![geometry.start, geometry.line_end], false)),
            Shape::Stroke {
                c: Property::fixed(color),
                o: Property::fixed(100.0),
                w: Property::fixed(config.arrow_width),
                lc: Some(ROUND),
                lj: Some(ROUND),
                d: vec![
                    DashEntry::dash(config.dash),
                    DashEntry::gap(config.gap),
                    DashEntry::offset(dash_offset_keyframes(config)),
                ],
            },
        ],
    );
    let head = Shape::group(
        "Head",
        vec![
            Shape::path(Bezier::polyline(
                vec![geometry.tip, geometry.head_left, geometry.head_right],
                true,
            )),
            Shape::fill(color, 100.0),
        ],
    );

    Some(Layer::shape(
        ind,
        format!("Arrow {}-{}", edge.source, edge.target),
        [0.0, 0.0],
        vec![line, head],
        config.total_frames(),
    ))
}
