use crate::ir::{Group, Layer as ArchLayer, Service};
use crate::theme::Theme;

use super::model::{JUSTIFY_CENTER, JUSTIFY_LEFT, Layer, TextStyle};

const SERVICE_LABEL_GAP: f32 = 20.0;
const GROUP_LABEL_INSET: [f32; 2] = [55.0, 22.0];

struct TextBox {
    size: [f32; 2],
    offset: [f32; 2],
    font_size: f32,
    justify: u8,
    line_height: f32,
}

const SERVICE_LABEL: TextBox = TextBox {
    size: [150.0, 30.0],
    offset: [-75.0, -10.0],
    font_size: 13.0,
    justify: JUSTIFY_CENTER,
    line_height: 16.0,
};

const GROUP_LABEL: TextBox = TextBox {
    size: [200.0, 30.0],
    offset: [0.0, -10.0],
    font_size: 16.0,
    justify: JUSTIFY_LEFT,
    line_height: 20.0,
};

const LAYER_LABEL: TextBox = TextBox {
    size: [90.0, 60.0],
    offset: [-45.0, -20.0],
    font_size: 11.0,
    justify: JUSTIFY_CENTER,
    line_height: 14.0,
};

fn style(text: String, frame: &TextBox, color: [f32; 3], theme: &Theme) -> TextStyle {
    TextStyle {
        sz: frame.size,
        ps: frame.offset,
        s: frame.font_size,
        f: theme.font_family.clone(),
        t: text,
        ca: 0,
        j: frame.justify,
        tr: 0.0,
        lh: frame.line_height,
        ls: 0.0,
        fc: color,
    }
}

/// Label centered under a service box.
pub(super) fn service_label(service: &Service, label: &str, theme: &Theme, ind: u32, op: u32) -> Layer {
    let bounds = service.bounds;
    Layer::text(
        ind,
        format!("Label {}", service.id),
        [bounds.x, bounds.bottom() + SERVICE_LABEL_GAP],
        style(label.to_string(), &SERVICE_LABEL, theme.text.components(), theme),
        op,
    )
}

/// Left-aligned caption inside the group's top-left corner, next to its icon.
pub(super) fn group_label(group: &Group, label: &str, theme: &Theme, ind: u32, op: u32) -> Layer {
    let bounds = group.bounds;
    Layer::text(
        ind,
        format!("Label {}", group.id),
        [
            bounds.left() + GROUP_LABEL_INSET[0],
            bounds.top() + GROUP_LABEL_INSET[1],
        ],
        style(
            label.to_string(),
            &GROUP_LABEL,
            theme.group_stroke.components(),
            theme,
        ),
        op,
    )
}

pub(super) fn layer_label(layer: &ArchLayer, label: &str, theme: &Theme, ind: u32, op: u32) -> Layer {
    Layer::text(
        ind,
        format!("LayerLabel {}", layer.id),
        [layer.bounds.x, layer.bounds.y],
        style(
            wrap_two_words(label),
            &LAYER_LABEL,
            theme.text.components(),
            theme,
        ),
        op,
    )
}

/// Puts a two-word label on two lines; anything else is kept as written.
fn wrap_two_words(label: &str) -> String {
    let words: Vec<&str> = label.split_whitespace().collect();
    match words.as_slice() {
        [first, second] => format!("{first}\r{second}"),
        _ => label.to_string(),
    }
}
