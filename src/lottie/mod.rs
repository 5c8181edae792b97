mod arrow;
mod icons;
pub mod model;
mod nodes;
mod text;

pub use model::{Document, Layer, LayerKind, Shape};

use log::debug;

use crate::config::AnimationConfig;
use crate::ir::Diagram;
use crate::theme::Theme;

use arrow::arrow_layer;
use model::{DOCUMENT_NAME, FontTable, LOTTIE_VERSION, LayerIndex};
use nodes::{group_layer, layer_box, service_box, service_icon};
use text::{group_label, layer_label, service_label};

/// Builds the animation document for an already laid-out diagram.
///
/// The first layer renders frontmost. Layers are emitted as: arrows, groups,
/// layer labels, layer boxes, service icons, service boxes, service labels,
/// group labels, and finally the background solid.
pub fn render_document(diagram: &Diagram, theme: &Theme, config: &AnimationConfig) -> Document {
    let op = config.total_frames();
    let mut index = LayerIndex::new();
    let mut layers = Vec::new();

    for edge in &diagram.edges {
        if let Some(layer) = arrow_layer(edge, diagram, theme, config, index.peek()) {
            index.next();
            layers.push(layer);
        }
    }
    for group in diagram.groups.values() {
        layers.push(group_layer(group, theme, index.next(), op));
    }
    let swimlanes = diagram.layers_ordered();
    for layer in &swimlanes {
        if let Some(label) = layer.label.as_deref() {
            layers.push(layer_label(layer, label, theme, index.next(), op));
        }
    }
    for layer in &swimlanes {
        layers.push(layer_box(layer, theme, index.next(), op));
    }
    for service in diagram.services.values() {
        if let Some(layer) = service_icon(service, index.peek(), op) {
            index.next();
            layers.push(layer);
        }
    }
    for service in diagram.services.values() {
        layers.push(service_box(service, theme, index.next(), op));
    }
    for service in diagram.services.values() {
        if let Some(label) = service.label.as_deref() {
            layers.push(service_label(service, label, theme, index.next(), op));
        }
    }
    for group in diagram.groups.values() {
        if let Some(label) = group.label.as_deref() {
            layers.push(group_label(group, label, theme, index.next(), op));
        }
    }
    layers.push(Layer::solid(
        index.next(),
        "Background".to_string(),
        config.width,
        config.height,
        theme.background.clone(),
        op,
    ));

    debug!(layers = layers.len(), frames = op; "Rendered animation document");

    Document {
        v: LOTTIE_VERSION.to_string(),
        fr: config.fps,
        ip: 0,
        op,
        w: config.width,
        h: config.height,
        nm: DOCUMENT_NAME.to_string(),
        ddd: 0,
        assets: Vec::new(),
        fonts: FontTable::single(&theme.font_family),
        layers,
    }
}
