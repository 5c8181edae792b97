use crate::ir::{Bounds, Diagram, NodeKind};
use crate::layout::{GridCollision, GridPos, LayoutReport, LayoutStrategy};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub strategy: LayoutStrategy,
    pub origin: Option<String>,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub groups: Vec<ContainerDump>,
    pub layers: Vec<ContainerDump>,
    pub edges: Vec<EdgeDump>,
    pub collisions: Vec<GridCollision>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: &'static str,
    pub icon: Option<String>,
    pub label: Option<String>,
    pub parent: Option<String>,
    pub cell: Option<GridPos>,
    #[serde(flatten)]
    pub bounds: Bounds,
}

#[derive(Debug, Serialize)]
pub struct ContainerDump {
    pub id: String,
    pub label: Option<String>,
    pub children: Vec<String>,
    #[serde(flatten)]
    pub bounds: Bounds,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub from_port: &'static str,
    pub to: String,
    pub to_port: &'static str,
    pub directed: bool,
    /// False when either endpoint is unknown; such edges are not drawn.
    pub resolved: bool,
}

impl LayoutDump {
    pub fn from_diagram(diagram: &Diagram, report: &LayoutReport) -> Self {
        let services = diagram.services.values().map(|service| NodeDump {
            id: service.id.clone(),
            kind: NodeKind::Service.as_str(),
            icon: service.icon.clone(),
            label: service.label.clone(),
            parent: service.parent.clone(),
            cell: report.grid.get(&service.id).copied(),
            bounds: service.bounds,
        });
        let junctions = diagram.junctions.values().map(|junction| NodeDump {
            id: junction.id.clone(),
            kind: NodeKind::Junction.as_str(),
            icon: None,
            label: None,
            parent: junction.parent.clone(),
            cell: report.grid.get(&junction.id).copied(),
            bounds: junction.bounds,
        });
        let nodes = services.chain(junctions).collect();

        let groups = diagram
            .groups
            .values()
            .map(|group| ContainerDump {
                id: group.id.clone(),
                label: group.label.clone(),
                children: diagram.children(&group.id),
                bounds: group.bounds,
            })
            .collect();
        let layers = diagram
            .layers_ordered()
            .into_iter()
            .map(|layer| ContainerDump {
                id: layer.id.clone(),
                label: layer.label.clone(),
                children: diagram.children(&layer.id),
                bounds: layer.bounds,
            })
            .collect();

        let edges = diagram
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.source.clone(),
                from_port: edge.source_port.as_token(),
                to: edge.target.clone(),
                to_port: edge.target_port.as_token(),
                directed: edge.arrow,
                resolved: diagram.contains(&edge.source) && diagram.contains(&edge.target),
            })
            .collect();

        LayoutDump {
            strategy: report.strategy,
            origin: report.origin.clone(),
            width: report.content_width,
            height: report.content_height,
            nodes,
            groups,
            layers,
            edges,
            collisions: report.collisions.clone(),
        }
    }
}

pub fn write_layout_dump(path: &Path, diagram: &Diagram, report: &LayoutReport) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_diagram(diagram, report);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
