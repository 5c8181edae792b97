use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVICE_SIZE: f32 = 80.0;
pub const DEFAULT_JUNCTION_SIZE: f32 = 20.0;

/// Side of a node where a connector attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    Left,
    Right,
    Top,
    Bottom,
}

impl Port {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "L" => Some(Self::Left),
            "R" => Some(Self::Right),
            "T" => Some(Self::Top),
            "B" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Right => "R",
            Self::Top => "T",
            Self::Bottom => "B",
        }
    }

    /// Grid offset `(row, col)` of a neighbour reached through this port.
    pub fn grid_delta(self) -> (i32, i32) {
        match self {
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Top => (-1, 0),
            Self::Bottom => (1, 0),
        }
    }
}

/// Center-anchored box. `x`/`y` are the center, not the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: (left + right) / 2.0,
            y: (top + bottom) / 2.0,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::from_edges(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    pub fn expand(&self, padding: f32) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width + padding * 2.0,
            height: self.height + padding * 2.0,
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn contains(&self, other: &Bounds) -> bool {
        const EPS: f32 = 1e-3;
        other.left() >= self.left() - EPS
            && other.right() <= self.right() + EPS
            && other.top() >= self.top() - EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub icon: Option<String>,
    pub label: Option<String>,
    pub parent: Option<String>,
    pub bounds: Bounds,
}

impl Service {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            icon: None,
            label: None,
            parent: None,
            bounds: Bounds::sized(DEFAULT_SERVICE_SIZE, DEFAULT_SERVICE_SIZE),
        }
    }
}

/// Routing-only node used to bend connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Junction {
    pub id: String,
    pub parent: Option<String>,
    pub bounds: Bounds,
}

impl Junction {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            parent: None,
            bounds: Bounds::sized(DEFAULT_JUNCTION_SIZE, DEFAULT_JUNCTION_SIZE),
        }
    }
}

/// Container whose bounds are always derived from its children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub icon: Option<String>,
    pub label: Option<String>,
    pub parent: Option<String>,
    pub bounds: Bounds,
}

impl Group {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            icon: None,
            label: None,
            parent: None,
            bounds: Bounds::default(),
        }
    }
}

/// Horizontal swimlane of a layered diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub icon: Option<String>,
    pub label: Option<String>,
    pub order: usize,
    pub bounds: Bounds,
}

impl Layer {
    pub fn new(id: &str, order: usize) -> Self {
        Self {
            id: id.to_string(),
            icon: None,
            label: None,
            order,
            bounds: Bounds::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub source_port: Port,
    pub target: String,
    pub target_port: Port,
    pub label: Option<String>,
    pub arrow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Service,
    Junction,
    Group,
    Layer,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Junction => "junction",
            Self::Group => "group",
            Self::Layer => "layer",
        }
    }
}

/// Parsed architecture diagram. Maps keep declaration order; edge order is
/// render order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagram {
    pub services: IndexMap<String, Service>,
    pub groups: IndexMap<String, Group>,
    pub junctions: IndexMap<String, Junction>,
    pub layers: IndexMap<String, Layer>,
    pub edges: Vec<Edge>,
    /// Every declared id in source order, repeats included.
    pub declaration_order: Vec<String>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves an id in lookup precedence: service, junction, group, layer.
    pub fn kind_of(&self, id: &str) -> Option<NodeKind> {
        if self.services.contains_key(id) {
            Some(NodeKind::Service)
        } else if self.junctions.contains_key(id) {
            Some(NodeKind::Junction)
        } else if self.groups.contains_key(id) {
            Some(NodeKind::Group)
        } else if self.layers.contains_key(id) {
            Some(NodeKind::Layer)
        } else {
            None
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.kind_of(id).is_some()
    }

    pub fn bounds(&self, id: &str) -> Option<Bounds> {
        match self.kind_of(id)? {
            NodeKind::Service => self.services.get(id).map(|s| s.bounds),
            NodeKind::Junction => self.junctions.get(id).map(|j| j.bounds),
            NodeKind::Group => self.groups.get(id).map(|g| g.bounds),
            NodeKind::Layer => self.layers.get(id).map(|l| l.bounds),
        }
    }

    pub fn bounds_mut(&mut self, id: &str) -> Option<&mut Bounds> {
        match self.kind_of(id)? {
            NodeKind::Service => self.services.get_mut(id).map(|s| &mut s.bounds),
            NodeKind::Junction => self.junctions.get_mut(id).map(|j| &mut j.bounds),
            NodeKind::Group => self.groups.get_mut(id).map(|g| &mut g.bounds),
            NodeKind::Layer => self.layers.get_mut(id).map(|l| &mut l.bounds),
        }
    }

    /// Direct children of a group or layer: services, then junctions, then groups.
    pub fn children(&self, parent_id: &str) -> Vec<String> {
        let is_child = |parent: &Option<String>| parent.as_deref() == Some(parent_id);
        let services = self
            .services
            .values()
            .filter(|s| is_child(&s.parent))
            .map(|s| s.id.clone());
        let junctions = self
            .junctions
            .values()
            .filter(|j| is_child(&j.parent))
            .map(|j| j.id.clone());
        let groups = self
            .groups
            .values()
            .filter(|g| is_child(&g.parent))
            .map(|g| g.id.clone());
        services.chain(junctions).chain(groups).collect()
    }

    pub fn is_layered(&self) -> bool {
        !self.layers.is_empty()
    }

    pub fn layers_ordered(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.values().collect();
        layers.sort_by_key(|layer| layer.order);
        layers
    }

    /// Services and junctions in first-declared order.
    pub fn leaf_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.declaration_order
            .iter()
            .filter(|id| self.services.contains_key(*id) || self.junctions.contains_key(*id))
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.services.len() + self.junctions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn bounds_union_spans_both_boxes() {
        let a = Bounds {
            x: 50.0,
            y: 50.0,
            width: 20.0,
            height: 20.0,
        };
        let b = Bounds {
            x: 100.0,
            y: 80.0,
            width: 40.0,
            height: 10.0,
        };
        let union = a.union(&b);
        assert_approx_eq!(f32, union.left(), 40.0);
        assert_approx_eq!(f32, union.right(), 120.0);
        assert_approx_eq!(f32, union.top(), 40.0);
        assert_approx_eq!(f32, union.bottom(), 85.0);
        assert!(union.contains(&a));
        assert!(union.contains(&b));
    }

    #[test]
    fn children_are_direct_only() {
        let mut diagram = Diagram::new();
        let mut outer = Group::new("outer");
        outer.label = Some("Outer".to_string());
        let mut inner = Group::new("inner");
        inner.parent = Some("outer".to_string());
        let mut svc = Service::new("svc");
        svc.parent = Some("inner".to_string());
        let mut hub = Junction::new("hub");
        hub.parent = Some("outer".to_string());
        diagram.groups.insert("outer".to_string(), outer);
        diagram.groups.insert("inner".to_string(), inner);
        diagram.services.insert("svc".to_string(), svc);
        diagram.junctions.insert("hub".to_string(), hub);

        assert_eq!(diagram.children("outer"), vec!["hub", "inner"]);
        assert_eq!(diagram.children("inner"), vec!["svc"]);
        assert!(diagram.children("svc").is_empty());
    }

    #[test]
    fn lookup_prefers_services_over_groups() {
        let mut diagram = Diagram::new();
        diagram.services.insert("x".to_string(), Service::new("x"));
        diagram.groups.insert("x".to_string(), Group::new("x"));
        assert_eq!(diagram.kind_of("x"), Some(NodeKind::Service));
        let bounds = diagram.bounds("x").unwrap();
        assert_approx_eq!(f32, bounds.width, DEFAULT_SERVICE_SIZE);
        assert_eq!(diagram.kind_of("missing"), None);
    }

    #[test]
    fn leaf_ids_follow_declaration_order() {
        let mut diagram = Diagram::new();
        for id in ["b", "g", "a", "b"] {
            diagram.declaration_order.push(id.to_string());
        }
        diagram.services.insert("a".to_string(), Service::new("a"));
        diagram.junctions.insert("b".to_string(), Junction::new("b"));
        diagram.groups.insert("g".to_string(), Group::new("g"));
        assert_eq!(diagram.leaf_ids(), vec!["b", "a"]);
    }

    #[test]
    fn ports_map_to_grid_offsets() {
        assert_eq!(Port::from_token("R").map(Port::grid_delta), Some((0, 1)));
        assert_eq!(Port::from_token("L").map(Port::grid_delta), Some((0, -1)));
        assert_eq!(Port::from_token("T").map(Port::grid_delta), Some((-1, 0)));
        assert_eq!(Port::from_token("B").map(Port::grid_delta), Some((1, 0)));
        assert_eq!(Port::from_token("X"), None);
        assert_eq!(Port::Bottom.as_token(), "B");
    }
}
