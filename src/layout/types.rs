use indexmap::IndexMap;
use serde::Serialize;

use crate::ir::Port;

/// Integer cell assigned during grid layout, later scaled to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub const ORIGIN: GridPos = GridPos { row: 0, col: 0 };

    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, delta_row: i32, delta_col: i32) -> Self {
        Self {
            row: self.row + delta_row,
            col: self.col + delta_col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutStrategy {
    Standard,
    Layered,
}

/// Nodes left sharing one grid cell after the bounded probe gave up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCollision {
    pub cell: GridPos,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub strategy: LayoutStrategy,
    pub origin: Option<String>,
    pub grid: IndexMap<String, GridPos>,
    pub collisions: Vec<GridCollision>,
    /// Right/bottom extent of the placed content plus canvas padding.
    pub content_width: f32,
    pub content_height: f32,
}

impl LayoutReport {
    pub fn has_overlap(&self) -> bool {
        !self.collisions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Neighbor {
    pub id: String,
    pub own_port: Port,
    pub neighbor_port: Port,
}

pub(crate) type Adjacency = IndexMap<String, Vec<Neighbor>>;
