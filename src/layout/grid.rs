use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use log::{debug, trace, warn};

use crate::ir::{Diagram, Port};

use super::{Adjacency, GridCollision, GridPos, Neighbor};

/// Probe budget when a candidate cell is already taken.
pub(super) const MAX_PROBES: usize = 20;
/// Disconnected nodes fill rows left to right, wrapping once the column exceeds this.
pub(super) const WRAP_COLUMN: i32 = 10;

pub(super) struct GridAssignment {
    pub positions: IndexMap<String, GridPos>,
    pub origin: Option<String>,
}

/// Bidirectional adjacency: each endpoint records the other end plus
/// `(own port, neighbour port)`.
pub(super) fn build_adjacency(diagram: &Diagram) -> Adjacency {
    let mut adjacency = Adjacency::new();
    for edge in &diagram.edges {
        adjacency
            .entry(edge.source.clone())
            .or_default()
            .push(Neighbor {
                id: edge.target.clone(),
                own_port: edge.source_port,
                neighbor_port: edge.target_port,
            });
        adjacency
            .entry(edge.target.clone())
            .or_default()
            .push(Neighbor {
                id: edge.source.clone(),
                own_port: edge.target_port,
                neighbor_port: edge.source_port,
            });
    }
    adjacency
}

fn pick_origin(placeable: &[String], requested: Option<&str>) -> Option<String> {
    if let Some(requested) = requested {
        if placeable.iter().any(|id| id == requested) {
            return Some(requested.to_string());
        }
        warn!(origin = requested; "Requested layout origin is not a service or junction, using first declared node");
    }
    placeable.first().cloned()
}

/// Breadth-first grid placement from a single origin. Nodes the traversal
/// never reaches are packed row-major into free cells afterwards.
pub(super) fn assign_grid_positions(
    diagram: &Diagram,
    adjacency: &Adjacency,
    requested_origin: Option<&str>,
) -> GridAssignment {
    let placeable = diagram.leaf_ids();
    let mut positions: IndexMap<String, GridPos> = IndexMap::new();
    let Some(origin) = pick_origin(&placeable, requested_origin) else {
        return GridAssignment {
            positions,
            origin: None,
        };
    };
    let placeable_set: HashSet<&str> = placeable.iter().map(String::as_str).collect();

    let mut occupied: HashSet<GridPos> = HashSet::from([GridPos::ORIGIN]);
    let mut queue: VecDeque<(String, GridPos)> = VecDeque::from([(origin.clone(), GridPos::ORIGIN)]);
    positions.insert(origin.clone(), GridPos::ORIGIN);

    while let Some((node_id, cell)) = queue.pop_front() {
        let Some(neighbors) = adjacency.get(&node_id) else {
            continue;
        };
        for neighbor in neighbors {
            if positions.contains_key(&neighbor.id) || !placeable_set.contains(neighbor.id.as_str())
            {
                continue;
            }
            let next = neighbor_cell(cell, neighbor.own_port, &occupied);
            trace!(node = neighbor.id.as_str(), row = next.row, col = next.col; "Placed node");
            positions.insert(neighbor.id.clone(), next);
            occupied.insert(next);
            queue.push_back((neighbor.id.clone(), next));
        }
    }

    for id in &placeable {
        if positions.contains_key(id) {
            continue;
        }
        let cell = find_empty_cell(&occupied);
        debug!(node = id.as_str(), row = cell.row, col = cell.col; "Placed disconnected node");
        positions.insert(id.clone(), cell);
        occupied.insert(cell);
    }

    GridAssignment {
        positions,
        origin: Some(origin),
    }
}

/// Cell for a neighbour reached through `own_port`. When the target cell is
/// taken, probe col+1, row+1, col-1, row-1 in turn; after [`MAX_PROBES`]
/// steps the last cell is returned even if it is occupied.
pub(super) fn neighbor_cell(from: GridPos, own_port: Port, occupied: &HashSet<GridPos>) -> GridPos {
    let (delta_row, delta_col) = own_port.grid_delta();
    let mut cell = from.offset(delta_row, delta_col);
    let mut attempts = 0usize;
    while occupied.contains(&cell) && attempts < MAX_PROBES {
        cell = match attempts % 4 {
            0 => cell.offset(0, 1),
            1 => cell.offset(1, 0),
            2 => cell.offset(0, -1),
            _ => cell.offset(-1, 0),
        };
        attempts += 1;
    }
    cell
}

pub(super) fn find_empty_cell(occupied: &HashSet<GridPos>) -> GridPos {
    let mut cell = GridPos::ORIGIN;
    while occupied.contains(&cell) {
        cell.col += 1;
        if cell.col > WRAP_COLUMN {
            cell.col = 0;
            cell.row += 1;
        }
    }
    cell
}

pub(super) fn find_collisions(positions: &IndexMap<String, GridPos>) -> Vec<GridCollision> {
    let mut by_cell: IndexMap<GridPos, Vec<String>> = IndexMap::new();
    for (id, cell) in positions {
        by_cell.entry(*cell).or_default().push(id.clone());
    }
    by_cell
        .into_iter()
        .filter(|(_, nodes)| nodes.len() > 1)
        .map(|(cell, nodes)| GridCollision { cell, nodes })
        .collect()
}
