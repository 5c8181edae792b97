use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::icon::resolve_icon;
use crate::ir::{Diagram, NodeKind};

/// A single problem found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    DanglingEdge { source: String, target: String, missing: String },
    UnknownIcon { kind: NodeKind, id: String, icon: String },
    DuplicateId { id: String, count: usize },
    UnknownParent { kind: NodeKind, id: String, parent: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingEdge {
                source,
                target,
                missing,
            } => write!(f, "edge {source} -> {target} references unknown node `{missing}`"),
            Self::UnknownIcon { kind, id, icon } => {
                write!(f, "{} `{id}` uses unknown icon `{icon}`", kind.as_str())
            }
            Self::DuplicateId { id, count } => write!(f, "id `{id}` is declared {count} times"),
            Self::UnknownParent { kind, id, parent } => {
                write!(f, "{} `{id}` is placed in unknown parent `{parent}`", kind.as_str())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("diagram failed validation with {} issue(s): {}", .issues.len(), summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Strict checks on a parsed diagram. The pipeline itself tolerates every
/// issue reported here; this is for callers who want to fail fast.
pub fn validate(diagram: &Diagram) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in &diagram.declaration_order {
        *counts.entry(id.as_str()).or_default() += 1;
    }
    let mut reported = HashSet::new();
    for id in &diagram.declaration_order {
        let count = counts[id.as_str()];
        if count > 1 && reported.insert(id.as_str()) {
            issues.push(ValidationIssue::DuplicateId {
                id: id.clone(),
                count,
            });
        }
    }

    let icons = diagram
        .services
        .values()
        .map(|s| (NodeKind::Service, &s.id, &s.icon))
        .chain(
            diagram
                .groups
                .values()
                .map(|g| (NodeKind::Group, &g.id, &g.icon)),
        );
    for (kind, id, icon) in icons {
        let Some(icon) = icon else {
            continue;
        };
        if resolve_icon(Some(icon.as_str())).is_none() {
            issues.push(ValidationIssue::UnknownIcon {
                kind,
                id: id.clone(),
                icon: icon.clone(),
            });
        }
    }

    let parents = diagram
        .services
        .values()
        .map(|s| (NodeKind::Service, &s.id, &s.parent))
        .chain(
            diagram
                .junctions
                .values()
                .map(|j| (NodeKind::Junction, &j.id, &j.parent)),
        )
        .chain(
            diagram
                .groups
                .values()
                .map(|g| (NodeKind::Group, &g.id, &g.parent)),
        );
    for (kind, id, parent) in parents {
        let Some(parent) = parent else {
            continue;
        };
        if !diagram.groups.contains_key(parent) && !diagram.layers.contains_key(parent) {
            issues.push(ValidationIssue::UnknownParent {
                kind,
                id: id.clone(),
                parent: parent.clone(),
            });
        }
    }

    for edge in &diagram.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !diagram.contains(endpoint) {
                issues.push(ValidationIssue::DanglingEdge {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}
