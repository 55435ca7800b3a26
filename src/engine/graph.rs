use courtside_api::MatchId;
use std::collections::{HashMap, HashSet};

use super::geometry::Connector;

#[derive(Debug, Clone)]
struct Edge {
    target: MatchId,
    /// Index of the connector this edge was built from.
    connector: usize,
}

/// Directed match graph built from the connectors of one layout pass.
/// Forward edges point at the match a winner advances into.
#[derive(Debug, Clone, Default)]
pub struct ConnectorGraph {
    forward: HashMap<MatchId, Vec<Edge>>,
    backward: HashMap<MatchId, Vec<Edge>>,
}

/// Matches and connectors lit up by a hover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    pub matches: HashSet<MatchId>,
    pub connectors: HashSet<usize>,
}

impl Highlight {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.connectors.is_empty()
    }

    pub fn contains_match(&self, id: &MatchId) -> bool {
        self.matches.contains(id)
    }

    pub fn contains_connector(&self, index: usize) -> bool {
        self.connectors.contains(&index)
    }
}

impl ConnectorGraph {
    pub fn from_connectors(connectors: &[Connector]) -> Self {
        Self::from_edges(connectors.iter().map(|c| (c.from.clone(), c.to.clone())))
    }

    /// Edge `i` of the iterator is treated as connector `i`.
    pub fn from_edges(edges: impl IntoIterator<Item = (MatchId, MatchId)>) -> Self {
        let mut graph = Self::default();
        for (connector, (from, to)) in edges.into_iter().enumerate() {
            graph
                .forward
                .entry(from.clone())
                .or_default()
                .push(Edge { target: to.clone(), connector });
            graph
                .backward
                .entry(to)
                .or_default()
                .push(Edge { target: from, connector });
        }
        graph
    }

    /// The hovered match plus every match that feeds into it and every match
    /// it feeds, transitively, with the connectors walked on the way.
    ///
    /// Both walks share one visited set, so a match is expanded at most once
    /// and malformed cyclic input still terminates.
    pub fn path_through(&self, id: &MatchId) -> Highlight {
        let mut highlight = Highlight::default();
        highlight.matches.insert(id.clone());
        walk(&self.backward, id, &mut highlight);
        walk(&self.forward, id, &mut highlight);
        highlight
    }
}

fn walk(edges: &HashMap<MatchId, Vec<Edge>>, start: &MatchId, highlight: &mut Highlight) {
    let mut stack = vec![start.clone()];
    while let Some(current) = stack.pop() {
        for edge in edges.get(&current).into_iter().flatten() {
            highlight.connectors.insert(edge.connector);
            if highlight.matches.insert(edge.target.clone()) {
                stack.push(edge.target.clone());
            }
        }
    }
}
