use std::fmt::Display;

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Direction, Graph};

use crate::common::Capacity;
use crate::error::{EliminationError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowEdge {
    // 0 <= flow <= capacity
    from: usize,
    to: usize,
    capacity: Capacity,
    flow: Capacity,
}

impl FlowEdge {
    pub fn new(from: usize, to: usize, capacity: Capacity) -> Result<Self> {
        if capacity < 0 {
            return Err(EliminationError::InvalidNetworkConfiguration(format!(
                "edge {from}->{to} has negative capacity {capacity}"
            )));
        }
        if from == to && capacity != 0 {
            return Err(EliminationError::InvalidNetworkConfiguration(format!(
                "self-loop on vertex {from} with capacity {capacity}"
            )));
        }
        Ok(FlowEdge {
            from,
            to,
            capacity,
            flow: 0,
        })
    }
    pub fn from(&self) -> usize {
        self.from
    }
    pub fn to(&self) -> usize {
        self.to
    }
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }
    pub fn flow(&self) -> Capacity {
        self.flow
    }
    /// The endpoint opposite to `vertex`.
    pub fn other(&self, vertex: usize) -> usize {
        debug_assert!(vertex == self.from || vertex == self.to);
        if vertex == self.from {
            self.to
        } else {
            self.from
        }
    }
    /// How much more flow can be pushed towards `vertex` along this edge.
    /// Towards `from` this means cancelling flow that was already pushed.
    pub fn residual_capacity_to(&self, vertex: usize) -> Capacity {
        debug_assert!(vertex == self.from || vertex == self.to);
        if vertex == self.from {
            self.flow
        } else {
            self.capacity - self.flow
        }
    }
    pub fn add_residual_flow_to(&mut self, vertex: usize, delta: Capacity) -> Result<()> {
        if delta < 0 || delta > self.residual_capacity_to(vertex) {
            return Err(EliminationError::InvalidNetworkConfiguration(format!(
                "cannot push {delta} towards {vertex} along {self}"
            )));
        }
        if vertex == self.from {
            self.flow -= delta;
        } else {
            self.flow += delta;
        }
        Ok(())
    }
}

impl Display for FlowEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{} {}/{}", self.from, self.to, self.flow, self.capacity)
    }
}

/// Directed multigraph over the vertices `0..vertices()`.
/// The vertex count is fixed at construction.
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    graph: Graph<(), FlowEdge>,
}

impl FlowNetwork {
    pub fn new(vertices: usize) -> Self {
        let mut graph = Graph::with_capacity(vertices, 0);
        for _ in 0..vertices {
            graph.add_node(());
        }
        FlowNetwork { graph }
    }
    pub fn vertices(&self) -> usize {
        self.graph.node_count()
    }
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
    pub fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertices() {
            Ok(())
        } else {
            Err(EliminationError::InvalidNetworkConfiguration(format!(
                "vertex {vertex} is out of range for a network of {} vertices",
                self.vertices()
            )))
        }
    }
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Capacity) -> Result<EdgeIndex> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        let edge = FlowEdge::new(from, to, capacity)?;
        Ok(self
            .graph
            .add_edge(NodeIndex::new(from), NodeIndex::new(to), edge))
    }
    pub fn edge(&self, id: EdgeIndex) -> &FlowEdge {
        &self.graph[id]
    }
    pub fn edge_mut(&mut self, id: EdgeIndex) -> &mut FlowEdge {
        &mut self.graph[id]
    }
    /// All edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.graph.edge_weights()
    }
    /// Edges touching `vertex` in either orientation.
    pub fn adjacent(&self, vertex: usize) -> impl Iterator<Item = EdgeIndex> + '_ {
        let node = NodeIndex::new(vertex);
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .chain(self.graph.edges_directed(node, Direction::Incoming))
            .map(|edge| edge.id())
    }
    /// Vertices reachable from `vertex` through one edge with positive residual capacity.
    pub fn residual_neighbors(&self, vertex: usize) -> Vec<usize> {
        self.adjacent(vertex)
            .map(|id| self.edge(id))
            .filter_map(|edge| {
                let other = edge.other(vertex);
                (edge.residual_capacity_to(other) > 0).then_some(other)
            })
            .collect()
    }
    /// Flow leaving `vertex` minus flow entering it.
    pub fn net_flow(&self, vertex: usize) -> Capacity {
        self.edges()
            .map(|edge| {
                if edge.from == edge.to {
                    0
                } else if edge.from == vertex {
                    edge.flow
                } else if edge.to == vertex {
                    -edge.flow
                } else {
                    0
                }
            })
            .sum()
    }
}
