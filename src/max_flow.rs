use std::cmp::Reverse;

use log::{debug, trace};
use pathfinding::prelude::{bfs, bfs_reach};
use petgraph::graph::EdgeIndex;

use crate::common::Capacity;
use crate::error::{EliminationError, Result};
use crate::flow_network::FlowNetwork;

/// Edmonds-Karp maximum flow. Owns the network it pushes flow through,
/// so a solved network can never be shared with another computation.
#[derive(Debug)]
pub struct MaxFlow {
    network: FlowNetwork,
    source: usize,
    sink: usize,
    value: Capacity,
    augmentations: usize,
    in_cut: Vec<bool>,
}

impl MaxFlow {
    pub fn new(network: FlowNetwork, source: usize, sink: usize) -> Result<Self> {
        network.check_vertex(source)?;
        network.check_vertex(sink)?;
        if source == sink {
            return Err(EliminationError::InvalidNetworkConfiguration(format!(
                "source and sink are both vertex {source}"
            )));
        }
        let mut max_flow = MaxFlow {
            network,
            source,
            sink,
            value: 0,
            augmentations: 0,
            in_cut: Vec::new(),
        };
        while let Some(path) = max_flow.augmenting_path() {
            max_flow.augment(&path)?;
        }
        max_flow.in_cut = max_flow.source_side();
        debug!(
            "max flow {} from {} to {} after {} augmentations ({} vertices, {} edges)",
            max_flow.value,
            source,
            sink,
            max_flow.augmentations,
            max_flow.network.vertices(),
            max_flow.network.edge_count()
        );
        Ok(max_flow)
    }
    pub fn value(&self) -> Capacity {
        self.value
    }
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }
    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }
    /// Whether `vertex` is on the source side of the minimum cut, i.e. reachable
    /// from the source in the final residual graph.
    pub fn in_cut(&self, vertex: usize) -> bool {
        self.in_cut.get(vertex).copied().unwrap_or(false)
    }
    /// Total capacity of the edges crossing from the source side to the sink side.
    pub fn cut_capacity(&self) -> Capacity {
        self.network
            .edges()
            .filter(|edge| self.in_cut(edge.from()) && !self.in_cut(edge.to()))
            .fold(0, |total: Capacity, edge| total.saturating_add(edge.capacity()))
    }
    fn augmenting_path(&self) -> Option<Vec<usize>> {
        // shortest path in the residual graph, by number of edges
        bfs(
            &self.source,
            |&vertex| self.network.residual_neighbors(vertex),
            |&vertex| vertex == self.sink,
        )
    }
    fn augment(&mut self, path: &[usize]) -> Result<()> {
        let hops = path
            .windows(2)
            .map(|hop| self.residual_edge(hop[0], hop[1]).map(|id| (id, hop[1])))
            .collect::<Result<Vec<(EdgeIndex, usize)>>>()?;
        let Some(bottleneck) = hops
            .iter()
            .map(|&(id, to)| self.network.edge(id).residual_capacity_to(to))
            .min()
        else {
            return Ok(());
        };
        for (id, to) in hops {
            self.network.edge_mut(id).add_residual_flow_to(to, bottleneck)?;
        }
        self.value = self.value.saturating_add(bottleneck);
        self.augmentations += 1;
        trace!("pushed {} along {:?}", bottleneck, path);
        Ok(())
    }
    fn residual_edge(&self, from: usize, to: usize) -> Result<EdgeIndex> {
        // among parallel edges, use the one with the most room left; ties go to the first
        self.network
            .adjacent(from)
            .filter(|&id| self.network.edge(id).other(from) == to)
            .min_by_key(|&id| Reverse(self.network.edge(id).residual_capacity_to(to)))
            .filter(|&id| self.network.edge(id).residual_capacity_to(to) > 0)
            .ok_or_else(|| {
                EliminationError::InvalidNetworkConfiguration(format!(
                    "no residual capacity from {from} to {to}"
                ))
            })
    }
    fn source_side(&self) -> Vec<bool> {
        let network = &self.network;
        let mut side = vec![false; network.vertices()];
        for vertex in bfs_reach(self.source, |&vertex| network.residual_neighbors(vertex)) {
            side[vertex] = true;
        }
        side
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::common::UNBOUNDED;

    fn network_from<I: IntoIterator<Item = (usize, usize, Capacity)>>(
        vertices: usize,
        edges: I,
    ) -> FlowNetwork {
        let mut network = FlowNetwork::new(vertices);
        for (from, to, capacity) in edges {
            network.add_edge(from, to, capacity).unwrap();
        }
        network
    }

    #[test]
    fn test_diamond() {
        let network = network_from(4, [(0, 1, UNBOUNDED), (0, 2, UNBOUNDED), (1, 3, 3), (2, 3, 5)]);
        let max_flow = MaxFlow::new(network, 0, 3).unwrap();
        assert_eq!(max_flow.value(), 8);
        assert!(max_flow.in_cut(0));
        assert!(max_flow.in_cut(1));
        assert!(max_flow.in_cut(2));
        assert!(!max_flow.in_cut(3));
        assert_eq!(max_flow.cut_capacity(), 8);
    }

    #[test]
    fn test_saturated_source_edges() {
        let network = network_from(4, [(0, 1, 3), (0, 2, 5), (1, 3, 10), (2, 3, 10)]);
        let max_flow = MaxFlow::new(network, 0, 3).unwrap();
        assert_eq!(max_flow.value(), 8);
        assert!(max_flow.in_cut(0));
        assert!(!max_flow.in_cut(1));
        assert!(!max_flow.in_cut(2));
    }

    #[test]
    fn test_parallel_edges() {
        let network = network_from(3, [(0, 1, 2), (0, 1, 3), (1, 2, 10)]);
        let max_flow = MaxFlow::new(network, 0, 2).unwrap();
        assert_eq!(max_flow.value(), 5);
        assert!(max_flow.network().edges().take(2).all(|e| e.flow() == e.capacity()));
    }

    #[test]
    fn test_parallel_edge_choice() {
        // vertex 2 is unreachable, so no flow moves and every edge keeps its capacity
        let network = network_from(3, [(0, 1, 3), (0, 1, 3), (0, 1, 1)]);
        let max_flow = MaxFlow::new(network, 0, 2).unwrap();
        assert_eq!(max_flow.value(), 0);
        let equal: Vec<EdgeIndex> = max_flow
            .network()
            .adjacent(0)
            .filter(|&id| max_flow.network().edge(id).capacity() == 3)
            .collect();
        assert_eq!(max_flow.residual_edge(0, 1).unwrap(), equal[0]);

        let network = network_from(3, [(0, 1, 2), (0, 1, 5), (0, 1, 5), (0, 1, 7)]);
        let max_flow = MaxFlow::new(network, 0, 2).unwrap();
        let widest = max_flow.residual_edge(0, 1).unwrap();
        assert_eq!(max_flow.network().edge(widest).capacity(), 7);
        assert!(max_flow.residual_edge(1, 0).is_err());
    }

    #[test]
    fn test_reverse_residual_path() {
        // if 0-1-2-5 is found first, the second path has to cancel 1->2
        let network = network_from(
            6,
            [(0, 1, 1), (1, 2, 1), (2, 5, 1), (0, 3, 1), (3, 2, 1), (1, 4, 1), (4, 5, 1)],
        );
        let max_flow = MaxFlow::new(network, 0, 5).unwrap();
        assert_eq!(max_flow.value(), 2);
        for vertex in 1..5 {
            assert_eq!(max_flow.network().net_flow(vertex), 0);
        }
        assert_eq!(max_flow.network().net_flow(0), 2);
    }

    #[test]
    fn test_disconnected() {
        let network = network_from(4, [(0, 1, 4), (2, 3, 4)]);
        let max_flow = MaxFlow::new(network, 0, 3).unwrap();
        assert_eq!(max_flow.value(), 0);
        assert_eq!(max_flow.augmentations(), 0);
        assert!(max_flow.in_cut(1));
        assert!(!max_flow.in_cut(2));
    }

    #[test]
    fn test_invalid_endpoints() {
        let network = network_from(2, [(0, 1, 1)]);
        assert!(matches!(
            MaxFlow::new(network.clone(), 1, 1),
            Err(EliminationError::InvalidNetworkConfiguration(_))
        ));
        assert!(matches!(
            MaxFlow::new(network, 0, 2),
            Err(EliminationError::InvalidNetworkConfiguration(_))
        ));
    }

    fn generate_network(num_vertices: usize, num_edges: usize, seed: u64) -> FlowNetwork {
        use rand::prelude::*;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut network = FlowNetwork::new(num_vertices);
        for _ in 0..num_edges {
            let from = rng.gen_range(0..num_vertices);
            let to = rng.gen_range(0..num_vertices);
            if from != to {
                network.add_edge(from, to, rng.gen_range(0..10)).unwrap();
            }
        }
        network
    }

    #[test]
    fn test_random_networks() {
        for num_vertices in 2..12 {
            for seed in 0..50 {
                let network = generate_network(num_vertices, 3 * num_vertices, seed);
                let max_flow = MaxFlow::new(network, 0, num_vertices - 1).unwrap();
                // max-flow min-cut
                assert_eq!(max_flow.value(), max_flow.cut_capacity());
                let network = max_flow.network();
                for vertex in 1..num_vertices - 1 {
                    assert_eq!(network.net_flow(vertex), 0);
                }
                assert_eq!(network.net_flow(0), max_flow.value());
                assert!(network.edges().all(|e| 0 <= e.flow() && e.flow() <= e.capacity()));
            }
        }
    }
}
