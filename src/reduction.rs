use log::debug;

use crate::common::{Capacity, CompetitorName, UNBOUNDED};
use crate::elimination::{EliminationResult, Method};
use crate::error::{EliminationError, Result};
use crate::flow_network::FlowNetwork;
use crate::max_flow::MaxFlow;
use crate::standings::Standings;

/// Where each competitor lives in an elimination network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompetitorVertices(Vec<Option<usize>>);

impl CompetitorVertices {
    /// `None` for the competitor the network was built for.
    pub fn vertex(&self, competitor: usize) -> Option<usize> {
        self.0.get(competitor).copied().flatten()
    }
    /// (competitor, vertex) pairs in competitor order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(competitor, vertex)| vertex.map(|v| (competitor, v)))
    }
}

/// The flow network asking whether the other competitors can split their
/// remaining games among themselves so that none of them passes `target`'s best
/// possible win total.
///
/// The source feeds one vertex per pairing with games left, each pairing passes
/// its games on to its two competitors, and competitor `i` can pass at most
/// `best(target) - wins(i)` wins on to the sink.
#[derive(Debug)]
pub struct EliminationNetwork {
    target: usize,
    network: FlowNetwork,
    source: usize,
    sink: usize,
    vertices: CompetitorVertices,
    scheduled: Capacity,
}

impl EliminationNetwork {
    pub fn build<T: CompetitorName>(standings: &Standings<T>, target: usize) -> Result<Self> {
        let n = standings.len();
        if target >= n {
            return Err(EliminationError::InvalidNetworkConfiguration(format!(
                "competitor {target} is out of range for a division of {n}"
            )));
        }
        // 0..n are competitors, n and n + 1 are source and sink, pairings follow
        let (source, sink) = (n, n + 1);
        let best = standings.best(target);
        let pairings: Vec<(usize, usize, Capacity)> = (0..n)
            .filter(|&i| i != target)
            .flat_map(|i| (i + 1..n).filter(move |&j| j != target).map(move |j| (i, j)))
            .map(|(i, j)| (i, j, Capacity::from(standings.against(i, j))))
            .filter(|&(_, _, games)| games > 0)
            .collect();

        let mut network = FlowNetwork::new(n + 2 + pairings.len());
        let mut scheduled = 0;
        for (k, &(i, j, games)) in pairings.iter().enumerate() {
            let pairing = n + 2 + k;
            network.add_edge(source, pairing, games)?;
            network.add_edge(pairing, i, UNBOUNDED)?;
            network.add_edge(pairing, j, UNBOUNDED)?;
            scheduled += games;
        }
        for i in (0..n).filter(|&i| i != target) {
            let room = (best - Capacity::from(standings.wins(i))).max(0);
            network.add_edge(i, sink, room)?;
        }
        let vertices = CompetitorVertices((0..n).map(|i| (i != target).then_some(i)).collect());
        debug!(
            "elimination network for {}: {} pairings, {} games, {} vertices, {} edges",
            standings.name(target),
            pairings.len(),
            scheduled,
            network.vertices(),
            network.edge_count()
        );
        Ok(EliminationNetwork {
            target,
            network,
            source,
            sink,
            vertices,
            scheduled,
        })
    }
    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }
    pub fn source(&self) -> usize {
        self.source
    }
    pub fn sink(&self) -> usize {
        self.sink
    }
    pub fn vertices(&self) -> &CompetitorVertices {
        &self.vertices
    }
    /// Games left among the competitors other than the target.
    pub fn scheduled_games(&self) -> Capacity {
        self.scheduled
    }
    /// The target is eliminated iff not every scheduled game can be routed to the sink.
    /// The certificate is then the set of competitors on the source side of the minimum cut.
    pub fn solve(self) -> Result<EliminationResult> {
        let EliminationNetwork {
            target,
            network,
            source,
            sink,
            vertices,
            scheduled,
        } = self;
        let max_flow = MaxFlow::new(network, source, sink)?;
        if max_flow.value() >= scheduled {
            return Ok(EliminationResult::contending(target, Method::MaxFlow));
        }
        let certificate: Vec<usize> = vertices
            .iter()
            .filter(|&(_, vertex)| max_flow.in_cut(vertex))
            .map(|(competitor, _)| competitor)
            .collect();
        Ok(EliminationResult::eliminated(
            target,
            certificate,
            Method::MaxFlow,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAMS4: &str = "4
Atlanta       83 71  8  0 1 6 1
Philadelphia  80 79  3  1 0 0 2
New_York      78 78  6  6 0 0 0
Montreal      77 82  3  1 2 0 0
";

    fn teams4() -> Standings<String> {
        TEAMS4.parse().unwrap()
    }

    #[test]
    fn test_network_shape() {
        let standings = teams4();
        let reduction = EliminationNetwork::build(&standings, 1).unwrap();
        // Atlanta-New_York and Atlanta-Montreal are the only pairings left without Philadelphia
        assert_eq!(reduction.network().vertices(), 4 + 2 + 2);
        assert_eq!(reduction.network().edge_count(), 2 * 3 + 3);
        assert_eq!(reduction.scheduled_games(), 7);
        assert_eq!(reduction.vertices().vertex(1), None);
        assert_eq!(reduction.vertices().vertex(2), Some(2));
        assert_eq!(reduction.vertices().vertex(9), None);
        assert!(reduction.source() >= 4 && reduction.sink() >= 4);
        assert_ne!(reduction.source(), reduction.sink());

        let to_sink: Vec<Capacity> = reduction
            .network()
            .edges()
            .filter(|edge| edge.to() == reduction.sink())
            .map(|edge| edge.capacity())
            .collect();
        assert_eq!(to_sink, vec![0, 5, 6]);
    }

    #[test]
    fn test_eliminated() {
        let standings = teams4();
        let result = EliminationNetwork::build(&standings, 1).unwrap().solve().unwrap();
        assert!(result.is_eliminated());
        assert_eq!(result.certificate(), Some(&[0, 2][..]));
        assert_eq!(result.method(), Method::MaxFlow);
        assert!(standings.certifies(&[0, 2], 1));
    }

    #[test]
    fn test_not_eliminated() {
        let standings = teams4();
        for target in [0, 2] {
            let result = EliminationNetwork::build(&standings, target)
                .unwrap()
                .solve()
                .unwrap();
            assert!(!result.is_eliminated());
            assert_eq!(result.subject(), target);
        }
    }

    #[test]
    fn test_single_competitor() {
        let standings: Standings<String> = "1 Solo 3 4 0 0".parse().unwrap();
        let reduction = EliminationNetwork::build(&standings, 0).unwrap();
        assert_eq!(reduction.network().vertices(), 3);
        assert_eq!(reduction.scheduled_games(), 0);
        assert!(!reduction.solve().unwrap().is_eliminated());
    }

    #[test]
    fn test_target_out_of_range() {
        assert!(matches!(
            EliminationNetwork::build(&teams4(), 4),
            Err(EliminationError::InvalidNetworkConfiguration(_))
        ));
    }
}
