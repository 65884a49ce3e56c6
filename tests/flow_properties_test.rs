//! Property tests for the max flow solvers
//!
//! Random small networks are checked against an independent capacity-matrix
//! reference, and drained networks are checked for conservation, capacity
//! and mirroring.

use flownet::algorithms::{cut_capacity, min_cut, EdgeHandle, FlowEdge, LevelGraph};
use flownet::{dinic, Capacity, FlowAlgorithm, FlowNetwork, FlowTotal};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct RandomInstance {
    vertex_count: usize,
    edges: Vec<(usize, usize, Capacity)>,
}

impl RandomInstance {
    fn generate(rng: &mut StdRng, max_vertices: usize, max_edges: usize, max_capacity: Capacity) -> Self {
        let vertex_count = rng.gen_range(2..=max_vertices);
        let edge_count = rng.gen_range(0..=max_edges);
        let edges = (0..edge_count)
            .map(|_| {
                (
                    rng.gen_range(0..vertex_count),
                    rng.gen_range(0..vertex_count),
                    rng.gen_range(0..=max_capacity),
                )
            })
            .collect();
        RandomInstance { vertex_count, edges }
    }

    fn network(&self) -> FlowNetwork {
        let mut network = FlowNetwork::new(self.vertex_count);
        for &(from, to, capacity) in &self.edges {
            network.add_edge(from, to, capacity);
        }
        network
    }

    /// Repeated simple-path augmentation on a residual capacity matrix
    fn reference_max_flow(&self, source: usize, sink: usize) -> FlowTotal {
        let n = self.vertex_count;
        let mut residual = vec![vec![0 as Capacity; n]; n];
        for &(from, to, capacity) in &self.edges {
            if from != to {
                residual[from][to] += capacity;
            }
        }

        let mut total: FlowTotal = 0;
        loop {
            let mut parent = vec![usize::MAX; n];
            let mut visited = vec![false; n];
            let mut stack = vec![source];
            visited[source] = true;
            while let Some(u) = stack.pop() {
                for v in 0..n {
                    if !visited[v] && residual[u][v] > 0 {
                        visited[v] = true;
                        parent[v] = u;
                        stack.push(v);
                    }
                }
            }
            if !visited[sink] {
                return total;
            }

            let mut bottleneck = Capacity::MAX;
            let mut v = sink;
            while v != source {
                bottleneck = bottleneck.min(residual[parent[v]][v]);
                v = parent[v];
            }
            let mut v = sink;
            while v != source {
                residual[parent[v]][v] -= bottleneck;
                residual[v][parent[v]] += bottleneck;
                v = parent[v];
            }
            total += bottleneck as FlowTotal;
        }
    }
}

fn all_edges(network: &FlowNetwork) -> Vec<FlowEdge> {
    (0..network.vertex_count())
        .flat_map(|v| network.edges(v).to_vec())
        .collect()
}

fn assert_valid_flow(network: &FlowNetwork, source: usize, sink: usize, max_flow: FlowTotal) {
    for v in 0..network.vertex_count() {
        if v != source && v != sink {
            assert_eq!(network.outflow(v), 0, "conservation violated at {}", v);
        }
        for (index, edge) in network.edges(v).iter().enumerate() {
            assert!(edge.flow <= edge.capacity, "edge {:?} over capacity", edge);
            if !edge.residual_edge {
                assert!(edge.flow >= 0, "edge {:?} carries negative flow", edge);
            }
            let sibling = network.edge(network.sibling(EdgeHandle { vertex: v, index }));
            assert_eq!(edge.flow, -sibling.flow, "mirroring broken on {:?}", edge);
        }
    }
    assert_eq!(network.outflow(source), max_flow);
    assert_eq!(network.outflow(sink), -max_flow);
}

#[test]
fn test_matches_reference_on_small_networks() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..500 {
        let instance = RandomInstance::generate(&mut rng, 8, 15, 20);
        let source = rng.gen_range(0..instance.vertex_count);
        let mut sink = rng.gen_range(0..instance.vertex_count);
        if sink == source {
            sink = (source + 1) % instance.vertex_count;
        }
        let expected = instance.reference_max_flow(source, sink);

        for algo in FlowAlgorithm::ALL {
            let mut network = instance.network();
            let result = algo.run(&mut network, source, sink);
            assert_eq!(
                result.max_flow, expected,
                "{} disagrees with reference on {:?} ({} -> {})",
                algo, instance.edges, source, sink
            );
            assert_valid_flow(&network, source, sink, result.max_flow);

            let cut = min_cut(&network, source);
            assert_eq!(cut.capacity, expected);
            assert!(!cut.contains(sink));
        }
    }
}

#[test]
fn test_dinic_phases_bounded_by_vertex_count() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let instance = RandomInstance::generate(&mut rng, 40, 200, 20);
        let sink = instance.vertex_count - 1;
        let mut network = instance.network();
        let result = dinic(&mut network, 0, sink);

        assert!(
            result.phases <= instance.vertex_count,
            "{} phases on {} vertices",
            result.phases,
            instance.vertex_count
        );
        assert_eq!(result.max_flow, instance.reference_max_flow(0, sink));
    }
}

#[test]
fn test_requery_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let instance = RandomInstance::generate(&mut rng, 8, 15, 20);
        let sink = instance.vertex_count - 1;
        let mut network = instance.network();

        let first = dinic(&mut network, 0, sink);
        let drained = all_edges(&network);
        assert!(!LevelGraph::build(&network, 0).reaches(sink));

        let second = dinic(&mut network, 0, sink);
        assert_eq!(second.max_flow, first.max_flow);
        assert_eq!(second.phases, 0);
        assert_eq!(all_edges(&network), drained);
    }
}

#[test]
fn test_reset_network_solves_like_new() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..100 {
        let instance = RandomInstance::generate(&mut rng, 8, 15, 20);
        let sink = instance.vertex_count - 1;

        for algo in FlowAlgorithm::ALL {
            let mut network = instance.network();
            let first = algo.run(&mut network, 0, sink);

            network.reset_flow();
            assert_eq!(all_edges(&network), all_edges(&instance.network()));
            assert_eq!(network.outflow(0), 0);

            let again = algo.run(&mut network, 0, sink);
            assert_eq!(again, first, "{} after reset", algo);
        }
    }
}

#[test]
fn test_network_size_grows_by_one_pair_per_edge() {
    let mut network = FlowNetwork::new(3);
    let before: Vec<usize> = (0..3).map(|v| network.edges(v).len()).collect();
    network.add_edge(0, 2, 9);
    let after: Vec<usize> = (0..3).map(|v| network.edges(v).len()).collect();

    assert_eq!(after[0], before[0] + 1);
    assert_eq!(after[1], before[1]);
    assert_eq!(after[2], before[2] + 1);
}

#[test]
fn test_concrete_scenarios() {
    // Five-edge diamond: 0->1->3 (2), 0->2->3 (2), 0->1->2->3 (1)
    let mut network = FlowNetwork::new(4);
    network.add_edge(0, 1, 3);
    network.add_edge(0, 2, 2);
    network.add_edge(1, 3, 2);
    network.add_edge(2, 3, 3);
    network.add_edge(1, 2, 1);
    assert_eq!(dinic(&mut network, 0, 3).max_flow, 5);
    let cut = min_cut(&network, 0);
    assert_eq!(cut_capacity(&network, &cut.edges), 5);

    let mut network = FlowNetwork::new(2);
    network.add_edge(0, 1, 5);
    assert_eq!(dinic(&mut network, 0, 1).max_flow, 5);

    let mut network = FlowNetwork::new(4);
    network.add_edge(0, 1, 5);
    network.add_edge(1, 0, 5);
    network.add_edge(3, 2, 5);
    assert_eq!(dinic(&mut network, 0, 3).max_flow, 0);
}
