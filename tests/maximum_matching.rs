use graph_matching::maximum_matching::edmonds_blossom::EdmondsBlossom;
use graph_matching::maximum_matching::graph::{Edge, Graph};
use graph_matching::maximum_matching::greedy::Greedy;
use graph_matching::maximum_matching::status::Status;
use rstest::rstest;

fn build(edges: &[(usize, usize, i64)]) -> Graph<i64> {
    let num_nodes = edges.iter().map(|&(u, v, _)| u.max(v) + 1).max().unwrap_or(0);
    let mut graph = Graph::default();
    graph.add_nodes(num_nodes);
    for &(u, v, w) in edges {
        graph.add_undirected_edge(u, v, w).unwrap();
    }
    graph
}

fn mates(m: &[i64]) -> Vec<Option<usize>> {
    m.iter().map(|&x| if x < 0 { None } else { Some(x as usize) }).collect()
}

#[rstest]
// single edge
#[case(&[(0, 1, 1)], &[1, 0])]
#[case(&[(1, 2, 10), (2, 3, 11)], &[-1, -1, 3, 2])]
#[case(&[(1, 2, 5), (2, 3, 11), (3, 4, 5)], &[-1, -1, 3, 2, -1])]
// negative weights
#[case(&[(1, 2, 2), (1, 3, -2), (2, 3, 1), (2, 4, -1), (3, 4, -6)], &[-1, 2, 1, -1, -1])]
// create S-blossom and use it for augmentation
#[case(&[(1, 2, 8), (1, 3, 9), (2, 3, 10), (3, 4, 7)], &[-1, 2, 1, 4, 3])]
#[case(&[(1, 2, 8), (1, 3, 9), (2, 3, 10), (3, 4, 7), (1, 6, 5), (4, 5, 6)], &[-1, 6, 3, 2, 5, 4, 1])]
// create S-blossom, relabel as T-blossom, use for augmentation
#[case(&[(1, 2, 9), (1, 3, 8), (2, 3, 10), (1, 4, 5), (4, 5, 4), (1, 6, 3)], &[-1, 6, 3, 2, 5, 4, 1])]
#[case(&[(1, 2, 9), (1, 3, 8), (2, 3, 10), (1, 4, 5), (4, 5, 3), (1, 6, 4)], &[-1, 6, 3, 2, 5, 4, 1])]
#[case(&[(1, 2, 9), (1, 3, 8), (2, 3, 10), (1, 4, 5), (4, 5, 3), (3, 6, 4)], &[-1, 2, 1, 6, 5, 4, 3])]
// create nested S-blossom, use for augmentation
#[case(&[(1, 2, 9), (1, 3, 9), (2, 3, 10), (2, 4, 8), (3, 5, 8), (4, 5, 10), (5, 6, 6)], &[-1, 3, 4, 1, 2, 6, 5])]
// create S-blossom, relabel as S, include in nested S-blossom
#[case(&[(1, 2, 10), (1, 7, 10), (2, 3, 12), (3, 4, 20), (3, 5, 20), (4, 5, 25), (5, 6, 10), (6, 7, 10), (7, 8, 8)], &[-1, 2, 1, 4, 3, 6, 5, 8, 7])]
// create nested S-blossom, augment, expand recursively
#[case(&[(1, 2, 8), (1, 3, 8), (2, 3, 10), (2, 4, 12), (3, 5, 12), (4, 5, 14), (4, 6, 12), (5, 7, 12), (6, 7, 14), (7, 8, 12)], &[-1, 2, 1, 5, 6, 3, 4, 8, 7])]
// create S-blossom, relabel as T, expand
#[case(&[(1, 2, 23), (1, 5, 22), (1, 6, 15), (2, 3, 25), (3, 4, 22), (4, 5, 25), (4, 8, 14), (5, 7, 13)], &[-1, 6, 3, 2, 8, 7, 1, 5, 4])]
// create nested S-blossom, relabel as T, expand
#[case(&[(1, 2, 19), (1, 3, 20), (1, 8, 8), (2, 3, 25), (2, 4, 18), (3, 5, 18), (4, 5, 13), (4, 7, 7), (5, 6, 7)], &[-1, 8, 3, 2, 7, 6, 5, 4, 1])]
// create blossom, relabel as T in more than one way, expand, augment
#[case(&[(1, 2, 45), (1, 5, 45), (2, 3, 50), (3, 4, 45), (4, 5, 50), (1, 6, 30), (3, 9, 35), (4, 8, 35), (5, 7, 26), (9, 10, 5)], &[-1, 6, 3, 2, 8, 7, 1, 5, 4, 10, 9])]
#[case(&[(1, 2, 45), (1, 5, 45), (2, 3, 50), (3, 4, 45), (4, 5, 50), (1, 6, 30), (3, 9, 35), (4, 8, 26), (5, 7, 40), (9, 10, 5)], &[-1, 6, 3, 2, 8, 7, 1, 5, 4, 10, 9])]
// create blossom, relabel as T, expand such that a new least-slack S-to-free edge is produced, augment
#[case(&[(1, 2, 45), (1, 5, 45), (2, 3, 50), (3, 4, 45), (4, 5, 50), (1, 6, 30), (3, 9, 35), (4, 8, 28), (5, 7, 26), (9, 10, 5)], &[-1, 6, 3, 2, 8, 7, 1, 5, 4, 10, 9])]
// create nested blossom, relabel as T in more than one way, expand outer blossom such that inner blossom ends up on an augmenting path
#[case(&[(1, 2, 45), (1, 7, 45), (2, 3, 50), (3, 4, 45), (4, 5, 95), (4, 6, 94), (5, 6, 94), (6, 7, 50), (1, 8, 30), (3, 11, 35), (5, 9, 36), (7, 10, 26), (11, 12, 5)], &[-1, 8, 3, 2, 6, 9, 4, 10, 1, 5, 7, 12, 11])]
// create nested S-blossom, relabel as S, expand recursively
#[case(&[(1, 2, 40), (1, 3, 40), (2, 3, 60), (2, 4, 55), (3, 5, 55), (4, 5, 50), (1, 8, 15), (5, 7, 30), (7, 6, 10), (8, 10, 10), (4, 9, 30)], &[-1, 2, 1, 5, 9, 3, 7, 6, 10, 4, 8])]
fn max_weight(#[case] edges: &[(usize, usize, i64)], #[case] expected: &[i64]) {
    let mut graph = build(edges);
    assert_eq!(EdmondsBlossom::default().solve(&mut graph), Status::Optimal);
    assert_eq!(graph.mates(), mates(expected).as_slice());
}

#[rstest]
#[case(&[(1, 2, 5), (2, 3, 11), (3, 4, 5)], &[-1, 2, 1, 4, 3])]
#[case(&[(1, 2, 2), (1, 3, -2), (2, 3, 1), (2, 4, -1), (3, 4, -6)], &[-1, 3, 4, 1, 2])]
fn max_cardinality(#[case] edges: &[(usize, usize, i64)], #[case] expected: &[i64]) {
    let mut graph = build(edges);
    assert_eq!(EdmondsBlossom::default().with_max_cardinality(true).solve(&mut graph), Status::Optimal);
    assert_eq!(graph.mates(), mates(expected).as_slice());
}

#[test]
fn empty_graph() {
    let mut graph = build(&[]);
    assert_eq!(EdmondsBlossom::default().solve(&mut graph), Status::Optimal);
    assert!(graph.mates().is_empty());
    assert_eq!(graph.matching_weight(), 0);
}

#[test]
fn matched_edges_and_weight() {
    let mut graph = build(&[(1, 2, 9), (1, 3, 9), (2, 3, 10), (2, 4, 8), (3, 5, 8), (4, 5, 10), (5, 6, 6)]);
    EdmondsBlossom::default().solve(&mut graph);

    // 1-3, 2-4, 5-6
    assert_eq!(graph.matching(), vec![1, 3, 6]);
    assert_eq!(graph.matching_size(), 3);
    assert_eq!(graph.matching_weight(), 23);
    assert_eq!(graph.get_edge(3), Some(Edge { u: 2, v: 4, weight: 8, matched: true }));
    assert_eq!(graph.mate(0), None);
    assert_eq!(graph.mate(6), Some(5));
}

#[test]
fn parallel_edges_use_the_heaviest() {
    let mut graph = Graph::default();
    graph.add_nodes(3);
    let light = graph.add_undirected_edge(0, 1, 1).unwrap();
    graph.add_undirected_edge(1, 2, 4).unwrap();
    let heavy = graph.add_undirected_edge(1, 0, 6).unwrap();

    EdmondsBlossom::default().solve(&mut graph);
    assert_eq!(graph.matching(), vec![heavy]);
    assert!(!graph.get_edge(light).unwrap().matched);
    assert_eq!(graph.matching_weight(), 6);
}

#[test]
fn solving_twice_gives_the_same_matching() {
    let mut graph = build(&[(1, 2, 45), (1, 5, 45), (2, 3, 50), (3, 4, 45), (4, 5, 50), (1, 6, 30), (3, 9, 35), (4, 8, 35), (5, 7, 26), (9, 10, 5)]);
    let mut solver = EdmondsBlossom::default();
    solver.solve(&mut graph);
    let first = graph.mates().to_vec();
    solver.solve(&mut graph);
    assert_eq!(graph.mates(), first.as_slice());
}

#[test]
fn builder_rejects_malformed_edges() {
    let mut graph: Graph<i64> = Graph::default();
    graph.add_nodes(2);
    assert_eq!(graph.add_undirected_edge(0, 0, 1), None);
    assert_eq!(graph.add_undirected_edge(0, 2, 1), None);
    assert_eq!(graph.add_undirected_edge(0, 1, 1), Some(0));
    assert_eq!(graph.get_edge(1), None);
}

#[test]
fn builder_rejects_weights_that_would_overflow_the_duals() {
    let mut graph: Graph<i32> = Graph::default();
    graph.add_nodes(2);
    assert_eq!(graph.add_undirected_edge(0, 1, i32::MAX / 2 + 10), None);
    assert_eq!(graph.add_undirected_edge(0, 1, i32::MIN / 8 - 1), None);
    assert_eq!(graph.num_edges(), 0);

    let edge = graph.add_undirected_edge(0, 1, i32::MAX / 8).unwrap();
    assert_eq!(EdmondsBlossom::default().solve(&mut graph), Status::Optimal);
    assert_eq!(graph.matching(), vec![edge]);
    assert!(Graph::<i32>::is_valid_weight(i32::MIN / 8));
    assert!(!Graph::<u8>::is_valid_weight(32));
}

#[test]
fn greedy_on_fan_covers_every_edge() {
    let mut graph = Graph::default();
    graph.add_nodes(6);
    for v in 1..6 {
        graph.add_undirected_edge(0, v, 1).unwrap();
    }
    graph.add_undirected_edge(1, 2, 1).unwrap();

    assert_eq!(Greedy::default().solve(&mut graph), Status::Maximal);
    assert_eq!(graph.matching_size(), 1);
    for edge_id in 0..graph.num_edges() {
        let e = graph.get_edge(edge_id).unwrap();
        assert!(graph.mate(e.u).is_some() || graph.mate(e.v).is_some());
    }
}

#[test]
fn greedy_resets_a_previous_matching() {
    let mut graph = build(&[(0, 1, 1), (1, 2, 5), (2, 3, 1)]);
    EdmondsBlossom::default().solve(&mut graph);
    assert_eq!(graph.matching(), vec![1]);

    Greedy::default().solve(&mut graph);
    assert_eq!(graph.matching(), vec![0, 2]);
}
