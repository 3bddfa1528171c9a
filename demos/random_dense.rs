use graph_matching::maximum_matching::edmonds_blossom::EdmondsBlossom;
use graph_matching::maximum_matching::graph::Graph;
use graph_matching::maximum_matching::status::Status;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

const NUM_NODES: usize = 300;

fn main() {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut graph = Graph::default();
    graph.add_nodes(NUM_NODES);
    for u in 0..NUM_NODES {
        for v in u + 1..NUM_NODES {
            graph.add_undirected_edge(u, v, rng.gen_range(-50i64..50)).unwrap();
        }
    }

    let now = Instant::now();
    let status = EdmondsBlossom::default().solve(&mut graph);
    let elapsed = now.elapsed();

    match status {
        Status::Optimal => {
            println!("elapsed time: {:?}", elapsed);
            println!("matched pairs: {}", graph.matching_size());
            println!("maximum weight: {}", graph.matching_weight());
        }
        _ => unreachable!(),
    }
}
