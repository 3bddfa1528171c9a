use crate::maximum_matching::graph::Graph;
use crate::maximum_matching::status::Status;
use num_traits::NumAssign;
use std::marker::PhantomData;

// maximal (not maximum) matching: no edge can be added, but a larger matching may exist.
// O(m)
#[derive(Default)]
pub struct Greedy<Weight> {
    phantom: PhantomData<Weight>,
}

impl<Weight> Greedy<Weight>
where
    Weight: NumAssign + Ord + Copy,
{
    pub fn solve(&mut self, graph: &mut Graph<Weight>) -> Status {
        graph.reset_matching();

        for edge_id in 0..graph.num_edges() {
            let (u, v) = (graph.edges[edge_id].u, graph.edges[edge_id].v);
            // the edge isn't covered yet
            if graph.mates[u].is_none() && graph.mates[v].is_none() {
                graph.mates[u] = Some(v);
                graph.mates[v] = Some(u);
                graph.edges[edge_id].matched = true;
            }
        }

        Status::Maximal
    }
}
