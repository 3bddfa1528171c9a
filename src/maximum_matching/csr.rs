use crate::maximum_matching::endpoint::Endpoint;
use crate::maximum_matching::graph::Graph;
use num_traits::NumAssign;
use std::collections::HashMap;

#[derive(Default, PartialEq, Debug, Clone)]
pub struct InsideEdge<Weight> {
    pub u: usize,
    pub v: usize,
    pub weight: Weight,
    // edge id in the graph this inside edge came from
    pub source: usize,
}

// edge list of a simple graph plus, for every vertex, the remote endpoints of its edges.
// parallel edges of the input graph are collapsed to the one with maximum weight.
#[derive(Default)]
pub struct CSR<Weight> {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub edge_index_to_inside_edge_index: Vec<usize>,

    pub start: Vec<usize>,
    pub inside_edge_list: Vec<InsideEdge<Weight>>,
    pub(crate) neighbor_endpoints: Vec<Endpoint>,
}

impl<Weight> CSR<Weight>
where
    Weight: NumAssign + Ord + Copy,
{
    pub fn build(&mut self, graph: &Graph<Weight>) {
        self.num_nodes = graph.num_nodes();

        // initialize
        self.edge_index_to_inside_edge_index.clear();
        self.edge_index_to_inside_edge_index.resize(graph.num_edges(), usize::MAX);
        self.inside_edge_list.clear();

        let mut pair_to_inside_edge_index: HashMap<(usize, usize), usize> = HashMap::new();
        for (edge_index, e) in graph.edges.iter().enumerate() {
            let key = (e.u.min(e.v), e.u.max(e.v));
            match pair_to_inside_edge_index.get(&key) {
                Some(&inside_edge_index) => {
                    // keep the first position, take the larger weight
                    let inside_edge = &mut self.inside_edge_list[inside_edge_index];
                    if e.weight > inside_edge.weight {
                        inside_edge.weight = e.weight;
                        inside_edge.source = edge_index;
                    }
                    self.edge_index_to_inside_edge_index[edge_index] = inside_edge_index;
                }
                None => {
                    let inside_edge_index = self.inside_edge_list.len();
                    pair_to_inside_edge_index.insert(key, inside_edge_index);
                    self.inside_edge_list.push(InsideEdge { u: e.u, v: e.v, weight: e.weight, source: edge_index });
                    self.edge_index_to_inside_edge_index[edge_index] = inside_edge_index;
                }
            }
        }
        self.num_edges = self.inside_edge_list.len();

        let mut degree = vec![0; self.num_nodes];
        for e in self.inside_edge_list.iter() {
            degree[e.u] += 1;
            degree[e.v] += 1;
        }

        self.start.clear();
        self.start.resize(self.num_nodes + 1, 0);
        for i in 1..=self.num_nodes {
            self.start[i] += self.start[i - 1] + degree[i - 1];
        }

        // per vertex, remote endpoints appear in edge order
        let mut counter = vec![0; self.num_nodes];
        self.neighbor_endpoints.clear();
        self.neighbor_endpoints.resize(2 * self.num_edges, Endpoint::new(0, 0));
        for (k, e) in self.inside_edge_list.iter().enumerate() {
            self.neighbor_endpoints[self.start[e.u] + counter[e.u]] = Endpoint::new(k, 1);
            counter[e.u] += 1;
            self.neighbor_endpoints[self.start[e.v] + counter[e.v]] = Endpoint::new(k, 0);
            counter[e.v] += 1;
        }
    }

    // copy a mate array (in vertex terms) back into the graph
    pub fn set_matching(&self, mates: &[Option<usize>], graph: &mut Graph<Weight>) {
        graph.reset_matching();
        for (u, &mate) in mates.iter().enumerate() {
            graph.mates[u] = mate;
        }
        for e in self.inside_edge_list.iter() {
            if mates[e.u] == Some(e.v) {
                graph.edges[e.source].matched = true;
            }
        }
    }

    // vertex to which endpoint p is attached
    #[inline]
    pub(crate) fn endpoint(&self, p: Endpoint) -> usize {
        let e = &self.inside_edge_list[p.edge()];
        if p.side() == 0 {
            e.u
        } else {
            e.v
        }
    }

    #[inline]
    pub(crate) fn neighbors(&self, u: usize) -> &[Endpoint] {
        &self.neighbor_endpoints[self.start[u]..self.start[u + 1]]
    }

    #[inline]
    pub fn max_weight(&self) -> Weight {
        self.inside_edge_list.iter().fold(Weight::zero(), |max, e| max.max(e.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_endpoints_point_at_neighbors() {
        let mut graph = Graph::default();
        graph.add_nodes(3);
        graph.add_undirected_edge(0, 1, 4).unwrap();
        graph.add_undirected_edge(1, 2, 5).unwrap();

        let mut csr = CSR::default();
        csr.build(&graph);

        let neighbors_of_1: Vec<usize> = csr.neighbors(1).iter().map(|&p| csr.endpoint(p)).collect();
        assert_eq!(neighbors_of_1, vec![0, 2]);
        for u in 0..3 {
            for &p in csr.neighbors(u) {
                assert_eq!(csr.endpoint(p.opposite()), u);
            }
        }
        assert_eq!(csr.max_weight(), 5);
    }

    #[test]
    fn parallel_edges_collapse_to_max_weight() {
        let mut graph = Graph::default();
        graph.add_nodes(3);
        graph.add_undirected_edge(0, 1, 2).unwrap();
        graph.add_undirected_edge(1, 2, 3).unwrap();
        graph.add_undirected_edge(1, 0, 7).unwrap();
        graph.add_undirected_edge(0, 1, 7).unwrap();

        let mut csr = CSR::default();
        csr.build(&graph);

        assert_eq!(csr.num_edges, 2);
        assert_eq!(csr.inside_edge_list[0], InsideEdge { u: 0, v: 1, weight: 7, source: 2 });
        assert_eq!(csr.edge_index_to_inside_edge_index, vec![0, 1, 0, 0]);
        assert_eq!(csr.neighbors(0).len(), 1);
    }

    #[test]
    fn negative_weights_keep_zero_as_max_weight() {
        let mut graph = Graph::default();
        graph.add_nodes(2);
        graph.add_undirected_edge(0, 1, -3).unwrap();

        let mut csr = CSR::default();
        csr.build(&graph);
        assert_eq!(csr.max_weight(), 0);
    }
}
