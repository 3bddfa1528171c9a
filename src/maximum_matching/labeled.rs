// Matching on graphs whose nodes carry arbitrary labels.
// Labels are interned into dense ids in first-seen order and translated back after solving.

use crate::maximum_matching::edmonds_blossom::EdmondsBlossom;
use crate::maximum_matching::error::MatchingError;
use crate::maximum_matching::graph::Graph;
use crate::maximum_matching::greedy::Greedy;
use num_traits::{Bounded, NumAssign};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Neg;

pub struct LabeledGraph<N, Weight> {
    labels: Vec<N>,
    label_to_id: HashMap<N, usize>,
    graph: Graph<Weight>,
}

impl<N, Weight> Default for LabeledGraph<N, Weight>
where
    Weight: Default,
{
    fn default() -> Self {
        Self { labels: Vec::new(), label_to_id: HashMap::new(), graph: Graph::default() }
    }
}

impl<N, Weight> LabeledGraph<N, Weight>
where
    N: Eq + Hash + Clone + Debug,
    Weight: NumAssign + Neg<Output = Weight> + Bounded + Ord + Copy + Debug + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    // adding a known label returns its existing id
    pub fn add_node(&mut self, label: N) -> usize {
        if let Some(&id) = self.label_to_id.get(&label) {
            return id;
        }
        let id = self.graph.add_node();
        self.labels.push(label.clone());
        self.label_to_id.insert(label, id);
        id
    }

    // parallel edges are allowed; matching only ever sees the heaviest one
    pub fn add_edge(&mut self, u: N, v: N, weight: Weight) -> Result<usize, MatchingError> {
        if u == v {
            return Err(MatchingError::SelfLoop(format!("{:?}", u)));
        }
        if !Graph::<Weight>::is_valid_weight(weight) {
            return Err(MatchingError::WeightOutOfRange(format!("{:?}", weight)));
        }
        let (u, v) = (self.add_node(u), self.add_node(v));
        Ok(self.graph.add_undirected_edge(u, v, weight).expect("both endpoints were just interned"))
    }

    // weight one
    pub fn add_unweighted_edge(&mut self, u: N, v: N) -> Result<usize, MatchingError> {
        self.add_edge(u, v, Weight::one())
    }

    pub fn id(&self, label: &N) -> Option<usize> {
        self.label_to_id.get(label).copied()
    }

    pub fn label(&self, id: usize) -> Option<&N> {
        self.labels.get(id)
    }

    // both directions of every matched pair; unmatched nodes are absent
    pub fn max_weight_matching(&mut self, max_cardinality: bool) -> HashMap<N, N> {
        EdmondsBlossom::default().with_max_cardinality(max_cardinality).solve(&mut self.graph);
        self.graph
            .mates()
            .iter()
            .enumerate()
            .filter_map(|(u, mate)| mate.map(|v| (self.labels[u].clone(), self.labels[v].clone())))
            .collect()
    }

    // one pair per matched edge, in edge insertion order
    pub fn maximal_matching(&mut self) -> Vec<(N, N)> {
        Greedy::default().solve(&mut self.graph);
        self.graph
            .matching()
            .into_iter()
            .map(|edge_id| {
                let e = &self.graph.edges[edge_id];
                (self.labels[e.u].clone(), self.labels[e.v].clone())
            })
            .collect()
    }

    pub fn matching_weight(&self) -> Weight {
        self.graph.matching_weight()
    }
}
