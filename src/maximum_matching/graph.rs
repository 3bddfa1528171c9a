use num_traits::{Bounded, NumAssign};

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Weight> {
    pub u: usize,
    pub v: usize,
    pub weight: Weight,
    pub matched: bool,
}

#[derive(Default)]
pub struct Graph<Weight> {
    num_nodes: usize,
    num_edges: usize,
    pub(crate) edges: Vec<Edge<Weight>>,
    pub(crate) mates: Vec<Option<usize>>,
}

impl<Weight> Graph<Weight>
where
    Weight: NumAssign + Ord + Copy,
{
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_node(&mut self) -> usize {
        self.mates.push(None);
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.mates.extend(vec![None; num_nodes]);
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Weight>> {
        self.edges.get(edge_id).cloned()
    }

    #[inline]
    pub fn mate(&self, u: usize) -> Option<usize> {
        self.mates.get(u).copied().flatten()
    }

    // mates()[v] is the partner of v, or None if v is unmatched
    pub fn mates(&self) -> &[Option<usize>] {
        &self.mates
    }

    // matched edge ids
    pub fn matching(&self) -> Vec<usize> {
        (0..self.num_edges).filter(|&edge_id| self.edges[edge_id].matched).collect()
    }

    pub fn matching_size(&self) -> usize {
        self.edges.iter().filter(|e| e.matched).count()
    }

    pub fn matching_weight(&self) -> Weight {
        self.edges.iter().filter(|e| e.matched).fold(Weight::zero(), |sum, e| sum + e.weight)
    }

    pub(crate) fn reset_matching(&mut self) {
        self.mates.fill(None);
        self.edges.iter_mut().for_each(|e| e.matched = false);
    }
}

impl<Weight> Graph<Weight>
where
    Weight: NumAssign + Bounded + Ord + Copy,
{
    // weights are limited to an eighth of the type's range, so doubled duals and slacks never overflow
    pub fn is_valid_weight(weight: Weight) -> bool {
        let two = Weight::one() + Weight::one();
        let eight = two * two * two;
        Weight::min_value() / eight <= weight && weight <= Weight::max_value() / eight
    }

    // return edge index
    pub fn add_undirected_edge(&mut self, u: usize, v: usize, weight: Weight) -> Option<usize> {
        if u == v || u >= self.num_nodes || v >= self.num_nodes || !Self::is_valid_weight(weight) {
            return None;
        }

        self.edges.push(Edge { u, v, weight, matched: false });

        self.num_edges += 1;
        Some(self.num_edges - 1)
    }
}
