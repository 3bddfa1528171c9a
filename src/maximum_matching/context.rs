use crate::maximum_matching::csr::CSR;
use crate::maximum_matching::endpoint::Endpoint;
use crate::maximum_matching::graph::Graph;
use num_traits::NumAssign;

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Label {
    #[default]
    Free,
    S,
    T,
}

// Vertices are numbered 0..n, non-trivial blossoms n..2n.
// Every per-blossom array is sized 2n so that a vertex doubles as a trivial blossom.
#[derive(Default)]
pub(crate) struct MatchingContext<Weight> {
    pub num_vertices: usize,
    pub csr: CSR<Weight>,

    // remote endpoint of the matched edge of v, or None if v is single.
    // survives stages; everything else below is stage-scoped or rebuilt on the fly.
    pub mate: Vec<Option<Endpoint>>,

    // label of a top-level blossom (the label of a vertex is the label of its top-level blossom).
    // for a vertex inside a T-blossom, label T means it is reachable from an S-vertex outside the blossom.
    pub label: Vec<Label>,
    // remote endpoint of the edge through which a labeled blossom got its label,
    // None if its base vertex is single.
    pub label_end: Vec<Option<Endpoint>>,
    // top-level blossom containing vertex v
    pub in_blossom: Vec<usize>,

    pub blossom_parent: Vec<Option<usize>>,
    // sub-blossoms in cycle order, starting with the one holding the base
    pub blossom_children: Vec<Vec<usize>>,
    // base vertex; None marks an unused blossom id
    pub blossom_base: Vec<Option<usize>>,
    // blossom_endpoints[b][i] is the endpoint of blossom_children[b][i] on the edge
    // that connects it to blossom_children[b][i + 1] (wrapping)
    pub blossom_endpoints: Vec<Vec<Endpoint>>,

    // free vertex (or unreached vertex inside a T-blossom): least-slack edge to an S-vertex.
    // top-level S-blossom: least-slack edge to a different S-blossom.
    pub best_edge: Vec<Option<usize>>,
    // non-trivial top-level S-blossom: least-slack edges to neighbouring S-blossoms,
    // None until computed in this stage
    pub blossom_best_edges: Vec<Option<Vec<usize>>>,
    pub unused_blossoms: Vec<usize>,

    // vertex: 2 * u(v); blossom: z(b). doubling keeps integer weights integral.
    pub dual_var: Vec<Weight>,
    // true if edge k is known to have zero slack
    pub allow_edge: Vec<bool>,
    // scratch breadcrumbs for scan_blossom, cleared before it returns
    pub visited: Vec<bool>,
    // newly discovered S-vertices
    pub queue: Vec<usize>,
}

impl<Weight> MatchingContext<Weight>
where
    Weight: NumAssign + Ord + Copy,
{
    pub fn build(&mut self, graph: &Graph<Weight>) {
        self.csr.build(graph);
        let n = graph.num_nodes();
        self.num_vertices = n;

        self.mate = vec![None; n];
        self.label = vec![Label::Free; 2 * n];
        self.label_end = vec![None; 2 * n];
        self.in_blossom = (0..n).collect();

        self.blossom_parent = vec![None; 2 * n];
        self.blossom_children = vec![Vec::new(); 2 * n];
        self.blossom_base = (0..n).map(Some).chain((0..n).map(|_| None)).collect();
        self.blossom_endpoints = vec![Vec::new(); 2 * n];

        self.best_edge = vec![None; 2 * n];
        self.blossom_best_edges = vec![None; 2 * n];
        self.unused_blossoms = (n..2 * n).collect();

        let max_weight = self.csr.max_weight();
        self.dual_var = (0..2 * n).map(|x| if x < n { max_weight } else { Weight::zero() }).collect();
        self.allow_edge = vec![false; self.csr.num_edges];
        self.visited = vec![false; 2 * n];
        self.queue = Vec::new();
    }

    #[inline]
    pub fn endpoint(&self, p: Endpoint) -> usize {
        self.csr.endpoint(p)
    }

    #[inline]
    pub fn edge(&self, k: usize) -> (usize, usize) {
        let e = &self.csr.inside_edge_list[k];
        (e.u, e.v)
    }

    #[inline]
    pub fn is_blossom(&self, b: usize) -> bool {
        b >= self.num_vertices
    }

    // 2 * slack of edge k (does not work inside blossoms)
    #[inline]
    pub fn slack(&self, k: usize) -> Weight {
        let e = &self.csr.inside_edge_list[k];
        self.dual_var[e.u] + self.dual_var[e.v] - two::<Weight>() * e.weight
    }

    // leaf vertices of a (possibly trivial) blossom, in cycle order
    pub fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![b];
        while let Some(t) = stack.pop() {
            if self.is_blossom(t) {
                stack.extend(self.blossom_children[t].iter().rev());
            } else {
                leaves.push(t);
            }
        }
        leaves
    }

    // Assign label t to the top-level blossom containing vertex w, reached through the edge with remote endpoint p.
    // A T-blossom hands label S on to the mate of its base.
    pub fn assign_label(&mut self, w: usize, t: Label, p: Option<Endpoint>) {
        let (mut w, mut t, mut p) = (w, t, p);
        loop {
            let b = self.in_blossom[w];
            assert!(self.label[w] == Label::Free && self.label[b] == Label::Free);
            self.label[w] = t;
            self.label[b] = t;
            self.label_end[w] = p;
            self.label_end[b] = p;
            self.best_edge[w] = None;
            self.best_edge[b] = None;

            match t {
                Label::S => {
                    let leaves = self.blossom_leaves(b);
                    self.queue.extend(leaves);
                    return;
                }
                Label::T => {
                    // only the base of b has an external mate
                    let base = self.blossom_base[b].expect("labeled blossom has a base");
                    let mate = self.mate[base].expect("base of a T-blossom is matched");
                    w = self.endpoint(mate);
                    t = Label::S;
                    p = Some(mate.opposite());
                }
                Label::Free => unreachable!("assign_label with label Free"),
            }
        }
    }

    #[inline]
    pub fn top_level_label(&self, v: usize) -> Label {
        self.label[self.in_blossom[v]]
    }

    // mate array in vertex terms
    pub fn mate_vertices(&self) -> Vec<Option<usize>> {
        self.mate.iter().map(|m| m.map(|p| self.endpoint(p))).collect()
    }
}

#[inline]
pub(crate) fn two<Weight: NumAssign>() -> Weight {
    Weight::one() + Weight::one()
}

// python-style index into a cycle, j may be negative
#[inline]
pub(crate) fn wrap(len: usize, j: isize) -> usize {
    j.rem_euclid(len as isize) as usize
}
