// Weighted maximum matching in general graphs.
//
// Primal-dual blossom algorithm of Edmonds, as described in
// "Efficient Algorithms for Finding Maximum Matching in Graphs", Zvi Galil, ACM Computing Surveys, 1986.
// Runs in O(n^3).
//
// Vertex dual variables, edge slacks and deltas are all pre-multiplied by two.
use crate::maximum_matching::context::{two, Label, MatchingContext};
use crate::maximum_matching::endpoint::Endpoint;
use crate::maximum_matching::graph::Graph;
use crate::maximum_matching::status::Status;
use log::{debug, trace};
use num_traits::NumAssign;
use std::fmt::Debug;
use std::ops::Neg;

// where the minimum delta occurred
#[derive(PartialEq, Debug, Clone, Copy)]
enum DeltaType {
    // minimum vertex dual: no further improvement possible
    VertexDual,
    // least-slack edge between an S-vertex and a free vertex
    FreeEdge(usize),
    // least-slack edge between two S-blossoms
    SEdge(usize),
    // least-z top-level T-blossom
    TBlossom(usize),
}

// Weights must stay within an eighth of the weight type's range (see Graph::is_valid_weight).
#[derive(Default)]
pub struct EdmondsBlossom<Weight> {
    max_cardinality: bool,
    context: MatchingContext<Weight>,
}

impl<Weight> EdmondsBlossom<Weight> {
    // only maximum-cardinality matchings are considered as solutions
    pub fn with_max_cardinality(mut self, max_cardinality: bool) -> Self {
        self.max_cardinality = max_cardinality;
        self
    }
}

impl<Weight> EdmondsBlossom<Weight>
where
    Weight: NumAssign + Neg<Output = Weight> + Ord + Copy + Debug,
{
    pub fn solve(&mut self, graph: &mut Graph<Weight>) -> Status {
        self.context.build(graph);
        let ctx = &mut self.context;
        let n = ctx.num_vertices;

        // main loop: each iteration is a stage that finds one augmenting path
        for stage in 0..n {
            ctx.label.fill(Label::Free);
            ctx.best_edge.fill(None);
            ctx.blossom_best_edges[n..].fill(None);
            // loss of labeling means currently allowable edges may not stay allowable
            ctx.allow_edge.fill(false);
            ctx.queue.clear();

            // label single blossoms/vertices with S and put them in the queue
            for v in 0..n {
                if ctx.mate[v].is_none() && ctx.top_level_label(v) == Label::Free {
                    ctx.assign_label(v, Label::S, None);
                }
            }

            let augmented = run_stage(ctx, self.max_cardinality);
            debug!("stage {}: augmented={}", stage, augmented);
            if !augmented {
                break;
            }

            // end of a stage; expand all S-blossoms which have dual zero
            for b in n..2 * n {
                if ctx.blossom_parent[b].is_none() && ctx.blossom_base[b].is_some() && ctx.label[b] == Label::S && ctx.dual_var[b] == Weight::zero() {
                    ctx.expand_blossom(b, true);
                }
            }
        }

        #[cfg(any(test, feature = "verify-optimum"))]
        crate::maximum_matching::verification::verify_optimum(ctx, self.max_cardinality);

        let mates = ctx.mate_vertices();
        for v in 0..n {
            assert!(mates[v].map_or(true, |w| mates[w] == Some(v)));
        }
        ctx.csr.set_matching(&mates, graph);
        Status::Optimal
    }
}

// Substages until an augmenting path is found (true) or the optimum is reached (false).
fn run_stage<Weight>(ctx: &mut MatchingContext<Weight>, max_cardinality: bool) -> bool
where
    Weight: NumAssign + Neg<Output = Weight> + Ord + Copy + Debug,
{
    loop {
        if label_vertices(ctx) {
            return true;
        }

        // no augmenting path under these constraints; pump slack out of the dual variables
        #[cfg(any(test, feature = "check-delta"))]
        {
            crate::maximum_matching::verification::check_delta2(ctx);
            crate::maximum_matching::verification::check_delta3(ctx);
        }

        let (delta, delta_type) = compute_delta(ctx, max_cardinality);
        trace!("delta {:?} = {:?}", delta_type, delta);
        update_duals(ctx, delta);

        match delta_type {
            DeltaType::VertexDual => return false,
            DeltaType::FreeEdge(k) => {
                // use the least-slack edge to continue the search
                ctx.allow_edge[k] = true;
                let (i, j) = ctx.edge(k);
                let s = if ctx.top_level_label(i) == Label::Free { j } else { i };
                assert_eq!(ctx.top_level_label(s), Label::S);
                ctx.queue.push(s);
            }
            DeltaType::SEdge(k) => {
                ctx.allow_edge[k] = true;
                let (i, _) = ctx.edge(k);
                assert_eq!(ctx.top_level_label(i), Label::S);
                ctx.queue.push(i);
            }
            DeltaType::TBlossom(b) => ctx.expand_blossom(b, false),
        }
    }
}

// Continue labeling until all vertices reachable through an alternating path have a label.
// Returns true if the matching was augmented.
fn label_vertices<Weight>(ctx: &mut MatchingContext<Weight>) -> bool
where
    Weight: NumAssign + Ord + Copy,
{
    while let Some(v) = ctx.queue.pop() {
        assert_eq!(ctx.top_level_label(v), Label::S);

        let start = ctx.csr.start[v];
        let end = ctx.csr.start[v + 1];
        for idx in start..end {
            let p = ctx.csr.neighbor_endpoints[idx];
            let k = p.edge();
            let w = ctx.endpoint(p);

            // internal to a blossom
            if ctx.in_blossom[v] == ctx.in_blossom[w] {
                continue;
            }

            let mut kslack = Weight::zero();
            if !ctx.allow_edge[k] {
                kslack = ctx.slack(k);
                if kslack <= Weight::zero() {
                    ctx.allow_edge[k] = true;
                }
            }

            if ctx.allow_edge[k] {
                match ctx.top_level_label(w) {
                    Label::Free => {
                        // w is a free vertex; label w with T and its mate with S
                        ctx.assign_label(w, Label::T, Some(p.opposite()));
                    }
                    Label::S => {
                        // follow back-links to discover either an augmenting path or a new blossom
                        match ctx.scan_blossom(v, w) {
                            Some(base) => ctx.add_blossom(base, k),
                            None => {
                                augment_matching(ctx, k);
                                return true;
                            }
                        }
                    }
                    Label::T => {
                        // w is inside a T-blossom but not yet reached from outside it;
                        // remember how, for relabeling during T-blossom expansion
                        if ctx.label[w] == Label::Free {
                            ctx.label[w] = Label::T;
                            ctx.label_end[w] = Some(p.opposite());
                        }
                    }
                }
            } else if ctx.top_level_label(w) == Label::S {
                // least-slack non-allowable edge to a different S-blossom
                let b = ctx.in_blossom[v];
                if ctx.best_edge[b].map_or(true, |best| kslack < ctx.slack(best)) {
                    ctx.best_edge[b] = Some(k);
                }
            } else if ctx.label[w] == Label::Free {
                // w is free (or an unreached vertex inside a T-blossom) but not reachable yet
                if ctx.best_edge[w].map_or(true, |best| kslack < ctx.slack(best)) {
                    ctx.best_edge[w] = Some(k);
                }
            }
        }
    }
    false
}

fn compute_delta<Weight>(ctx: &MatchingContext<Weight>, max_cardinality: bool) -> (Weight, DeltaType)
where
    Weight: NumAssign + Neg<Output = Weight> + Ord + Copy,
{
    let n = ctx.num_vertices;
    let min_vertex_dual = ctx.dual_var[..n].iter().copied().min().unwrap_or_else(Weight::zero);
    let mut best: Option<(Weight, DeltaType)> = None;
    let mut offer = |d: Weight, delta_type: DeltaType| {
        if best.map_or(true, |(delta, _)| d < delta) {
            best = Some((d, delta_type));
        }
    };

    // delta1: minimum dual of any vertex
    if !max_cardinality {
        offer(min_vertex_dual, DeltaType::VertexDual);
    }

    // delta2: minimum slack on any edge between an S-vertex and a free vertex
    for v in 0..n {
        if ctx.top_level_label(v) == Label::Free {
            if let Some(k) = ctx.best_edge[v] {
                offer(ctx.slack(k), DeltaType::FreeEdge(k));
            }
        }
    }

    // delta3: half the minimum slack on any edge between a pair of S-blossoms
    for b in 0..2 * n {
        if ctx.blossom_parent[b].is_none() && ctx.label[b] == Label::S {
            if let Some(k) = ctx.best_edge[b] {
                offer(ctx.slack(k) / two(), DeltaType::SEdge(k));
            }
        }
    }

    // delta4: minimum z of any top-level T-blossom
    for b in n..2 * n {
        if ctx.blossom_base[b].is_some() && ctx.blossom_parent[b].is_none() && ctx.label[b] == Label::T {
            offer(ctx.dual_var[b], DeltaType::TBlossom(b));
        }
    }

    match best {
        Some(best) => best,
        None => {
            // max-cardinality optimum reached; a final delta update keeps the optimum verifiable
            assert!(max_cardinality);
            (min_vertex_dual.max(Weight::zero()), DeltaType::VertexDual)
        }
    }
}

fn update_duals<Weight>(ctx: &mut MatchingContext<Weight>, delta: Weight)
where
    Weight: NumAssign + Ord + Copy,
{
    let n = ctx.num_vertices;
    for v in 0..n {
        match ctx.top_level_label(v) {
            Label::S => ctx.dual_var[v] -= delta,
            Label::T => ctx.dual_var[v] += delta,
            Label::Free => {}
        }
    }
    for b in n..2 * n {
        if ctx.blossom_base[b].is_some() && ctx.blossom_parent[b].is_none() {
            match ctx.label[b] {
                Label::S => ctx.dual_var[b] += delta,
                Label::T => ctx.dual_var[b] -= delta,
                Label::Free => {}
            }
        }
    }
}

// Swap matched/unmatched edges over an alternating path between two single vertices.
// The path runs through edge k, which connects a pair of S-vertices.
fn augment_matching<Weight>(ctx: &mut MatchingContext<Weight>, k: usize)
where
    Weight: NumAssign + Ord + Copy,
{
    let (v, w) = ctx.edge(k);
    trace!("augment through edge {} ({}, {})", k, v, w);
    for (s, p) in [(v, Endpoint::new(k, 1)), (w, Endpoint::new(k, 0))] {
        // match s to remote endpoint p, then trace back from s until a single vertex,
        // swapping matched and unmatched edges on the way
        let (mut s, mut p) = (s, p);
        loop {
            let bs = ctx.in_blossom[s];
            assert_eq!(ctx.label[bs], Label::S);
            assert!(ctx.label_end[bs] == ctx.blossom_base[bs].and_then(|base| ctx.mate[base]));

            // augment through the S-blossom from s to base
            if ctx.is_blossom(bs) {
                ctx.augment_blossom(bs, s);
            }
            ctx.mate[s] = Some(p);

            // reached a single vertex
            let Some(q) = ctx.label_end[bs] else {
                break;
            };
            let t = ctx.endpoint(q);
            let bt = ctx.in_blossom[t];
            assert_eq!(ctx.label[bt], Label::T);

            // trace one more step back
            let r = ctx.label_end[bt].expect("T-blossom has a label endpoint");
            s = ctx.endpoint(r);
            let j = ctx.endpoint(r.opposite());

            // augment through the T-blossom from j to base
            assert_eq!(ctx.blossom_base[bt], Some(t));
            if ctx.is_blossom(bt) {
                ctx.augment_blossom(bt, j);
            }
            ctx.mate[j] = Some(r);

            // the opposite endpoint goes to mate[s] in the next step
            p = r.opposite();
        }
    }
}
