// Independent checks of the primal-dual state; only meaningful for integer weights.
use crate::maximum_matching::context::{two, Label, MatchingContext};
use num_traits::NumAssign;
use std::fmt::Debug;
use std::ops::Neg;

// top-level blossom first, vertex v last
fn enclosing_blossoms<Weight>(ctx: &MatchingContext<Weight>, v: usize) -> Vec<usize> {
    let mut chain = vec![v];
    while let Some(parent) = ctx.blossom_parent[chain[chain.len() - 1]] {
        chain.push(parent);
    }
    chain.reverse();
    chain
}

// Verify that the optimum solution has been reached.
pub(crate) fn verify_optimum<Weight>(ctx: &MatchingContext<Weight>, max_cardinality: bool)
where
    Weight: NumAssign + Neg<Output = Weight> + Ord + Copy,
{
    let n = ctx.num_vertices;
    let zero = Weight::zero();
    let min_vertex_dual = ctx.dual_var[..n].iter().copied().min().unwrap_or(zero);
    // vertices may have negative dual under max cardinality; shift them all by a constant
    let vertex_dual_offset = if max_cardinality { (-min_vertex_dual).max(zero) } else { zero };

    // all dual variables are non-negative
    assert!(min_vertex_dual + vertex_dual_offset >= zero);
    assert!(ctx.dual_var[n..].iter().all(|&z| z >= zero));

    // all edges have non-negative slack and all matched edges have zero slack
    for k in 0..ctx.csr.num_edges {
        let (i, j) = ctx.edge(k);
        let mut s = ctx.slack(k);
        for (bi, bj) in enclosing_blossoms(ctx, i).into_iter().zip(enclosing_blossoms(ctx, j)) {
            if bi != bj {
                break;
            }
            s += two::<Weight>() * ctx.dual_var[bi];
        }
        assert!(s >= zero);
        let i_matched = ctx.mate[i].map(|p| p.edge()) == Some(k);
        let j_matched = ctx.mate[j].map(|p| p.edge()) == Some(k);
        if i_matched || j_matched {
            assert!(i_matched && j_matched);
            assert!(s == zero);
        }
    }

    // all single vertices have zero dual value
    for v in 0..n {
        assert!(ctx.mate[v].is_some() || ctx.dual_var[v] + vertex_dual_offset == zero);
    }

    // all blossoms with positive dual value are full
    for b in n..2 * n {
        if ctx.blossom_base[b].is_some() && ctx.dual_var[b] > zero {
            let endpoints = &ctx.blossom_endpoints[b];
            assert!(endpoints.len() % 2 == 1);
            for &p in endpoints.iter().skip(1).step_by(2) {
                assert!(ctx.mate[ctx.endpoint(p)] == Some(p.opposite()));
                assert!(ctx.mate[ctx.endpoint(p.opposite())] == Some(p));
            }
        }
    }
}

// Check the cached delta2 edges against a trivial computation.
pub(crate) fn check_delta2<Weight>(ctx: &MatchingContext<Weight>)
where
    Weight: NumAssign + Ord + Copy + Debug,
{
    for v in 0..ctx.num_vertices {
        if ctx.top_level_label(v) != Label::Free {
            continue;
        }
        let mut best: Option<Weight> = None;
        for &p in ctx.csr.neighbors(v) {
            if ctx.top_level_label(ctx.endpoint(p)) == Label::S {
                let d = ctx.slack(p.edge());
                if best.map_or(true, |bd| d < bd) {
                    best = Some(d);
                }
            }
        }
        assert_eq!(best, ctx.best_edge[v].map(|k| ctx.slack(k)));
    }
}

// Check the cached delta3 edges against a trivial computation.
pub(crate) fn check_delta3<Weight>(ctx: &MatchingContext<Weight>)
where
    Weight: NumAssign + Ord + Copy + Debug,
{
    let mut best: Option<Weight> = None;
    let mut cached_best: Option<Weight> = None;
    for b in 0..2 * ctx.num_vertices {
        if ctx.blossom_parent[b].is_some() || ctx.label[b] != Label::S {
            continue;
        }
        for v in ctx.blossom_leaves(b) {
            for &p in ctx.csr.neighbors(v) {
                let w = ctx.endpoint(p);
                if ctx.in_blossom[w] != b && ctx.top_level_label(w) == Label::S {
                    let d = ctx.slack(p.edge());
                    if best.map_or(true, |bd| d < bd) {
                        best = Some(d);
                    }
                }
            }
        }
        if let Some(k) = ctx.best_edge[b] {
            let (i, j) = ctx.edge(k);
            assert!(ctx.in_blossom[i] == b || ctx.in_blossom[j] == b);
            assert!(ctx.in_blossom[i] != b || ctx.in_blossom[j] != b);
            assert!(ctx.top_level_label(i) == Label::S && ctx.top_level_label(j) == Label::S);
            let d = ctx.slack(k);
            if cached_best.map_or(true, |bd| d < bd) {
                cached_best = Some(d);
            }
        }
    }
    assert_eq!(best, cached_best);
}
