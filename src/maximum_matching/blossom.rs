use crate::maximum_matching::context::{wrap, Label, MatchingContext};
use crate::maximum_matching::endpoint::Endpoint;
use log::trace;
use num_traits::NumAssign;

// which way to walk around a blossom cycle from child index i to the base (index 0).
// odd start: go forward and wrap; even start: go backward.
// `backward` doubles as the endpoint trick: read endpoints[j - 1] ^ 1 instead of endpoints[j].
struct Walk {
    j: isize,
    step: isize,
    backward: bool,
}

impl Walk {
    fn new(i: usize, len: usize) -> Self {
        if i & 1 == 1 {
            Walk { j: i as isize - len as isize, step: 1, backward: false }
        } else {
            Walk { j: i as isize, step: -1, backward: true }
        }
    }

    // index into blossom_endpoints for the edge leaving the current child in walking direction
    #[inline]
    fn endpoint_index(&self) -> isize {
        if self.backward {
            self.j - 1
        } else {
            self.j
        }
    }
}

impl<Weight> MatchingContext<Weight>
where
    Weight: NumAssign + Ord + Copy,
{
    // Trace back from vertices v and w to discover either a new blossom or an augmenting path.
    // Returns the base vertex of the new blossom, or None for an augmenting path.
    pub fn scan_blossom(&mut self, v: usize, w: usize) -> Option<usize> {
        let mut path = Vec::new();
        let mut base = None;
        let (mut v, mut w) = (Some(v), Some(w));
        while let Some(u) = v {
            // look for a breadcrumb in u's blossom or put a new breadcrumb
            let b = self.in_blossom[u];
            if self.visited[b] {
                base = self.blossom_base[b];
                break;
            }
            assert_eq!(self.label[b], Label::S);
            path.push(b);
            self.visited[b] = true;

            // trace one step back
            assert!(self.label_end[b] == self.blossom_base[b].and_then(|base| self.mate[base]));
            v = match self.label_end[b] {
                // the base of b is single; stop tracing this path
                None => None,
                Some(p) => {
                    let bt = self.in_blossom[self.endpoint(p)];
                    assert_eq!(self.label[bt], Label::T);
                    // bt is a T-blossom; trace one more step back
                    let q = self.label_end[bt].expect("T-blossom has a label endpoint");
                    Some(self.endpoint(q))
                }
            };

            // alternate between both paths
            if w.is_some() {
                std::mem::swap(&mut v, &mut w);
            }
        }

        for b in path {
            self.visited[b] = false;
        }
        base
    }

    // Construct a new blossom with the given base, closed by edge k between two S-vertices.
    // The blossom is labeled S with a zero dual variable; its T-vertices become S-vertices.
    pub fn add_blossom(&mut self, base: usize, k: usize) {
        let (v, w) = self.edge(k);
        let bb = self.in_blossom[base];
        let mut bv = self.in_blossom[v];
        let mut bw = self.in_blossom[w];

        let b = self.unused_blossoms.pop().expect("at most n non-trivial blossoms exist at once");
        trace!("blossom {} base={} v={} w={}", b, base, v, w);
        self.blossom_base[b] = Some(base);
        self.blossom_parent[b] = None;
        self.blossom_parent[bb] = Some(b);

        let mut children = Vec::new();
        let mut endpoints = Vec::new();

        // trace back from v to base
        while bv != bb {
            self.blossom_parent[bv] = Some(b);
            children.push(bv);
            let p = self.label_end[bv].expect("sub-blossom on the cycle has a label endpoint");
            endpoints.push(p);
            assert!(self.label[bv] == Label::T || (self.label[bv] == Label::S && self.label_end[bv] == self.mate[self.blossom_base[bv].expect("labeled blossom has a base")]));
            bv = self.in_blossom[self.endpoint(p)];
        }

        // reverse lists, add the endpoint that connects the pair of S-vertices
        children.push(bb);
        children.reverse();
        endpoints.reverse();
        endpoints.push(Endpoint::new(k, 0));

        // trace back from w to base
        while bw != bb {
            self.blossom_parent[bw] = Some(b);
            children.push(bw);
            let p = self.label_end[bw].expect("sub-blossom on the cycle has a label endpoint");
            endpoints.push(p.opposite());
            assert!(self.label[bw] == Label::T || (self.label[bw] == Label::S && self.label_end[bw] == self.mate[self.blossom_base[bw].expect("labeled blossom has a base")]));
            bw = self.in_blossom[self.endpoint(p)];
        }

        self.blossom_children[b] = children;
        self.blossom_endpoints[b] = endpoints;

        assert_eq!(self.label[bb], Label::S);
        self.label[b] = Label::S;
        self.label_end[b] = self.label_end[bb];
        self.dual_var[b] = Weight::zero();

        // relabel vertices
        for v in self.blossom_leaves(b) {
            if self.label[self.in_blossom[v]] == Label::T {
                // this T-vertex turns into an S-vertex because it joins an S-blossom
                self.queue.push(v);
            }
            self.in_blossom[v] = b;
        }

        // least-slack edges to other S-blossoms, merged from the children
        let mut best_edge_to: Vec<Option<usize>> = vec![None; 2 * self.num_vertices];
        for bv in self.blossom_children[b].clone() {
            let candidates: Vec<usize> = match self.blossom_best_edges[bv].take() {
                Some(list) => list,
                // no cached list; get the information from the vertices
                None => self.blossom_leaves(bv).into_iter().flat_map(|v| self.csr.neighbors(v).iter().map(|p| p.edge())).collect(),
            };
            for k in candidates {
                let (mut i, mut j) = self.edge(k);
                if self.in_blossom[j] == b {
                    std::mem::swap(&mut i, &mut j);
                }
                let bj = self.in_blossom[j];
                if bj != b && self.label[bj] == Label::S && best_edge_to[bj].map_or(true, |best| self.slack(k) < self.slack(best)) {
                    best_edge_to[bj] = Some(k);
                }
            }
            // forget about least-slack edges of the sub-blossom
            self.best_edge[bv] = None;
        }

        let best_edges: Vec<usize> = best_edge_to.into_iter().flatten().collect();
        self.best_edge[b] = None;
        for &k in best_edges.iter() {
            if self.best_edge[b].map_or(true, |best| self.slack(k) < self.slack(best)) {
                self.best_edge[b] = Some(k);
            }
        }
        self.blossom_best_edges[b] = Some(best_edges);
    }

    // Expand the given top-level blossom.
    // At the end of a stage, sub-blossoms with zero dual are expanded as well.
    // During a stage, the expanding T-blossom hands its label down to its sub-blossoms.
    pub fn expand_blossom(&mut self, b: usize, end_stage: bool) {
        trace!("expand blossom {} end_stage={}", b, end_stage);
        // (blossom, next child) frames; blossoms are recycled in the same post-order a recursive expansion would use
        let mut stack = vec![(b, 0)];
        while let Some(frame) = stack.last_mut() {
            let (blossom, i) = *frame;
            if i < self.blossom_children[blossom].len() {
                frame.1 += 1;

                // convert sub-blossom s into a top-level blossom
                let s = self.blossom_children[blossom][i];
                self.blossom_parent[s] = None;
                if !self.is_blossom(s) {
                    self.in_blossom[s] = s;
                } else if end_stage && self.dual_var[s] == Weight::zero() {
                    stack.push((s, 0));
                } else {
                    for v in self.blossom_leaves(s) {
                        self.in_blossom[v] = s;
                    }
                }
                continue;
            }

            stack.pop();
            if blossom == b && !end_stage && self.label[b] == Label::T {
                self.relabel_expanded_t_blossom(b);
            }
            self.recycle_blossom(blossom);
        }
    }

    // The sub-blossoms of an expanding T-blossom must be relabeled: from the entry child to the
    // base they alternate T/S, the rest of the cycle is T only where reachable from outside.
    fn relabel_expanded_t_blossom(&mut self, b: usize) {
        let entry_end = self.label_end[b].expect("T-blossom has a label endpoint");
        let entry_child = self.in_blossom[self.endpoint(entry_end.opposite())];
        let len = self.blossom_children[b].len();
        let i = self.blossom_children[b].iter().position(|&c| c == entry_child).expect("entry child belongs to the blossom");
        let mut walk = Walk::new(i, len);

        // move along the blossom until we get to the base
        let mut p = entry_end;
        while walk.j != 0 {
            // relabel the T-sub-blossom
            let q = self.blossom_endpoints[b][wrap(len, walk.endpoint_index())];
            let entered = self.endpoint(p.opposite());
            self.label[entered] = Label::Free;
            let across = self.endpoint(q.flip_if(walk.backward).opposite());
            self.label[across] = Label::Free;
            self.assign_label(entered, Label::T, Some(p));

            // step to the next S-sub-blossom and note its forward endpoint
            self.allow_edge[q.edge()] = true;
            walk.j += walk.step;
            p = self.blossom_endpoints[b][wrap(len, walk.endpoint_index())].flip_if(walk.backward);

            // step to the next T-sub-blossom
            self.allow_edge[p.edge()] = true;
            walk.j += walk.step;
        }

        // relabel the base T-sub-blossom without stepping through to its mate
        let bv = self.blossom_children[b][wrap(len, walk.j)];
        let entered = self.endpoint(p.opposite());
        self.label[entered] = Label::T;
        self.label[bv] = Label::T;
        self.label_end[entered] = Some(p);
        self.label_end[bv] = Some(p);
        self.best_edge[bv] = None;

        // continue along the blossom until we get back to the entry child
        walk.j += walk.step;
        while self.blossom_children[b][wrap(len, walk.j)] != entry_child {
            let bv = self.blossom_children[b][wrap(len, walk.j)];
            walk.j += walk.step;

            // this sub-blossom just got label S through one of its neighbours
            if self.label[bv] == Label::S {
                continue;
            }

            // a vertex of the sub-blossom reachable from a neighbouring S-vertex outside makes it a T-sub-blossom
            let reached = self.blossom_leaves(bv).into_iter().find(|&v| self.label[v] != Label::Free);
            if let Some(v) = reached {
                assert_eq!(self.label[v], Label::T);
                assert_eq!(self.in_blossom[v], bv);
                self.label[v] = Label::Free;
                let base = self.blossom_base[bv].expect("sub-blossom has a base");
                let mate = self.mate[base].expect("base of a T-sub-blossom is matched");
                let base_mate = self.endpoint(mate);
                self.label[base_mate] = Label::Free;
                let label_end = self.label_end[v];
                self.assign_label(v, Label::T, label_end);
            }
        }
    }

    fn recycle_blossom(&mut self, b: usize) {
        self.label[b] = Label::Free;
        self.label_end[b] = None;
        self.blossom_children[b].clear();
        self.blossom_endpoints[b].clear();
        self.blossom_base[b] = None;
        self.best_edge[b] = None;
        self.blossom_best_edges[b] = None;
        self.unused_blossoms.push(b);
    }

    // Swap matched/unmatched edges over an alternating path through blossom b between vertex v and
    // the base vertex, then rotate b so that v becomes its base.
    // Sub-blossoms on the path touch disjoint vertex sets, so they are augmented from a work list.
    pub fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut pending = vec![(b, v)];
        while let Some((b, v)) = pending.pop() {
            // bubble up through the blossom tree from vertex v to an immediate sub-blossom of b
            let mut t = v;
            while self.blossom_parent[t] != Some(b) {
                t = self.blossom_parent[t].expect("v lies inside b");
            }
            if self.is_blossom(t) {
                pending.push((t, v));
            }

            let len = self.blossom_children[b].len();
            let i = self.blossom_children[b].iter().position(|&c| c == t).expect("t is a child of b");
            let mut walk = Walk::new(i, len);

            // move along the blossom until we get to the base
            while walk.j != 0 {
                // step to the next sub-blossom and augment it
                walk.j += walk.step;
                let t = self.blossom_children[b][wrap(len, walk.j)];
                let p = self.blossom_endpoints[b][wrap(len, walk.endpoint_index())].flip_if(walk.backward);
                if self.is_blossom(t) {
                    pending.push((t, self.endpoint(p)));
                }

                // step to the next sub-blossom and augment it
                walk.j += walk.step;
                let t = self.blossom_children[b][wrap(len, walk.j)];
                if self.is_blossom(t) {
                    pending.push((t, self.endpoint(p.opposite())));
                }

                // match the edge connecting those sub-blossoms
                let (x, y) = (self.endpoint(p), self.endpoint(p.opposite()));
                self.mate[x] = Some(p.opposite());
                self.mate[y] = Some(p);
            }

            // rotate the list of sub-blossoms to put the new base at the front
            self.blossom_children[b].rotate_left(i);
            self.blossom_endpoints[b].rotate_left(i);
            // v is also the new base of the first child once that child has been augmented
            self.blossom_base[b] = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_direction_depends_on_parity() {
        let odd = Walk::new(3, 5);
        assert_eq!((odd.j, odd.step, odd.backward), (-2, 1, false));
        assert_eq!(odd.endpoint_index(), -2);

        let even = Walk::new(2, 5);
        assert_eq!((even.j, even.step, even.backward), (2, -1, true));
        assert_eq!(even.endpoint_index(), 1);
    }
}
