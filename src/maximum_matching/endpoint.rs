// endpoints 2k and 2k+1 both belong to edge k.
// adjacency lists store remote endpoints, so both "which edge" and "which side" are O(1).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Endpoint(usize);

impl Endpoint {
    #[inline]
    pub fn new(edge: usize, side: usize) -> Self {
        debug_assert!(side < 2);
        Endpoint(2 * edge + side)
    }

    #[inline]
    pub fn edge(self) -> usize {
        self.0 / 2
    }

    #[inline]
    pub fn side(self) -> usize {
        self.0 & 1
    }

    #[inline]
    pub fn opposite(self) -> Self {
        Endpoint(self.0 ^ 1)
    }

    // p ^ 1 when flip is set, p otherwise
    #[inline]
    pub fn flip_if(self, flip: bool) -> Self {
        if flip {
            self.opposite()
        } else {
            self
        }
    }
}
