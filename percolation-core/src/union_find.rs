//! Weighted quick-union (disjoint set) over a fixed universe of elements.
//!
//! `find` resolves the root in one pass and repoints every node it visited in
//! a second, so repeated queries flatten the forest. `union` attaches the
//! smaller tree under the larger root, bounding tree height at O(log n) even
//! before compression kicks in.

use thiserror::Error;

/// Error raised when an element index falls outside the universe.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum UnionFindError {
    /// The element is not in `[0, len)`.
    #[error("element {index} is out of range for a universe of {len} elements")]
    OutOfRange {
        /// The offending element index.
        index: usize,
        /// Number of elements in the universe.
        len: usize,
    },
}

/// Disjoint-set forest partitioning the elements `0..len` into components.
///
/// # Examples
/// ```
/// use percolation_core::DisjointSet;
///
/// let mut set = DisjointSet::new(4);
/// assert_eq!(set.count(), 4);
///
/// set.union(0, 1)?;
/// set.union(1, 2)?;
/// assert!(set.connected(0, 2)?);
/// assert!(!set.connected(0, 3)?);
/// assert_eq!(set.count(), 2);
/// # Ok::<(), percolation_core::UnionFindError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl DisjointSet {
    /// Creates `len` singleton components, one per element.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
            count: len,
        }
    }

    /// Returns the number of elements in the universe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns whether the universe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of components remaining.
    ///
    /// Starts at `len` and decrements once per union that merges two
    /// previously distinct components.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the canonical representative of the component holding
    /// `element`.
    ///
    /// # Errors
    /// Returns [`UnionFindError::OutOfRange`] when `element >= len`.
    pub fn find(&mut self, element: usize) -> Result<usize, UnionFindError> {
        self.check(element)?;

        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = element;
        while self.parent[node] != node {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        Ok(root)
    }

    /// Merges the components holding `left` and `right`.
    ///
    /// Returns `true` when two distinct components were merged and `false`
    /// when the elements already shared one.
    ///
    /// # Errors
    /// Returns [`UnionFindError::OutOfRange`] when either element is outside
    /// the universe.
    pub fn union(&mut self, left: usize, right: usize) -> Result<bool, UnionFindError> {
        let mut left_root = self.find(left)?;
        let mut right_root = self.find(right)?;
        if left_root == right_root {
            return Ok(false);
        }

        if self.size[left_root] < self.size[right_root] {
            std::mem::swap(&mut left_root, &mut right_root);
        }
        self.parent[right_root] = left_root;
        self.size[left_root] += self.size[right_root];
        self.count -= 1;
        Ok(true)
    }

    /// Returns whether `left` and `right` share a component.
    ///
    /// # Errors
    /// Returns [`UnionFindError::OutOfRange`] when either element is outside
    /// the universe.
    pub fn connected(&mut self, left: usize, right: usize) -> Result<bool, UnionFindError> {
        Ok(self.find(left)? == self.find(right)?)
    }

    fn check(&self, element: usize) -> Result<(), UnionFindError> {
        if element < self.parent.len() {
            Ok(())
        } else {
            Err(UnionFindError::OutOfRange {
                index: element,
                len: self.parent.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn new_set_is_all_singletons() {
        let mut set = DisjointSet::new(5);
        assert_eq!(set.len(), 5);
        assert_eq!(set.count(), 5);
        for element in 0..5 {
            assert_eq!(set.find(element).expect("in range"), element);
        }
    }

    #[test]
    fn empty_universe_is_allowed() {
        let set = DisjointSet::new(0);
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn union_merges_and_counts() {
        let mut set = DisjointSet::new(5);
        assert!(set.union(0, 1).expect("in range"));
        assert!(set.connected(0, 1).expect("in range"));
        assert_eq!(set.count(), 4);
    }

    #[test]
    fn union_is_a_no_op_on_shared_component() {
        let mut set = DisjointSet::new(5);
        set.union(0, 1).expect("in range");
        assert!(!set.union(1, 0).expect("in range"));
        assert_eq!(set.count(), 4);
    }

    #[test]
    fn connectivity_is_transitive() {
        let mut set = DisjointSet::new(6);
        set.union(0, 1).expect("in range");
        set.union(1, 2).expect("in range");
        set.union(4, 5).expect("in range");
        assert!(set.connected(0, 2).expect("in range"));
        assert!(!set.connected(2, 4).expect("in range"));
    }

    #[rstest]
    #[case::past_the_end(5)]
    #[case::boundary(3)]
    fn find_rejects_out_of_range(#[case] element: usize) {
        let mut set = DisjointSet::new(3);
        let err = set.find(element).expect_err("index must be rejected");
        assert_eq!(err, UnionFindError::OutOfRange { index: element, len: 3 });
    }

    #[test]
    fn union_rejects_out_of_range_before_mutating() {
        let mut set = DisjointSet::new(3);
        set.union(0, 3).expect_err("right index must be rejected");
        set.union(3, 0).expect_err("left index must be rejected");
        assert_eq!(set.count(), 3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn count_tracks_successful_merges(
            len in 1_usize..24,
            ops in proptest::collection::vec((0_usize..24, 0_usize..24), 0..60),
        ) {
            let mut set = DisjointSet::new(len);
            let mut expected = len;
            for (left, right) in ops {
                if left < len && right < len {
                    if set.union(left, right).expect("in range") {
                        expected -= 1;
                    }
                } else {
                    prop_assert!(set.union(left, right).is_err());
                }
            }
            prop_assert_eq!(set.count(), expected);
        }

        #[test]
        fn connectivity_is_an_equivalence(
            len in 2_usize..16,
            ops in proptest::collection::vec((0_usize..16, 0_usize..16), 0..40),
        ) {
            let mut set = DisjointSet::new(len);
            for (left, right) in ops {
                if left < len && right < len {
                    set.union(left, right).expect("in range");
                }
            }
            for x in 0..len {
                prop_assert!(set.connected(x, x).expect("in range"));
                for y in 0..len {
                    let xy = set.connected(x, y).expect("in range");
                    prop_assert_eq!(xy, set.connected(y, x).expect("in range"));
                    for z in 0..len {
                        if xy && set.connected(y, z).expect("in range") {
                            prop_assert!(set.connected(x, z).expect("in range"));
                        }
                    }
                }
            }
        }
    }
}
