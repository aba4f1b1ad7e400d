//! Site-percolation model over an n-by-n grid.
//!
//! Two disjoint-set instances back the queries. The percolation set holds
//! every site plus a virtual top and a virtual bottom node, so `percolates`
//! is a single connectivity probe between the two virtual nodes. The
//! fullness set holds every site plus the virtual top only: once the system
//! percolates, a bottom-row site with no open path to the top would read as
//! full through the virtual bottom shortcut (backwash), and omitting that
//! node from the fullness set removes the artifact.

use crate::{
    error::{PercolationError, Result},
    union_find::DisjointSet,
};

/// An n-by-n grid of sites that open monotonically, never closing again.
///
/// Coordinates on the public API are 1-indexed: `row` and `col` both run
/// from 1 at the top-left corner to `n`. Internally each site maps to the
/// flat index `(row - 1) * n + (col - 1)`.
///
/// # Examples
/// ```
/// use percolation_core::Percolation;
///
/// let mut model = Percolation::new(2)?;
/// model.open(1, 1)?;
/// model.open(2, 1)?;
/// assert!(model.percolates()?);
/// assert!(model.is_full(2, 1)?);
/// assert_eq!(model.number_of_open_sites(), 2);
/// # Ok::<(), percolation_core::PercolationError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Percolation {
    n: usize,
    open: Vec<bool>,
    open_sites: usize,
    percolation_set: DisjointSet,
    fullness_set: DisjointSet,
    virtual_top: usize,
    virtual_bottom: usize,
}

impl Percolation {
    /// Creates an n-by-n grid with every site blocked.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidGridSize`] when `n == 0` and
    /// [`PercolationError::GridTooLarge`] when the `n*n + 2` site universe
    /// would overflow `usize`.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(PercolationError::InvalidGridSize { got: n });
        }
        let sites = n
            .checked_mul(n)
            .and_then(|squared| squared.checked_add(2))
            .ok_or(PercolationError::GridTooLarge { got: n })?;

        Ok(Self {
            n,
            open: vec![false; sites - 2],
            open_sites: 0,
            percolation_set: DisjointSet::new(sites),
            fullness_set: DisjointSet::new(sites - 1),
            virtual_top: sites - 2,
            virtual_bottom: sites - 1,
        })
    }

    /// Returns the grid side length.
    #[must_use]
    pub const fn grid_size(&self) -> usize {
        self.n
    }

    /// Opens the site at (`row`, `col`) unless it is open already.
    ///
    /// A freshly opened site is linked to each already-open orthogonal
    /// neighbour, to the virtual top node when it sits on the first row, and
    /// (in the percolation set only) to the virtual bottom node when it sits
    /// on the last row. Reopening a site is a no-op.
    ///
    /// # Errors
    /// Returns [`PercolationError::SiteOutOfRange`] when either coordinate
    /// falls outside `[1, n]`; the grid is untouched in that case.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let site = self.site_index(row, col)?;
        if self.open[site] {
            return Ok(());
        }
        self.open[site] = true;
        self.open_sites += 1;

        let (grid_row, grid_col) = (row - 1, col - 1);
        if grid_row == 0 {
            self.link(site, self.virtual_top)?;
        }
        if grid_row == self.n - 1 {
            self.percolation_set.union(site, self.virtual_bottom)?;
        }
        for neighbour in self.open_neighbours(grid_row, grid_col).into_iter().flatten() {
            self.link(site, neighbour)?;
        }
        Ok(())
    }

    /// Returns whether the site at (`row`, `col`) has been opened.
    ///
    /// # Errors
    /// Returns [`PercolationError::SiteOutOfRange`] when either coordinate
    /// falls outside `[1, n]`.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let site = self.site_index(row, col)?;
        Ok(self.open[site])
    }

    /// Returns whether the site at (`row`, `col`) is connected to the top
    /// row through open sites.
    ///
    /// A blocked site is never full. The query runs against the fullness
    /// set, so bottom-row sites are not falsely reported full once the
    /// system percolates.
    ///
    /// # Errors
    /// Returns [`PercolationError::SiteOutOfRange`] when either coordinate
    /// falls outside `[1, n]`.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        let site = self.site_index(row, col)?;
        Ok(self.fullness_set.connected(site, self.virtual_top)?)
    }

    /// Returns the number of open sites. O(1).
    #[must_use]
    pub const fn number_of_open_sites(&self) -> usize {
        self.open_sites
    }

    /// Returns whether an open path connects the top row to the bottom row.
    ///
    /// For `n == 1` the single site is both top and bottom row, so the
    /// system percolates as soon as it is opened.
    ///
    /// # Errors
    /// Returns [`PercolationError::UnionFind`] only if the internal
    /// bookkeeping is inconsistent, which indicates a bug rather than a
    /// caller error.
    pub fn percolates(&mut self) -> Result<bool> {
        Ok(self
            .percolation_set
            .connected(self.virtual_top, self.virtual_bottom)?)
    }

    /// Unions `site` with `other` in both disjoint-set instances.
    fn link(&mut self, site: usize, other: usize) -> Result<()> {
        self.percolation_set.union(site, other)?;
        self.fullness_set.union(site, other)?;
        Ok(())
    }

    /// Validates a 1-indexed coordinate pair and returns the flat site index.
    fn site_index(&self, row: usize, col: usize) -> Result<usize> {
        if row == 0 || col == 0 || row > self.n || col > self.n {
            return Err(PercolationError::SiteOutOfRange { row, col, n: self.n });
        }
        Ok((row - 1) * self.n + (col - 1))
    }

    /// Flat indices of the in-bounds orthogonal neighbours of a 0-indexed
    /// cell that are already open.
    fn open_neighbours(&self, grid_row: usize, grid_col: usize) -> [Option<usize>; 4] {
        let up = (grid_row > 0).then(|| (grid_row - 1) * self.n + grid_col);
        let down = (grid_row + 1 < self.n).then(|| (grid_row + 1) * self.n + grid_col);
        let left = (grid_col > 0).then(|| grid_row * self.n + (grid_col - 1));
        let right = (grid_col + 1 < self.n).then(|| grid_row * self.n + (grid_col + 1));
        [up, down, left, right].map(|site| site.filter(|&index| self.open[index]))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;

    use proptest::prelude::*;

    fn coords(n: usize) -> impl Strategy<Value = (usize, usize)> {
        (1..=n, 1..=n)
    }

    proptest! {
        #[test]
        fn open_site_count_matches_distinct_opens(
            opens in proptest::collection::vec(coords(4), 1..40),
        ) {
            let mut model = Percolation::new(4).expect("grid size is valid");
            let mut distinct = std::collections::HashSet::new();
            for (row, col) in opens {
                model.open(row, col).expect("in range");
                distinct.insert((row, col));
                prop_assert_eq!(model.number_of_open_sites(), distinct.len());
            }
        }

        #[test]
        fn percolation_is_monotonic(
            opens in proptest::collection::vec(coords(4), 1..40),
        ) {
            let mut model = Percolation::new(4).expect("grid size is valid");
            let mut seen_percolating = false;
            for (row, col) in opens {
                model.open(row, col).expect("in range");
                let percolates = model.percolates().expect("probe must succeed");
                if seen_percolating {
                    prop_assert!(percolates);
                }
                seen_percolating = percolates;
            }
        }

        #[test]
        fn full_sites_are_open(
            opens in proptest::collection::vec(coords(3), 0..20),
        ) {
            let mut model = Percolation::new(3).expect("grid size is valid");
            for (row, col) in opens {
                model.open(row, col).expect("in range");
            }
            for row in 1..=3 {
                for col in 1..=3 {
                    if model.is_full(row, col).expect("in range") {
                        prop_assert!(model.is_open(row, col).expect("in range"));
                    }
                }
            }
        }
    }
}
