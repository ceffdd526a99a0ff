//! The simplicial complex: a collection of cells closed under the face
//! relation, plus the boundary operator.
use rustc_hash::FxHashMap;

use crate::chain::Chain;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::simplex::{Dimension, Simplex};

/// The boundary of a cell as a chain, independent of any particular complex:
/// for `d >= 1`, `sum_i (-1)^i * face_i(sigma)` using the "remove index 0
/// first" face order fixed by [`Simplex::faces`]; for `d = 0`, the zero
/// chain.
pub fn boundary_chain(simplex: &Simplex) -> Chain {
    if simplex.dim() == 0 {
        return Chain::zero();
    }
    let mut chain = Chain::zero();
    for (i, face) in simplex.faces().into_iter().enumerate() {
        let sign = if i % 2 == 0 { 1 } else { -1 };
        chain.push(sign, face).expect("faces share dimension d - 1");
    }
    chain
}

/// A finite simplicial complex: a dimension-indexed collection of cells
/// closed under the face relation. Cells are stored in insertion order
/// within each dimension; that order is the cell's index, used by
/// [`Complex::index_of`]/[`Complex::cell_at`] and by [`Complex::boundary_matrix`].
///
/// Indices here are zero-based, realizing the spec's "stable 1-based index"
/// invariant with a zero-based offset, as is idiomatic in Rust.
#[derive(Debug, Clone, Default)]
pub struct Complex {
    cells_by_dim: Vec<Vec<Simplex>>,
    index_of_dim: Vec<FxHashMap<Simplex, usize>>,
}

impl Complex {
    /// An empty complex.
    pub fn new() -> Self {
        Complex::default()
    }

    fn ensure_dim(&mut self, d: Dimension) {
        if self.cells_by_dim.len() <= d {
            self.cells_by_dim.resize(d + 1, Vec::new());
            self.index_of_dim.resize(d + 1, FxHashMap::default());
        }
    }

    /// The maximum dimension with at least one cell, or `0` for an empty
    /// complex.
    pub fn dim(&self) -> Dimension {
        self.cells_by_dim
            .iter()
            .rposition(|cells| !cells.is_empty())
            .unwrap_or(0)
    }

    /// The number of `d`-cells.
    pub fn size(&self, d: Dimension) -> usize {
        self.cells_by_dim.get(d).map_or(0, Vec::len)
    }

    /// Iterates the `d`-cells in index order.
    pub fn cells(&self, d: Dimension) -> impl Iterator<Item = &Simplex> {
        self.cells_by_dim.get(d).into_iter().flatten()
    }

    /// The (zero-based) index of `sigma` within its dimension, or `None` if
    /// absent.
    pub fn index_of(&self, sigma: &Simplex) -> Option<usize> {
        self.index_of_dim.get(sigma.dim())?.get(sigma).copied()
    }

    /// Whether `sigma` is already a cell of this complex.
    pub fn contains(&self, sigma: &Simplex) -> bool {
        self.index_of(sigma).is_some()
    }

    /// The inverse of [`Complex::index_of`]: the cell at index `i` of
    /// dimension `d`.
    pub fn cell_at(&self, d: Dimension, i: usize) -> Option<&Simplex> {
        self.cells_by_dim.get(d)?.get(i)
    }

    fn insert_raw(&mut self, sigma: Simplex) -> usize {
        let d = sigma.dim();
        self.ensure_dim(d);
        let idx = self.cells_by_dim[d].len();
        self.index_of_dim[d].insert(sigma.clone(), idx);
        self.cells_by_dim[d].push(sigma);
        idx
    }

    /// Inserts `sigma`. If `recursive`, every absent face of `sigma` is
    /// inserted first (depth-first, faces before `sigma`); otherwise, an
    /// absent face is a [`Error::FaceMissing`]. If `sigma` is already
    /// present, returns an empty vector without touching the complex.
    /// Returns every newly inserted cell, in insertion order.
    pub fn add(&mut self, sigma: Simplex, recursive: bool) -> Result<Vec<Simplex>> {
        if self.contains(&sigma) {
            return Ok(Vec::new());
        }

        let mut added = Vec::new();
        if sigma.dim() > 0 {
            for face in sigma.faces() {
                if self.contains(&face) {
                    continue;
                }
                if recursive {
                    added.extend(self.add(face, true)?);
                } else {
                    return Err(Error::FaceMissing {
                        simplex: sigma,
                        missing_face: face,
                    });
                }
            }
        }

        self.insert_raw(sigma.clone());
        added.push(sigma);
        Ok(added)
    }

    /// The boundary of `sigma`, as a chain over this complex's cells.
    pub fn boundary(&self, sigma: &Simplex) -> Chain {
        boundary_chain(sigma)
    }

    /// The `d`-th boundary matrix: `size(d-1) x size(d)`, entry `(i, j)` the
    /// coefficient of the `i`-th `(d-1)`-cell in the boundary of the `j`-th
    /// `d`-cell. `d = 0` yields the zero map into an empty row space.
    pub fn boundary_matrix(&self, d: Dimension) -> Matrix {
        let n = self.size(d);
        if d == 0 {
            return Matrix::zeros(0, n);
        }
        let m = self.size(d - 1);
        let mut columns = Vec::with_capacity(n);
        for cell in self.cells(d) {
            let mut col = vec![0i64; m];
            for (face, coef) in self.boundary(cell).simplify().terms() {
                let i = self
                    .index_of(face)
                    .expect("face closure guarantees every boundary face is present");
                col[i] += coef;
            }
            columns.push(col);
        }
        Matrix::from_columns(m, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Complex {
        let mut c = Complex::new();
        c.add(Simplex::new(vec![1, 2, 3]).unwrap(), true).unwrap();
        c
    }

    #[test]
    fn face_closure_holds() {
        let c = triangle();
        assert_eq!(c.size(0), 3);
        assert_eq!(c.size(1), 3);
        assert_eq!(c.size(2), 1);
        for edge in c.cells(1) {
            for face in edge.faces() {
                assert!(c.contains(&face));
            }
        }
    }

    #[test]
    fn non_recursive_add_requires_faces() {
        let mut c = Complex::new();
        let err = c.add(Simplex::new(vec![1, 2]).unwrap(), false).unwrap_err();
        assert!(matches!(err, Error::FaceMissing { .. }));

        c.add(Simplex::vertex(1), false).unwrap();
        c.add(Simplex::vertex(2), false).unwrap();
        c.add(Simplex::new(vec![1, 2]).unwrap(), false).unwrap();
        assert_eq!(c.size(1), 1);
    }

    #[test]
    fn re_adding_a_present_cell_is_a_no_op() {
        let mut c = triangle();
        let added = c.add(Simplex::new(vec![1, 2, 3]).unwrap(), true).unwrap();
        assert!(added.is_empty());
        assert_eq!(c.size(2), 1);
    }

    #[test]
    fn boundary_of_boundary_is_zero() {
        let c = triangle();
        let b1 = c.boundary_matrix(1);
        let b2 = c.boundary_matrix(2);
        let product = b1.mul(&b2);
        assert!(product.is_zero());
    }

    #[test]
    fn euler_characteristic_matches_alternating_cell_count() {
        let c = triangle();
        let mut euler = 0i64;
        for d in 0..=c.dim() {
            let sign = if d % 2 == 0 { 1 } else { -1 };
            euler += sign * c.size(d) as i64;
        }
        assert_eq!(euler, 1);
    }
}
