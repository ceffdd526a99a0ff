//! The homology engine: boundary-matrix assembly, Smith Normal Form
//! reduction, Betti numbers, torsion, and cycle generators.
use crate::chain::Chain;
use crate::complex::Complex;
use crate::matrix::Matrix;
use crate::snf::{current_snf, SnfResult, SnfSolverFn};
use crate::Result;

/// `H_k`'s free rank and torsion, without explicit generators. See
/// [`with_generators`] to additionally recover cycle representatives.
#[derive(Debug, Clone, PartialEq)]
pub struct HomologyGroup {
    pub dim: usize,
    /// The free rank (Betti number) of `H_k`.
    pub betti: usize,
    /// The torsion coefficients of `H_k` (invariant factors greater than 1),
    /// in ascending order.
    pub torsion: Vec<i64>,
}

/// A cycle representative of a homology class, plus its torsion order (`0`
/// for a free generator, `n > 1` for a generator of `Z/n` torsion).
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    pub chain: Chain,
    pub torsion_order: usize,
}

/// `H_k`'s free rank, torsion, and explicit generators.
#[derive(Debug, Clone, PartialEq)]
pub struct HomologyGroupWithGenerators {
    pub dim: usize,
    pub betti: usize,
    pub torsion: Vec<i64>,
    pub generators: Vec<Generator>,
}

/// The homology of every dimension `0..=dim(C)`, without generators.
/// Retains the per-dimension Smith Normal Form factorizations so that
/// [`with_generators`] can recover cycle representatives without
/// recomputing any boundary reduction.
#[derive(Debug, Clone)]
pub struct HomologyResult {
    complex: Complex,
    snf: Vec<SnfResult>,
    solver: SnfSolverFn,
    groups: Vec<HomologyGroup>,
}

impl HomologyResult {
    /// Ordered `(k, betti_k, torsion_k)` triples, for `k = 0, 1, ..., dim(C)`.
    pub fn groups(&self) -> &[HomologyGroup] {
        &self.groups
    }

    /// `[beta_0, beta_1, ...]`.
    pub fn betti(&self) -> Vec<i64> {
        self.groups.iter().map(|g| g.betti as i64).collect()
    }

    /// `sum_k (-1)^k beta_k`.
    pub fn euler(&self) -> i64 {
        self.groups
            .iter()
            .map(|g| if g.dim % 2 == 0 { g.betti as i64 } else { -(g.betti as i64) })
            .sum()
    }
}

/// The homology of every dimension, with explicit cycle generators.
#[derive(Debug, Clone, PartialEq)]
pub struct HomologyResultWithGenerators {
    pub groups: Vec<HomologyGroupWithGenerators>,
}

impl HomologyResultWithGenerators {
    pub fn betti(&self) -> Vec<i64> {
        self.groups.iter().map(|g| g.betti as i64).collect()
    }

    pub fn euler(&self) -> i64 {
        self.groups
            .iter()
            .map(|g| if g.dim % 2 == 0 { g.betti as i64 } else { -(g.betti as i64) })
            .sum()
    }
}

/// Computes the homology of `complex` using the currently registered
/// Smith Normal Form solver (see [`crate::snf::set_snf`]).
pub fn homology(complex: &Complex) -> Result<HomologyResult> {
    homology_with_solver(complex, current_snf())
}

/// Computes the homology of `complex` using `solver` directly, without
/// touching the process-wide registration slot.
pub fn homology_with_solver(complex: &Complex, solver: SnfSolverFn) -> Result<HomologyResult> {
    let max_dim = complex.dim();
    let mut snf = Vec::with_capacity(max_dim + 2);
    for d in 0..=max_dim + 1 {
        let b = complex.boundary_matrix(d);
        snf.push(solver(&b)?);
    }

    let mut groups = Vec::with_capacity(max_dim + 1);
    for k in 0..=max_dim {
        let n_k = complex.size(k);
        let r_k = snf[k].rank;
        let r_k1 = snf[k + 1].rank;
        let betti = (n_k as i64 - r_k as i64 - r_k1 as i64).max(0) as usize;
        let torsion: Vec<i64> = snf[k + 1]
            .invariant_factors()
            .into_iter()
            .filter(|&d| d > 1)
            .collect();
        groups.push(HomologyGroup { dim: k, betti, torsion });
    }

    Ok(HomologyResult {
        complex: complex.clone(),
        snf,
        solver,
        groups,
    })
}

/// Recovers explicit cycle generators for a previously computed
/// [`HomologyResult`], reusing its cached Smith Normal Form factorizations.
///
/// For each dimension `k`: the last `n_k - r_k` columns of `V_k` (the
/// boundary matrix's column transform) form a basis of `ker(d_k)`. Because
/// `V_k` is unimodular, re-expressing `B_{k+1}`'s rows in the `V_k` basis via
/// `V_k^{-1}` zeroes its first `r_k` rows exactly where the image of
/// `d_{k+1}` fails to land in the kernel's complement; the remaining
/// `n_k - r_k` rows describe `d_{k+1}` as a map into `ker(d_k)` alone. A
/// second Smith Normal Form of that restricted map aligns the kernel basis
/// with the image, so its diagonal directly separates free generators
/// (order `0`) from torsion generators (order `e_j > 1`), discarding
/// directions with `e_j = 1` (entirely absorbed into the image, hence
/// trivial in the quotient).
pub fn with_generators(result: HomologyResult) -> Result<HomologyResultWithGenerators> {
    let HomologyResult {
        complex,
        snf,
        solver,
        groups,
    } = result;

    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        let k = group.dim;
        let n_k = complex.size(k);
        let r_k = snf[k].rank;
        let dim_ker = n_k - r_k;

        if dim_ker == 0 {
            out.push(HomologyGroupWithGenerators {
                dim: k,
                betti: group.betti,
                torsion: group.torsion,
                generators: Vec::new(),
            });
            continue;
        }

        let kernel_basis = snf[k].v.columns_range(r_k, n_k);
        let b_k1 = complex.boundary_matrix(k + 1);
        let restricted_full = snf[k].v_inv.mul(&b_k1);
        let c = restricted_full.rows_range(r_k, n_k);

        let snf_c = solver(&c)?;
        let new_kernel_basis = kernel_basis.mul(&snf_c.u_inv);

        let mut generators = Vec::new();
        for j in 0..dim_ker {
            let coeffs = new_kernel_basis.column(j);
            let torsion_order = if j < snf_c.rank {
                snf_c.s[(j, j)]
            } else {
                0
            };
            if torsion_order == 1 {
                continue;
            }
            let mut chain = Chain::zero();
            for (i, &coef) in coeffs.iter().enumerate() {
                if coef != 0 {
                    chain
                        .push(coef, complex.cell_at(k, i).unwrap().clone())
                        .expect("all cells at dimension k share a dimension");
                }
            }
            generators.push(Generator {
                chain,
                torsion_order: torsion_order.max(0) as usize,
            });
        }

        out.push(HomologyGroupWithGenerators {
            dim: k,
            betti: group.betti,
            torsion: group.torsion,
            generators,
        });
    }

    Ok(HomologyResultWithGenerators { groups: out })
}

impl Matrix {
    fn columns_range(&self, start: usize, end: usize) -> Matrix {
        Matrix::from_columns(self.rows(), (start..end).map(|j| self.column(j)).collect())
    }

    fn rows_range(&self, start: usize, end: usize) -> Matrix {
        let rows: Vec<_> = (start..end).map(|i| self.row(i)).collect();
        let mut m = Matrix::zeros(rows.len(), self.cols());
        for (i, row) in rows.into_iter().enumerate() {
            for (j, v) in row.into_iter().enumerate() {
                m[(i, j)] = v;
            }
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplex::Simplex;

    fn triangle_boundary_only() -> Complex {
        // The three edges of a triangle, with no filling 2-cell: a circle.
        let mut c = Complex::new();
        c.add(Simplex::new(vec![1, 2]).unwrap(), true).unwrap();
        c.add(Simplex::new(vec![2, 3]).unwrap(), true).unwrap();
        c.add(Simplex::new(vec![1, 3]).unwrap(), true).unwrap();
        c
    }

    #[test]
    fn triangle_boundary_circle_has_betti_1_1() {
        let c = triangle_boundary_only();
        let h = homology(&c).unwrap();
        assert_eq!(h.betti(), vec![1, 1]);
        assert_eq!(h.euler(), 0);
    }

    #[test]
    fn filled_triangle_is_contractible() {
        let mut c = triangle_boundary_only();
        c.add(Simplex::new(vec![1, 2, 3]).unwrap(), true).unwrap();
        let h = homology(&c).unwrap();
        // dim(C) = 2, so betti() reports one entry per dimension up to 2;
        // the filled triangle has no 2-cycles, so beta_2 = 0.
        assert_eq!(h.betti(), vec![1, 0, 0]);
        assert_eq!(h.euler(), 1);
    }

    #[test]
    fn generators_recover_betti_counts() {
        let c = triangle_boundary_only();
        let h = homology(&c).unwrap();
        let betti_before = h.betti();
        let hg = with_generators(h).unwrap();
        for (group, expected_betti) in hg.groups.iter().zip(betti_before) {
            let free_count = group
                .generators
                .iter()
                .filter(|g| g.torsion_order == 0)
                .count();
            assert_eq!(free_count as i64, expected_betti);
        }
    }

    #[test]
    fn two_disjoint_points_have_two_components() {
        let mut c = Complex::new();
        c.add(Simplex::vertex(1), false).unwrap();
        c.add(Simplex::vertex(2), false).unwrap();
        let h = homology(&c).unwrap();
        assert_eq!(h.betti(), vec![2]);
    }
}
