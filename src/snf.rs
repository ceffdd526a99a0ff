//! Smith Normal Form: the external collaborator of component H. A default,
//! dependency-free integer solver is bundled; callers may substitute another
//! implementation either by registering it process-wide with [`set_snf`] or
//! by passing it explicitly to `homology_with_solver` (see [`crate::homology`]).
use std::sync::{Mutex, OnceLock};

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// The result of factoring `B` as `U * B * V = S`, with `S` diagonal and its
/// nonzero entries forming an ascending divisibility chain
/// `d_1 | d_2 | ... | d_r`.
#[derive(Debug, Clone)]
pub struct SnfResult {
    pub u: Matrix,
    pub s: Matrix,
    pub v: Matrix,
    pub u_inv: Matrix,
    pub v_inv: Matrix,
    /// `rank(B)`, i.e. the number of nonzero diagonal entries of `S`.
    pub rank: usize,
}

impl SnfResult {
    /// The invariant factors, in ascending divisibility order.
    pub fn invariant_factors(&self) -> Vec<i64> {
        (0..self.rank).map(|i| self.s[(i, i)]).collect()
    }
}

/// A pluggable Smith Normal Form solver.
pub type SnfSolverFn = fn(&Matrix) -> Result<SnfResult>;

static SNF_SLOT: OnceLock<Mutex<SnfSolverFn>> = OnceLock::new();

fn slot() -> &'static Mutex<SnfSolverFn> {
    SNF_SLOT.get_or_init(|| Mutex::new(smith_normal_form as SnfSolverFn))
}

/// Registers `solver` as the process-wide Smith Normal Form implementation
/// used by [`crate::homology::homology`]. Must not be called concurrently
/// with a `homology` call in another thread; this is enforced by a mutex,
/// but callers should still register solvers during initialization, per the
/// spec's concurrency model.
pub fn set_snf(solver: SnfSolverFn) {
    *slot().lock().unwrap() = solver;
}

/// The currently registered solver (the bundled default, unless [`set_snf`]
/// has been called).
pub fn current_snf() -> SnfSolverFn {
    *slot().lock().unwrap()
}

/// Applies a row operation `row_a += alpha * row_b` to `s` and `u`, keeping
/// `u_inv` consistent (`u * u_inv = I`).
fn row_add(s: &mut Matrix, u: &mut Matrix, u_inv: &mut Matrix, a: usize, b: usize, alpha: i64) {
    s.add_row_multiple(a, b, alpha);
    u.add_row_multiple(a, b, alpha);
    u_inv.add_col_multiple(b, a, -alpha);
}

fn row_swap(s: &mut Matrix, u: &mut Matrix, u_inv: &mut Matrix, a: usize, b: usize) {
    s.swap_rows(a, b);
    u.swap_rows(a, b);
    u_inv.swap_cols(a, b);
}

fn row_negate(s: &mut Matrix, u: &mut Matrix, u_inv: &mut Matrix, a: usize) {
    s.negate_row(a);
    u.negate_row(a);
    u_inv.negate_col(a);
}

fn col_add(s: &mut Matrix, v: &mut Matrix, v_inv: &mut Matrix, a: usize, b: usize, alpha: i64) {
    s.add_col_multiple(a, b, alpha);
    v.add_col_multiple(a, b, alpha);
    v_inv.add_row_multiple(b, a, -alpha);
}

fn col_swap(s: &mut Matrix, v: &mut Matrix, v_inv: &mut Matrix, a: usize, b: usize) {
    s.swap_cols(a, b);
    v.swap_cols(a, b);
    v_inv.swap_rows(a, b);
}

/// Reduces `s[(i, t)]` to zero using row `t` as pivot, via the Euclidean
/// algorithm expressed as elementary row operations.
fn clear_row_entry(
    s: &mut Matrix,
    u: &mut Matrix,
    u_inv: &mut Matrix,
    t: usize,
    i: usize,
) {
    loop {
        if s[(i, t)] == 0 {
            return;
        }
        if s[(t, t)] == 0 {
            row_swap(s, u, u_inv, t, i);
            return;
        }
        let q = s[(i, t)].div_euclid(s[(t, t)]);
        row_add(s, u, u_inv, i, t, -q);
        if s[(i, t)] == 0 {
            return;
        }
        row_swap(s, u, u_inv, t, i);
    }
}

fn clear_col_entry(
    s: &mut Matrix,
    v: &mut Matrix,
    v_inv: &mut Matrix,
    t: usize,
    j: usize,
) {
    loop {
        if s[(t, j)] == 0 {
            return;
        }
        if s[(t, t)] == 0 {
            col_swap(s, v, v_inv, t, j);
            return;
        }
        let q = s[(t, j)].div_euclid(s[(t, t)]);
        col_add(s, v, v_inv, j, t, -q);
        if s[(t, j)] == 0 {
            return;
        }
        col_swap(s, v, v_inv, t, j);
    }
}

/// The bundled default Smith Normal Form solver: elementary row/column
/// reduction via the Euclidean algorithm, with a divisibility-repair pass at
/// each pivot to guarantee the invariant-factor chain `d_1 | d_2 | ...`.
pub fn smith_normal_form(b: &Matrix) -> Result<SnfResult> {
    let (m, n) = (b.rows(), b.cols());
    let mut s = b.clone();
    let mut u = Matrix::identity(m);
    let mut u_inv = Matrix::identity(m);
    let mut v = Matrix::identity(n);
    let mut v_inv = Matrix::identity(n);

    let bound = m.min(n);
    let mut t = 0;
    while t < bound {
        // Find any nonzero entry in the remaining submatrix.
        let mut pivot = None;
        'search: for i in t..m {
            for j in t..n {
                if s[(i, j)] != 0 {
                    pivot = Some((i, j));
                    break 'search;
                }
            }
        }
        let (pi, pj) = match pivot {
            Some(p) => p,
            None => break,
        };
        row_swap(&mut s, &mut u, &mut u_inv, t, pi);
        col_swap(&mut s, &mut v, &mut v_inv, t, pj);

        loop {
            let mut iterations = 0usize;
            loop {
                let mut changed = false;
                for i in (t + 1)..m {
                    if s[(i, t)] != 0 {
                        clear_row_entry(&mut s, &mut u, &mut u_inv, t, i);
                        changed = true;
                    }
                }
                for j in (t + 1)..n {
                    if s[(t, j)] != 0 {
                        clear_col_entry(&mut s, &mut v, &mut v_inv, t, j);
                        changed = true;
                    }
                }
                iterations += 1;
                if !changed || iterations > m + n + 4 {
                    break;
                }
            }

            if s[(t, t)] == 0 {
                break;
            }

            let pivot_val = s[(t, t)];
            let mut violation = None;
            'check: for i in (t + 1)..m {
                for j in (t + 1)..n {
                    if s[(i, j)] % pivot_val != 0 {
                        violation = Some(i);
                        break 'check;
                    }
                }
            }
            match violation {
                None => break,
                Some(i) => {
                    row_add(&mut s, &mut u, &mut u_inv, t, i, 1);
                }
            }
        }

        if s[(t, t)] < 0 {
            row_negate(&mut s, &mut u, &mut u_inv, t);
        }
        t += 1;
    }

    let rank = (0..bound).filter(|&i| s[(i, i)] != 0).count();
    if (0..rank).any(|i| s[(i, i)] <= 0) {
        return Err(Error::Snf(
            "reduction did not yield a non-negative diagonal".to_string(),
        ));
    }

    Ok(SnfResult {
        u,
        s,
        v,
        u_inv,
        v_inv,
        rank,
    })
}
