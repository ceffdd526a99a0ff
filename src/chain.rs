//! Chains: formal linear combinations of same-dimension cells over an
//! integer coefficient ring.
use crate::error::{Error, Result};
use crate::simplex::Simplex;

/// A finite formal sum of cells of a single dimension, with integer
/// coefficients. The spec's coefficient ring is the integers; `i64` is used
/// throughout rather than an arbitrary-precision type, matching the scale of
/// complexes this crate targets.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    dim: Option<usize>,
    terms: Vec<(Simplex, i64)>,
}

impl Chain {
    /// The zero chain (no fixed dimension yet).
    pub fn zero() -> Self {
        Chain {
            dim: None,
            terms: Vec::new(),
        }
    }

    /// A single-term chain `coef * cell`.
    pub fn term(coef: i64, cell: Simplex) -> Self {
        let dim = cell.dim();
        if coef == 0 {
            return Chain::zero();
        }
        Chain {
            dim: Some(dim),
            terms: vec![(cell, coef)],
        }
    }

    /// Appends a `(coefficient, cell)` term to this chain, checking the
    /// dimension is consistent with any existing terms.
    pub fn push(&mut self, coef: i64, cell: Simplex) -> Result<()> {
        if coef == 0 {
            return Ok(());
        }
        match self.dim {
            None => self.dim = Some(cell.dim()),
            Some(d) if d != cell.dim() => {
                return Err(Error::DimensionMismatch {
                    lhs: d,
                    rhs: cell.dim(),
                })
            }
            _ => {}
        }
        self.terms.push((cell, coef));
        Ok(())
    }

    /// The dimension of this chain's cells, if it has any terms.
    pub fn dimension(&self) -> Option<usize> {
        self.dim
    }

    /// The terms of this chain, in whatever order they were accumulated.
    /// Call [`Chain::simplify`] first for a canonical, deduplicated view.
    pub fn terms(&self) -> &[(Simplex, i64)] {
        &self.terms
    }

    pub fn is_zero(&self) -> bool {
        self.simplify().terms.is_empty()
    }

    /// Returns the canonical form: terms merged by cell (coefficients
    /// summed), zero-coefficient terms dropped, and the remainder sorted by
    /// cell order. Idempotent: `simplify(simplify(c)) = simplify(c)`.
    #[must_use]
    pub fn simplify(&self) -> Chain {
        let mut merged: Vec<(Simplex, i64)> = self.terms.clone();
        merged.sort_by(|a, b| a.0.cmp(&b.0));

        let mut result: Vec<(Simplex, i64)> = Vec::with_capacity(merged.len());
        for (cell, coef) in merged {
            if let Some(last) = result.last_mut() {
                if last.0 == cell {
                    last.1 += coef;
                    continue;
                }
            }
            result.push((cell, coef));
        }
        result.retain(|(_, coef)| *coef != 0);

        Chain {
            dim: if result.is_empty() { None } else { self.dim },
            terms: result,
        }
    }

    /// Adds two chains, checking they share a dimension (unless one is the
    /// zero chain with no terms).
    pub fn add(&self, other: &Chain) -> Result<Chain> {
        if let (Some(a), Some(b)) = (self.dim, other.dim) {
            if a != b {
                return Err(Error::DimensionMismatch { lhs: a, rhs: b });
            }
        }
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Ok(Chain {
            dim: self.dim.or(other.dim),
            terms,
        }
        .simplify())
    }

    /// Scales every coefficient by `alpha`.
    #[must_use]
    pub fn scale(&self, alpha: i64) -> Chain {
        if alpha == 0 {
            return Chain::zero();
        }
        Chain {
            dim: self.dim,
            terms: self
                .terms
                .iter()
                .map(|(c, coef)| (c.clone(), coef * alpha))
                .collect(),
        }
        .simplify()
    }

    /// The negation of this chain.
    #[must_use]
    pub fn neg(&self) -> Chain {
        self.scale(-1)
    }
}

impl std::ops::Add for &Chain {
    type Output = Chain;
    fn add(self, rhs: &Chain) -> Chain {
        Chain::add(self, rhs).expect("mismatched chain dimensions")
    }
}

impl std::ops::Neg for &Chain {
    type Output = Chain;
    fn neg(self) -> Chain {
        Chain::neg(self)
    }
}

impl std::ops::Mul<i64> for &Chain {
    type Output = Chain;
    fn mul(self, rhs: i64) -> Chain {
        Chain::scale(self, rhs)
    }
}

/// Structural equality after simplification, as spec.md §4.B requires.
impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        let a = self.simplify();
        let b = other.simplify();
        a.terms == b.terms
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let simplified = self.simplify();
        if simplified.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (cell, coef)) in simplified.terms.iter().enumerate() {
            if i != 0 {
                write!(f, " + ")?;
            }
            write!(f, "{coef}*{cell}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_merges_and_drops_zero_terms() {
        let a = Simplex::vertex(1);
        let mut c = Chain::zero();
        c.push(1, a.clone()).unwrap();
        c.push(-1, a.clone()).unwrap();
        c.push(2, Simplex::vertex(2)).unwrap();
        let s = c.simplify();
        assert_eq!(s.terms(), &[(Simplex::vertex(2), 2)]);
    }

    #[test]
    fn simplify_is_idempotent() {
        let mut c = Chain::zero();
        c.push(1, Simplex::vertex(1)).unwrap();
        c.push(1, Simplex::vertex(1)).unwrap();
        let once = c.simplify();
        let twice = once.simplify();
        assert_eq!(once.terms(), twice.terms());
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let mut c = Chain::zero();
        c.push(1, Simplex::vertex(1)).unwrap();
        let err = c.push(1, Simplex::edge(1, 2)).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn equality_is_structural_after_simplify() {
        let mut c1 = Chain::zero();
        c1.push(1, Simplex::vertex(1)).unwrap();
        c1.push(1, Simplex::vertex(2)).unwrap();

        let mut c2 = Chain::zero();
        c2.push(1, Simplex::vertex(2)).unwrap();
        c2.push(1, Simplex::vertex(1)).unwrap();

        assert_eq!(c1, c2);
    }
}
