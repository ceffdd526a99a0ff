//! Vietoris-Rips construction: building a flag complex from a distance
//! matrix and a scale, by two different expansion strategies that produce
//! the same complex.
use std::str::FromStr;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::complex::Complex;
use crate::distance_matrix::DistanceMatrix;
use crate::error::{Error, Result};
use crate::simplex::{Simplex, Vertex};

/// The scale at which an edge, and transitively every higher simplex, enters
/// the complex.
pub type Scale = OrderedFloat<f64>;

/// A simplex's weight: the scale at which it first appears, defined as the
/// maximum weight among its facets (`0` for vertices).
#[derive(Debug, Clone, Default)]
pub struct Weights(FxHashMap<Simplex, Scale>);

impl Weights {
    pub fn get(&self, sigma: &Simplex) -> Option<Scale> {
        self.0.get(sigma).copied()
    }

    fn insert(&mut self, sigma: Simplex, w: Scale) {
        self.0.insert(sigma, w);
    }

    pub(crate) fn from_map(map: FxHashMap<Simplex, Scale>) -> Self {
        Weights(map)
    }

    pub(crate) fn into_iter(self) -> impl Iterator<Item = (Simplex, Scale)> {
        self.0.into_iter()
    }
}

/// Which expansion strategy builds the flag complex from the 1-skeleton.
/// Both produce the identical complex; they differ in how they traverse the
/// neighborhood structure to get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Depth-first: for each maximal simplex under construction, recurse
    /// into the intersection of its vertices' lower neighborhoods.
    Inductive,
    /// Vertex-at-a-time: extend every already-materialized lower-dimensional
    /// simplex whose vertex set lies in the new vertex's lower neighborhood.
    Incremental,
}

impl FromStr for Expansion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inductive" => Ok(Expansion::Inductive),
            "incremental" => Ok(Expansion::Incremental),
            other => Err(Error::InvalidMethod(other.to_string())),
        }
    }
}

fn lower_nbrs(distances: &DistanceMatrix<Scale>, epsilon: Scale, u: Vertex) -> Vec<Vertex> {
    (0..u)
        .filter(|&v| *distances.get(u, v) <= epsilon)
        .collect()
}

/// A cell's weight: `0` for a vertex, the metric distance for an edge, and
/// the max over `(d-1)`-faces' weights for `d >= 2`. Edges are the base
/// case actually carrying metric information; everything above them only
/// propagates it.
fn weight_of(distances: &DistanceMatrix<Scale>, weights: &Weights, sigma: &Simplex) -> Scale {
    match sigma.dim() {
        0 => OrderedFloat(0.0),
        1 => {
            let vs = sigma.vertices();
            *distances.get(vs[0], vs[1])
        }
        _ => sigma
            .faces()
            .iter()
            .map(|face| {
                weights
                    .get(face)
                    .unwrap_or_else(|| weight_of(distances, weights, face))
            })
            .max()
            .expect("a positive-dimension simplex has at least one face"),
    }
}

fn insert_with_weight(
    distances: &DistanceMatrix<Scale>,
    complex: &mut Complex,
    weights: &mut Weights,
    sigma: Simplex,
) -> Result<()> {
    if complex.contains(&sigma) {
        return Ok(());
    }
    let added = complex.add(sigma, true)?;
    for cell in added {
        if !weights.0.contains_key(&cell) {
            let cell_weight = weight_of(distances, weights, &cell);
            weights.insert(cell, cell_weight);
        }
    }
    Ok(())
}

fn add_cofaces_inductive(
    distances: &DistanceMatrix<Scale>,
    epsilon: Scale,
    max_dim: usize,
    tau: &Simplex,
    candidates: &[Vertex],
    complex: &mut Complex,
    weights: &mut Weights,
) -> Result<()> {
    insert_with_weight(distances, complex, weights, tau.clone())?;
    if tau.dim() >= max_dim {
        return Ok(());
    }
    for (i, &v) in candidates.iter().enumerate() {
        let sigma = tau.insert(v);
        let narrowed: Vec<Vertex> = candidates[..i]
            .iter()
            .copied()
            .filter(|&w| *distances.get(v, w) <= epsilon)
            .collect();
        add_cofaces_inductive(distances, epsilon, max_dim, &sigma, &narrowed, complex, weights)?;
    }
    Ok(())
}

fn expand_inductive(
    distances: &DistanceMatrix<Scale>,
    epsilon: Scale,
    max_dim: usize,
) -> Result<(Complex, Weights)> {
    let n = distances.len();
    let mut complex = Complex::new();
    let mut weights = Weights::default();
    for u in 0..n {
        let candidates = lower_nbrs(distances, epsilon, u);
        add_cofaces_inductive(
            distances,
            epsilon,
            max_dim,
            &Simplex::vertex(u),
            &candidates,
            &mut complex,
            &mut weights,
        )?;
    }
    Ok((complex, weights))
}

fn expand_incremental(
    distances: &DistanceMatrix<Scale>,
    epsilon: Scale,
    max_dim: usize,
) -> Result<(Complex, Weights)> {
    let n = distances.len();
    let mut complex = Complex::new();
    let mut weights = Weights::default();

    for u in 0..n {
        insert_with_weight(distances, &mut complex, &mut weights, Simplex::vertex(u))?;
        let lower: Vec<Vertex> = lower_nbrs(distances, epsilon, u);
        let lower_set: std::collections::HashSet<Vertex> = lower.iter().copied().collect();

        for d in 0..max_dim {
            if complex.size(d) == 0 {
                continue;
            }
            let candidates: Vec<Simplex> = complex
                .cells(d)
                .filter(|cell| {
                    !cell.vertices().contains(&u)
                        && cell.vertices().iter().all(|w| lower_set.contains(w))
                })
                .cloned()
                .collect();
            for cell in candidates {
                insert_with_weight(distances, &mut complex, &mut weights, cell.insert(u))?;
            }
        }
    }
    Ok((complex, weights))
}

/// Builds the Vietoris-Rips complex of `distances` at scale `epsilon`,
/// truncated to simplices of dimension at most `max_dim`, using the given
/// expansion strategy. Returns the complex together with each cell's weight
/// (the scale at which it enters the filtration).
///
/// `epsilon` must be positive and `max_dim` must be at least `1` (a
/// zero-dimensional cap would produce only the vertex set, which is not a
/// meaningful Rips complex).
pub fn vietoris_rips(
    distances: &DistanceMatrix<Scale>,
    epsilon: Scale,
    max_dim: usize,
    expansion: Expansion,
) -> Result<(Complex, Weights)> {
    if epsilon <= OrderedFloat(0.0) {
        return Err(Error::Domain("epsilon must be positive".to_string()));
    }
    if max_dim == 0 {
        return Err(Error::Domain("max_dim must be at least 1".to_string()));
    }
    match expansion {
        Expansion::Inductive => expand_inductive(distances, epsilon, max_dim),
        Expansion::Incremental => expand_incremental(distances, epsilon, max_dim),
    }
}
