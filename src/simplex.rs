//! Cells: the immutable combinatorial atom of a simplicial complex.
use sorted_iter::SortedIterator;

use crate::error::{Error, Result};

/// A vertex label. The spec treats these as elements of a totally-ordered
/// type; a non-negative integer is the typical instantiation.
pub type Vertex = usize;

/// The dimension of a cell: one less than its number of vertices.
pub type Dimension = usize;

/// A `d`-simplex: an ordered sequence of `d + 1` distinct vertex labels,
/// always stored in ascending order. Equality, hashing, and ordering are by
/// this sorted vertex tuple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Simplex {
    vertices: Vec<Vertex>,
}

impl Simplex {
    /// Constructs a simplex from a vertex list, sorting it and rejecting
    /// duplicates.
    pub fn new(mut vertices: Vec<Vertex>) -> Result<Self> {
        vertices.sort_unstable();
        if vertices.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::Domain(format!(
                "duplicate vertex in simplex {vertices:?}"
            )));
        }
        Ok(Simplex { vertices })
    }

    /// Constructs a simplex from an iterator known to already produce
    /// strictly ascending vertices, skipping the sort step.
    pub fn from_sorted_iter<I: SortedIterator<Item = Vertex>>(iter: I) -> Self {
        Simplex {
            vertices: iter.collect(),
        }
    }

    /// A single vertex, as a 0-simplex.
    pub fn vertex(v: Vertex) -> Self {
        Simplex { vertices: vec![v] }
    }

    /// An edge `{u, v}`, as a 1-simplex. Panics if `u == v`.
    pub fn edge(u: Vertex, v: Vertex) -> Self {
        assert_ne!(u, v, "an edge cannot be a self-loop");
        Simplex::new(vec![u, v]).expect("two distinct vertices cannot be a duplicate")
    }

    /// `dim(sigma) = len(vertices(sigma)) - 1`.
    pub fn dim(&self) -> Dimension {
        self.vertices.len() - 1
    }

    /// The sorted vertex tuple.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The `d + 1` faces of this `d`-cell, obtained by omitting one vertex at
    /// a time. Order is "remove index 0 first", i.e. `faces()[i]` omits the
    /// vertex at position `i` in `vertices()`. A 0-cell has no faces.
    /// This order fixes the alternating-sign convention used by the
    /// boundary operator.
    pub fn faces(&self) -> Vec<Simplex> {
        if self.dim() == 0 {
            return Vec::new();
        }
        (0..self.vertices.len())
            .map(|skip| {
                let vertices = self
                    .vertices
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &v)| v)
                    .collect::<Vec<_>>();
                Simplex { vertices }
            })
            .collect()
    }

    /// The face obtained by removing the vertex at sorted position `i`.
    pub fn face(&self, i: usize) -> Simplex {
        let vertices = self
            .vertices
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, &v)| v)
            .collect();
        Simplex { vertices }
    }

    /// The simplex obtained by inserting `v` (which must not already be a
    /// vertex of this simplex).
    pub fn insert(&self, v: Vertex) -> Simplex {
        let mut vertices = self.vertices.clone();
        vertices.push(v);
        vertices.sort_unstable();
        Simplex { vertices }
    }
}

impl std::fmt::Display for Simplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i != 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

impl From<Vec<Vertex>> for Simplex {
    /// Panics on a duplicate vertex; prefer [`Simplex::new`] when the input
    /// is not known to be valid.
    fn from(vertices: Vec<Vertex>) -> Self {
        Simplex::new(vertices).expect("duplicate vertex in simplex literal")
    }
}
