//! Error types surfaced by this crate. No variant here is recovered from
//! silently; every fallible operation returns a [`Result`].
use thiserror::Error;

use crate::simplex::Simplex;

/// Errors produced by the simplicial complex, chain, VR/witness, filtration,
/// and homology APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A construction was rejected at the API boundary: duplicate vertices in
    /// a simplex, an out-of-range `nu`, a non-positive `max_out_dim`, or a
    /// non-positive scale.
    #[error("domain error: {0}")]
    Domain(String),

    /// `add(complex, simplex, recursive = false)` was called but a face of
    /// `simplex` is absent from the complex.
    #[error("face {missing_face:?} of {simplex:?} is not present and recursive=false")]
    FaceMissing {
        simplex: Simplex,
        missing_face: Simplex,
    },

    /// Two chains of different dimensions were combined.
    #[error("cannot combine a chain of dimension {lhs} with one of dimension {rhs}")]
    DimensionMismatch { lhs: usize, rhs: usize },

    /// An expansion method or landmark-selection method string did not match
    /// a known variant.
    #[error("invalid method: {0}")]
    InvalidMethod(String),

    /// The external Smith Normal Form solver failed to terminate or reported
    /// an overflow.
    #[error("Smith Normal Form solver failed: {0}")]
    Snf(String),
}

pub type Result<T> = std::result::Result<T, Error>;
