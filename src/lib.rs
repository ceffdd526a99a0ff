//! Computational homology over finite simplicial complexes built from
//! point-cloud data: Vietoris-Rips and witness complex construction, an
//! optional filtration, and integer homology via Smith Normal Form.
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::needless_pass_by_value)]
#![allow(clippy::needless_range_loop)]

pub mod chain;
pub mod complex;
pub mod distance_matrix;
pub mod error;
pub mod filtration;
pub mod homology;
pub mod io;
pub mod matrix;
pub mod points;
pub mod simplex;
pub mod snf;
pub mod vr;
pub mod witness;

pub use chain::Chain;
pub use complex::Complex;
pub use distance_matrix::DistanceMatrix;
pub use error::{Error, Result};
pub use filtration::{Divisions, Filtration, FiltrationEntry, FiltrationStep};
pub use homology::{
    homology, homology_with_solver, with_generators, Generator, HomologyGroup,
    HomologyGroupWithGenerators, HomologyResult, HomologyResultWithGenerators,
};
pub use io::{read_filtration, write_boundary_matrix, write_filtration};
pub use matrix::Matrix;
pub use points::{Point, PointCloud};
pub use simplex::{Dimension, Simplex, Vertex};
pub use snf::{current_snf, set_snf, smith_normal_form, SnfResult, SnfSolverFn};
pub use vr::{vietoris_rips, Expansion, Scale, Weights};
pub use witness::{select_landmarks, witness_complex, LandmarkMethod};
