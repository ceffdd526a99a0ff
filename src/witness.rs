//! The witness complex: a landmark-based stand-in for the Vietoris-Rips
//! complex, built from a subset of "landmark" points witnessed by the full
//! point set.
use rustc_hash::FxHashMap;

use crate::complex::Complex;
use crate::distance_matrix::DistanceMatrix;
use crate::error::{Error, Result};
use crate::simplex::{Simplex, Vertex};
use crate::vr::{Expansion, Scale, Weights};

/// How landmark points are chosen from the full point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkMethod {
    /// Uniformly at random, without replacement.
    Random,
    /// Greedily maximize the minimum distance to the landmarks chosen so
    /// far (the max-min / farthest-point-sampling heuristic).
    MinMax,
}

/// Picks `count` landmark indices (into `0..distances.len()`) from a
/// distance matrix over the full point set.
pub fn select_landmarks(
    distances: &DistanceMatrix<Scale>,
    count: usize,
    method: LandmarkMethod,
    rng: &mut impl rand::Rng,
) -> Result<Vec<Vertex>> {
    let n = distances.len();
    if count == 0 || count > n {
        return Err(Error::Domain(format!(
            "landmark count {count} must be in 1..={n}"
        )));
    }
    match method {
        LandmarkMethod::Random => {
            use rand::seq::SliceRandom;
            let mut all: Vec<Vertex> = (0..n).collect();
            all.shuffle(rng);
            all.truncate(count);
            all.sort_unstable();
            Ok(all)
        }
        LandmarkMethod::MinMax => {
            let mut chosen = vec![rng.gen_range(0..n)];
            let mut min_dist: Vec<f64> = (0..n)
                .map(|v| distances.get(chosen[0], v).into_inner())
                .collect();
            while chosen.len() < count {
                let next = (0..n)
                    .max_by(|&a, &b| min_dist[a].partial_cmp(&min_dist[b]).unwrap())
                    .unwrap();
                chosen.push(next);
                for v in 0..n {
                    let d = distances.get(next, v).into_inner();
                    if d < min_dist[v] {
                        min_dist[v] = d;
                    }
                }
            }
            chosen.sort_unstable();
            Ok(chosen)
        }
    }
}

/// The admission threshold `m_i`: `0` when `nu = 0`; otherwise the `nu`-th
/// smallest entry of witness `i`'s row of landmark distances (`nu = 1` is the
/// nearest landmark, `nu = 2` the second-nearest).
fn witness_threshold(witness_row: &[f64], nu: usize) -> f64 {
    if nu == 0 {
        return 0.0;
    }
    let mut sorted = witness_row.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    sorted[(nu - 1).min(sorted.len() - 1)]
}

/// Builds the witness complex over `landmarks` (indices into the full point
/// set), witnessed by every point of `full_distances`, at scale `epsilon`
/// with relaxation parameter `nu` (per De Silva-Carlsson, `nu ∈ {0, 1, 2}`).
///
/// A simplex `sigma` on landmark vertices is admitted at scale `epsilon` if
/// some witness `w` satisfies, for every vertex `i` of `sigma`,
/// `d(w, landmark_i) <= epsilon + m_nu(w)`, where `m_nu(w)` is `w`'s distance
/// to its `nu`-th nearest landmark (`0` when `nu = 0`). Its weight is the
/// minimum over witnesses of `max(d(w, a), d(w, b)) - m_nu(w)`, clamped at
/// `0`, and higher-dimensional weights take the max over their facets,
/// exactly as in [`crate::vr`].
pub fn witness_complex(
    full_distances: &DistanceMatrix<Scale>,
    landmarks: &[Vertex],
    epsilon: Scale,
    nu: usize,
    max_dim: usize,
    expansion: Expansion,
) -> Result<(Complex, Weights)> {
    if nu > 2 {
        return Err(Error::Domain(format!("nu must be in 0..=2, got {nu}")));
    }
    if max_dim == 0 {
        return Err(Error::Domain("max_dim must be at least 1".to_string()));
    }
    if epsilon <= ordered_float::OrderedFloat(0.0) {
        return Err(Error::Domain("epsilon must be positive".to_string()));
    }
    let l = landmarks.len();
    let n = full_distances.len();

    // witness_dist[w][i] = distance from witness w to landmark i.
    let witness_dist: Vec<Vec<f64>> = (0..n)
        .map(|w| {
            landmarks
                .iter()
                .map(|&li| full_distances.get(w, li).into_inner())
                .collect::<Vec<_>>()
        })
        .collect();
    let m_nu: Vec<f64> = witness_dist.iter().map(|row| witness_threshold(row, nu)).collect();

    // Edge (i, j) is admitted iff some witness w sees both within
    // epsilon + m_nu(w); its weight is the smallest such excess, clamped
    // at zero, so the usual VR admission test `weight <= epsilon` applies.
    let mut landmark_distances = DistanceMatrix::<Scale>::new(l);
    for i in 1..l {
        for j in 0..i {
            let mut best = f64::INFINITY;
            for w in 0..n {
                let needed = (witness_dist[w][i].max(witness_dist[w][j]) - m_nu[w]).max(0.0);
                if needed < best {
                    best = needed;
                }
            }
            landmark_distances.set(i, j, ordered_float::OrderedFloat(best));
        }
    }

    crate::vr::vietoris_rips(&landmark_distances, epsilon, max_dim, expansion)
        .map(|(c, w)| (relabel(&c, landmarks), relabel_weights(w, landmarks)))
}

fn relabel(c: &Complex, landmarks: &[Vertex]) -> Complex {
    let mut out = Complex::new();
    for d in 0..=c.dim() {
        for cell in c.cells(d) {
            let relabeled: Vec<Vertex> = cell.vertices().iter().map(|&i| landmarks[i]).collect();
            out.add(Simplex::new(relabeled).expect("landmark relabeling preserves distinctness"), true)
                .expect("faces were already in face-closed order");
        }
    }
    out
}

fn relabel_weights(w: Weights, landmarks: &[Vertex]) -> Weights {
    let mut map: FxHashMap<Simplex, Scale> = FxHashMap::default();
    for (sigma, scale) in w.into_iter() {
        let relabeled: Vec<Vertex> = sigma.vertices().iter().map(|&i| landmarks[i]).collect();
        map.insert(Simplex::new(relabeled).expect("landmark relabeling preserves distinctness"), scale);
    }
    Weights::from_map(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;
    use rand::SeedableRng;

    fn line_of_five() -> DistanceMatrix<Scale> {
        let mut m = DistanceMatrix::new(5);
        for i in 1..5 {
            for j in 0..i {
                m.set(i, j, OrderedFloat((i - j) as f64));
            }
        }
        m
    }

    #[test]
    fn landmark_selection_respects_count_and_bounds() {
        let distances = line_of_five();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let landmarks = select_landmarks(&distances, 3, LandmarkMethod::MinMax, &mut rng).unwrap();
        assert_eq!(landmarks.len(), 3);
        assert!(landmarks.iter().all(|&v| v < 5));

        let mut rng2 = rand::rngs::StdRng::seed_from_u64(7);
        let random_landmarks = select_landmarks(&distances, 3, LandmarkMethod::Random, &mut rng2).unwrap();
        assert_eq!(random_landmarks.len(), 3);
    }

    #[test]
    fn rejects_out_of_range_landmark_count() {
        let distances = line_of_five();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert!(select_landmarks(&distances, 0, LandmarkMethod::Random, &mut rng).is_err());
        assert!(select_landmarks(&distances, 6, LandmarkMethod::Random, &mut rng).is_err());
    }

    #[test]
    fn rejects_invalid_nu() {
        let distances = line_of_five();
        let landmarks = vec![0, 2, 4];
        assert!(matches!(
            witness_complex(&distances, &landmarks, OrderedFloat(3.0), 3, 2, Expansion::Inductive),
            Err(Error::Domain(_))
        ));
    }

    #[test]
    fn rejects_nonpositive_epsilon() {
        let distances = line_of_five();
        let landmarks = vec![0, 2, 4];
        assert!(matches!(
            witness_complex(&distances, &landmarks, OrderedFloat(0.0), 0, 1, Expansion::Inductive),
            Err(Error::Domain(_))
        ));
    }

    #[test]
    fn witness_complex_on_all_points_as_landmarks_is_connected() {
        let distances = line_of_five();
        let landmarks: Vec<Vertex> = (0..5).collect();
        let (c, _) =
            witness_complex(&distances, &landmarks, OrderedFloat(1.0), 0, 1, Expansion::Inductive)
                .unwrap();
        assert_eq!(c.size(0), 5);
        assert!(c.size(1) >= 4);
    }

    #[test]
    fn raising_epsilon_admits_more_edges() {
        let distances = line_of_five();
        let landmarks: Vec<Vertex> = (0..5).collect();
        let (small, _) =
            witness_complex(&distances, &landmarks, OrderedFloat(1.0), 0, 1, Expansion::Inductive)
                .unwrap();
        let (large, _) =
            witness_complex(&distances, &landmarks, OrderedFloat(4.0), 0, 1, Expansion::Inductive)
                .unwrap();
        assert!(large.size(1) >= small.size(1));
    }

    #[test]
    fn nu_relaxes_admission_without_shrinking_the_complex() {
        let distances = line_of_five();
        let landmarks: Vec<Vertex> = (0..5).collect();
        let (nu0, _) =
            witness_complex(&distances, &landmarks, OrderedFloat(1.0), 0, 1, Expansion::Inductive)
                .unwrap();
        let (nu1, _) =
            witness_complex(&distances, &landmarks, OrderedFloat(1.0), 1, 1, Expansion::Inductive)
                .unwrap();
        assert!(nu1.size(1) >= nu0.size(1));
    }
}
