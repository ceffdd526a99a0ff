//! Filtrations: a monotone, face-respecting ordering of a complex's cells by
//! weight, used to read off a combined boundary matrix or to serialize the
//! construction order to disk.
use crate::complex::Complex;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::simplex::Simplex;
use crate::vr::{Scale, Weights};

/// A single entry of a filtration: a cell together with the scale at which
/// it enters.
#[derive(Debug, Clone, PartialEq)]
pub struct FiltrationEntry {
    pub cell: Simplex,
    pub value: Scale,
}

/// How [`Filtration::steps`] groups cells for iteration: one step per
/// distinct filtration value, or a fixed number of uniformly-spaced steps
/// over the value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divisions {
    /// Emit one step per distinct filtration value.
    Infinite,
    /// Emit exactly `n` equal-width steps spanning `[min, max]`.
    Steps(usize),
}

/// One grouped step of a filtration's iteration: a filtration value together
/// with every `(dimension, index)` cell that falls at (or, under
/// [`Divisions::Steps`], within) that value.
#[derive(Debug, Clone, PartialEq)]
pub struct FiltrationStep {
    pub value: Scale,
    pub cells: Vec<(usize, usize)>,
}

/// A complex's cells in a fixed, monotone order: weight non-decreasing, and
/// every cell preceded by all of its faces.
#[derive(Debug, Clone, Default)]
pub struct Filtration {
    entries: Vec<FiltrationEntry>,
}

impl Filtration {
    /// Orders `complex`'s cells by `weights`, breaking ties by dimension
    /// (faces before cofaces) and then by insertion order within a
    /// dimension. Every cell of `complex` must have a recorded weight.
    pub fn new(complex: &Complex, weights: &Weights) -> Result<Self> {
        let mut entries = Vec::new();
        for d in 0..=complex.dim() {
            for cell in complex.cells(d) {
                let value = weights.get(cell).ok_or_else(|| {
                    Error::Domain(format!("cell {cell} has no recorded weight"))
                })?;
                entries.push((d, value, cell.clone()));
            }
        }
        entries.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        Ok(Filtration {
            entries: entries
                .into_iter()
                .map(|(_, value, cell)| FiltrationEntry { cell, value })
                .collect(),
        })
    }

    /// Orders `complex`'s cells by dimension alone (every weight `0`),
    /// preserving insertion order within each dimension. This is the
    /// unweighted filtration used when no scale information is available.
    pub fn new_unweighted(complex: &Complex) -> Self {
        let mut entries = Vec::new();
        for d in 0..=complex.dim() {
            for cell in complex.cells(d) {
                entries.push(FiltrationEntry {
                    cell: cell.clone(),
                    value: ordered_float::OrderedFloat(0.0),
                });
            }
        }
        Filtration { entries }
    }

    pub fn entries(&self) -> &[FiltrationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups this filtration's cells into steps, each a `(value, cells)`
    /// pair where `cells` are `(dimension, index-within-dimension)` pairs
    /// resolved against `complex`. With [`Divisions::Infinite`], one step is
    /// emitted per distinct filtration value. With [`Divisions::Steps(n)`],
    /// the value range `[min, max]` is split into `n` equal-width half-open
    /// intervals (the last one closed on the right), each step collecting
    /// every cell whose value falls in it.
    pub fn steps(&self, complex: &Complex, divisions: Divisions) -> Vec<FiltrationStep> {
        let resolve = |cell: &Simplex| {
            (
                cell.dim(),
                complex
                    .index_of(cell)
                    .expect("every filtered cell is a cell of its complex"),
            )
        };
        match divisions {
            Divisions::Infinite => {
                let mut steps: Vec<FiltrationStep> = Vec::new();
                for entry in &self.entries {
                    match steps.last_mut() {
                        Some(step) if step.value == entry.value => {
                            step.cells.push(resolve(&entry.cell));
                        }
                        _ => steps.push(FiltrationStep {
                            value: entry.value,
                            cells: vec![resolve(&entry.cell)],
                        }),
                    }
                }
                steps
            }
            Divisions::Steps(n) => {
                assert!(n > 0, "divisions must be positive");
                if self.entries.is_empty() {
                    return Vec::new();
                }
                let min = self.entries.first().unwrap().value.into_inner();
                let max = self.entries.last().unwrap().value.into_inner();
                let width = (max - min) / n as f64;
                let mut steps: Vec<FiltrationStep> = (0..n)
                    .map(|i| FiltrationStep {
                        value: if width == 0.0 {
                            self.entries[0].value
                        } else {
                            ordered_float::OrderedFloat(min + width * (i + 1) as f64)
                        },
                        cells: Vec::new(),
                    })
                    .collect();
                for entry in &self.entries {
                    let idx = if width == 0.0 {
                        0
                    } else {
                        (((entry.value.into_inner() - min) / width).floor() as usize).min(n - 1)
                    };
                    steps[idx].cells.push(resolve(&entry.cell));
                }
                steps.retain(|s| !s.cells.is_empty());
                steps
            }
        }
    }

    /// Inserts `cell` (and, if `recursive`, its absent faces) at `value`,
    /// splicing it into the correct filtration position rather than
    /// appending, so the result stays monotone. Returns every newly added
    /// cell, in filtration order.
    pub fn push(
        &mut self,
        complex: &mut Complex,
        cell: Simplex,
        value: Scale,
        recursive: bool,
    ) -> Result<Vec<Simplex>> {
        let added = complex.add(cell, recursive)?;
        for added_cell in &added {
            let position = self
                .entries
                .iter()
                .position(|e| {
                    e.value > value || (e.value == value && e.cell.dim() > added_cell.dim())
                })
                .unwrap_or(self.entries.len());
            self.entries.insert(
                position,
                FiltrationEntry {
                    cell: added_cell.clone(),
                    value,
                },
            );
        }
        Ok(added)
    }

    /// The combined boundary matrix over the whole filtration: column `j`
    /// (in filtration order) is the boundary of `entries()[j].cell`,
    /// expressed in the same filtration-order basis. If `reduced`, rows for
    /// dimension-0 cells (which have no boundary) are omitted.
    pub fn combined_boundary_matrix(&self, reduced: bool) -> Matrix {
        let n = self.entries.len();
        let index_of: std::collections::HashMap<&Simplex, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (&e.cell, i))
            .collect();

        let skip_dim0 = reduced;
        let rows: Vec<usize> = if skip_dim0 {
            self.entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.cell.dim() > 0)
                .map(|(i, _)| i)
                .collect()
        } else {
            (0..n).collect()
        };
        let row_of: std::collections::HashMap<usize, usize> =
            rows.iter().enumerate().map(|(r, &orig)| (orig, r)).collect();

        let mut columns = vec![vec![0i64; rows.len()]; n];
        for (j, entry) in self.entries.iter().enumerate() {
            for (face, coef) in crate::complex::boundary_chain(&entry.cell).simplify().terms() {
                let orig = *index_of
                    .get(face)
                    .expect("every face of a filtered cell is itself filtered");
                if let Some(&r) = row_of.get(&orig) {
                    columns[j][r] += coef;
                }
            }
        }
        Matrix::from_columns(rows.len(), columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vr::{vietoris_rips, Expansion};
    use ordered_float::OrderedFloat;

    fn triangle_with_weights() -> (Complex, Weights) {
        let mut m = crate::distance_matrix::DistanceMatrix::new(3);
        m.set(0, 1, OrderedFloat(1.0));
        m.set(1, 2, OrderedFloat(2.0));
        m.set(0, 2, OrderedFloat(3.0));
        vietoris_rips(&m, OrderedFloat(3.0), 2, Expansion::Inductive).unwrap()
    }

    #[test]
    fn filtration_is_monotone_and_face_respecting() {
        let (complex, weights) = triangle_with_weights();
        let f = Filtration::new(&complex, &weights).unwrap();
        for w in f.entries().windows(2) {
            assert!(w[0].value <= w[1].value);
        }
        for (i, entry) in f.entries().iter().enumerate() {
            for face in entry.cell.faces() {
                let face_pos = f.entries().iter().position(|e| e.cell == face).unwrap();
                assert!(face_pos < i);
            }
        }
    }

    #[test]
    fn push_splices_new_cells_into_position() {
        let (mut complex, weights) = triangle_with_weights();
        let mut f = Filtration::new(&complex, &weights).unwrap();
        let before = f.len();
        let added = f
            .push(&mut complex, Simplex::vertex(3), OrderedFloat(0.5), false)
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(f.len(), before + 1);
        for w in f.entries().windows(2) {
            assert!(w[0].value <= w[1].value);
        }
    }

    #[test]
    fn combined_boundary_matrix_matches_complex_boundary() {
        let (complex, weights) = triangle_with_weights();
        let f = Filtration::new(&complex, &weights).unwrap();
        let combined = f.combined_boundary_matrix(false);
        // The boundary of boundary is still zero in the combined matrix.
        assert!(combined.mul(&combined).is_zero());
    }

    /// spec.md S5: push four cells at four distinct values and read the
    /// filtration back out grouped by value.
    fn pushed_sample() -> (Complex, Filtration) {
        let mut complex = Complex::new();
        let mut f = Filtration::default();
        f.push(&mut complex, crate::simplex::Simplex::vertex(1), OrderedFloat(1.0), false)
            .unwrap();
        f.push(&mut complex, crate::simplex::Simplex::vertex(2), OrderedFloat(2.0), false)
            .unwrap();
        f.push(&mut complex, crate::simplex::Simplex::edge(1, 2), OrderedFloat(3.0), true)
            .unwrap();
        f.push(&mut complex, crate::simplex::Simplex::edge(1, 3), OrderedFloat(4.0), true)
            .unwrap();
        (complex, f)
    }

    #[test]
    fn divisions_infinite_groups_one_step_per_distinct_value() {
        let (complex, f) = pushed_sample();
        let steps = f.steps(&complex, Divisions::Infinite);
        let shape: Vec<(f64, Vec<(usize, usize)>)> = steps
            .iter()
            .map(|s| (s.value.into_inner(), s.cells.clone()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (1.0, vec![(0, 0)]),
                (2.0, vec![(0, 1)]),
                (3.0, vec![(1, 0)]),
                (4.0, vec![(0, 2), (1, 1)]),
            ]
        );
    }

    #[test]
    fn pushed_sample_has_five_cells_and_four_boundary_incidences() {
        let (_, f) = pushed_sample();
        assert_eq!(f.len(), 5);
        let combined = f.combined_boundary_matrix(false);
        let nonzero = (0..combined.rows())
            .flat_map(|i| (0..combined.cols()).map(move |j| (i, j)))
            .filter(|&(i, j)| combined[(i, j)] != 0)
            .count();
        assert_eq!(nonzero, 4);
    }

    #[test]
    fn pushed_sample_serializes_exactly_as_spec_shows() {
        let (_, f) = pushed_sample();
        let mut buf = Vec::new();
        crate::io::write_filtration(&mut buf, &f).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "1,1\n2,2\n1,2,3\n3,4\n1,3,4\n"
        );
    }
}
