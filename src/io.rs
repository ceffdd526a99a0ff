//! On-disk text formats: a filtration serialization (one cell per line,
//! comma-separated vertices and a value) and a boundary-matrix dump (one
//! column per line, as a face count followed by row indices).
use std::io::{self, BufRead, Write};

use ordered_float::OrderedFloat;

use crate::complex::Complex;
use crate::error::{Error, Result};
use crate::filtration::Filtration;
use crate::matrix::Matrix;
use crate::simplex::Simplex;

fn io_err(e: &io::Error) -> Error {
    Error::Domain(format!("I/O error: {e}"))
}

/// Writes a filtration as one comma-separated line per cell: its sorted
/// vertex labels followed by its filtration value, e.g. `1,2,3,0.5` for the
/// simplex `{1,2,3}` entering at value `0.5`.
pub fn write_filtration<W: Write>(mut w: W, filtration: &Filtration) -> Result<()> {
    for entry in filtration.entries() {
        let verts: Vec<String> = entry.cell.vertices().iter().map(|v| v.to_string()).collect();
        writeln!(w, "{},{}", verts.join(","), entry.value.into_inner()).map_err(|e| io_err(&e))?;
    }
    Ok(())
}

/// Reads a filtration previously written by [`write_filtration`], rebuilding
/// both the underlying complex and the filtration order by `push`ing each
/// line's cell in file order with `recursive=false`. Lines must already be
/// pre-closed under faces. Round-trips: writing the result and reading it
/// back produces the same sequence of `(cell, value)` pairs.
pub fn read_filtration<R: BufRead>(r: R) -> Result<(Complex, Filtration)> {
    let mut complex = Complex::new();
    let mut filtration = Filtration::default();
    for line in r.lines() {
        let line = line.map_err(|e| io_err(&e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (verts_part, value_part) = line
            .rsplit_once(',')
            .ok_or_else(|| Error::Domain(format!("malformed filtration line: {line:?}")))?;
        let vertices: Vec<usize> = verts_part
            .split(',')
            .map(|s| {
                s.trim()
                    .parse::<usize>()
                    .map_err(|_| Error::Domain(format!("bad vertex in {line:?}")))
            })
            .collect::<Result<_>>()?;
        let value: f64 = value_part
            .trim()
            .parse()
            .map_err(|_| Error::Domain(format!("bad value in {line:?}")))?;
        let cell = Simplex::new(vertices)?;
        filtration.push(&mut complex, cell, OrderedFloat(value), false)?;
    }
    Ok((complex, filtration))
}

/// Dumps a boundary matrix, one column per line, as `k i0 i1 ... ik` (`k`
/// boundary entries followed by their row indices); an empty column is
/// written as a single `0`. Indices are `one_indexed ? 1-based : 0-based`.
pub fn write_boundary_matrix<W: Write>(mut w: W, matrix: &Matrix, one_indexed: bool) -> Result<()> {
    let offset = if one_indexed { 1 } else { 0 };
    for j in 0..matrix.cols() {
        let column = matrix.column(j);
        let rows: Vec<usize> = column
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(|(i, _)| i + offset)
            .collect();
        if rows.is_empty() {
            writeln!(w, "0").map_err(|e| io_err(&e))?;
        } else {
            let parts: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
            writeln!(w, "{} {}", rows.len(), parts.join(" ")).map_err(|e| io_err(&e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vr::{vietoris_rips, Expansion, Scale};
    use ordered_float::OrderedFloat as OF;

    fn sample_filtration() -> Filtration {
        let mut m = crate::distance_matrix::DistanceMatrix::<Scale>::new(3);
        m.set(0, 1, OF(1.0));
        m.set(1, 2, OF(2.0));
        m.set(0, 2, OF(3.0));
        let (complex, weights) = vietoris_rips(&m, OF(3.0), 2, Expansion::Inductive).unwrap();
        Filtration::new(&complex, &weights).unwrap()
    }

    #[test]
    fn filtration_round_trips_through_text() {
        let f = sample_filtration();
        let mut buf = Vec::new();
        write_filtration(&mut buf, &f).unwrap();
        let (_, read_back) = read_filtration(buf.as_slice()).unwrap();
        assert_eq!(read_back.entries().len(), f.entries().len());
        for (a, b) in f.entries().iter().zip(read_back.entries()) {
            assert_eq!(a.cell, b.cell);
            assert_eq!(a.value, b.value);
        }
    }

    #[test]
    fn boundary_matrix_dump_marks_empty_columns_with_zero() {
        let f = sample_filtration();
        let combined = f.combined_boundary_matrix(false);
        let mut buf = Vec::new();
        write_boundary_matrix(&mut buf, &combined, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), combined.cols());
        // Every 0-cell column has no boundary.
        for entry_idx in 0..3 {
            assert_eq!(lines[entry_idx], "0");
        }
    }
}
