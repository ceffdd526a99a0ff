use clap::Parser;
use ordered_float::OrderedFloat;
use rips_homology::{read_filtration, vietoris_rips, write_filtration, Expansion, Filtration};
use std::fs::File;
use std::io::{BufReader, BufWriter};

/// Build a Vietoris-Rips filtration of a small fixed point cloud, write it
/// to a text file, and read it back, checking the round-trip holds.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Path to write (and then read back) the filtration.
    output: String,

    /// Scale (epsilon) at which edges are admitted into the complex.
    #[clap(short, long, default_value_t = 2.0)]
    epsilon: f64,
}

fn main() -> anyhow::Result<()> {
    let opts: Cli = Cli::parse();

    // A unit square with both diagonals present at epsilon.
    let mut distances = rips_homology::DistanceMatrix::new(4);
    let sqrt2 = std::f64::consts::SQRT_2;
    distances.set(1, 0, OrderedFloat(1.0));
    distances.set(2, 1, OrderedFloat(1.0));
    distances.set(3, 2, OrderedFloat(1.0));
    distances.set(3, 0, OrderedFloat(1.0));
    distances.set(2, 0, OrderedFloat(sqrt2));
    distances.set(3, 1, OrderedFloat(sqrt2));

    let (complex, weights) = vietoris_rips(
        &distances,
        OrderedFloat(opts.epsilon),
        2,
        Expansion::Inductive,
    )?;
    let filtration = Filtration::new(&complex, &weights)?;

    let out_file = File::create(&opts.output)?;
    write_filtration(BufWriter::new(out_file), &filtration)?;
    println!("wrote {} cells to {}", filtration.len(), opts.output);

    let in_file = File::open(&opts.output)?;
    let (_, read_back) = read_filtration(BufReader::new(in_file))?;
    println!("read back {} cells", read_back.len());

    assert_eq!(read_back.len(), filtration.len());
    for (original, roundtripped) in filtration.entries().iter().zip(read_back.entries()) {
        assert_eq!(original.cell, roundtripped.cell);
        assert_eq!(original.value, roundtripped.value);
    }
    println!("round-trip OK");

    Ok(())
}
