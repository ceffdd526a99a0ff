use clap::Parser;
use ordered_float::OrderedFloat;
use rips_homology::{vietoris_rips, with_generators, Expansion};
use std::fmt::Formatter;

/// Compute the homology of the Vietoris-Rips complex of a built-in point
/// cloud at a given scale.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Point cloud to build the complex from.
    #[clap(arg_enum)]
    shape: Shape,

    /// Scale (epsilon) at which edges are admitted into the complex.
    #[clap(short, long, default_value_t = 1.0)]
    epsilon: f64,

    /// Highest simplex dimension to construct.
    #[clap(short, long, default_value_t = 2)]
    max_dim: usize,

    /// Expansion strategy used to build the complex above the 1-skeleton.
    #[clap(short = 'x', long, default_value = "inductive")]
    expansion: String,

    /// Print an explicit cycle generator for every homology class.
    #[clap(short, long)]
    generators: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ArgEnum)]
enum Shape {
    /// Eight vertices of the unit cube.
    Cube,
    /// Four points evenly spaced on a circle (a square).
    Square,
    /// A 3x3 grid of unit squares with the center point removed: an annulus.
    AnnulusGrid,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Shape::Cube => "cube",
                Shape::Square => "square",
                Shape::AnnulusGrid => "annulus-grid",
            }
        )
    }
}

fn cube_points() -> Vec<[f64; 3]> {
    let mut points = Vec::with_capacity(8);
    for x in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for z in [0.0, 1.0] {
                points.push([x, y, z]);
            }
        }
    }
    points
}

fn square_points() -> Vec<[f64; 2]> {
    vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
}

fn annulus_grid_points() -> Vec<[f64; 2]> {
    (0..3)
        .flat_map(|x| (0..3).map(move |y| (x, y)))
        .filter(|&(x, y)| (x, y) != (1, 1))
        .map(|(x, y)| [x as f64, y as f64])
        .collect()
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn pairwise_distances(points: &[Vec<f64>]) -> rips_homology::DistanceMatrix<OrderedFloat<f64>> {
    let n = points.len();
    let mut d = rips_homology::DistanceMatrix::new(n);
    for i in 1..n {
        for j in 0..i {
            d.set(i, j, OrderedFloat(euclidean(&points[i], &points[j])));
        }
    }
    d
}

fn main() -> anyhow::Result<()> {
    let opts: Cli = Cli::parse();

    let points: Vec<Vec<f64>> = match opts.shape {
        Shape::Cube => cube_points().into_iter().map(Vec::from).collect(),
        Shape::Square => square_points().into_iter().map(Vec::from).collect(),
        Shape::AnnulusGrid => annulus_grid_points().into_iter().map(Vec::from).collect(),
    };
    let distances = pairwise_distances(&points);
    let expansion: Expansion = opts.expansion.parse()?;

    let (complex, _weights) = vietoris_rips(
        &distances,
        OrderedFloat(opts.epsilon),
        opts.max_dim,
        expansion,
    )?;

    println!(
        "{} points, epsilon = {}, cells by dimension: {:?}",
        points.len(),
        opts.epsilon,
        (0..=complex.dim()).map(|d| complex.size(d)).collect::<Vec<_>>()
    );

    let homology = rips_homology::homology(&complex)?;
    println!("betti numbers: {:?}", homology.betti());
    println!("euler characteristic: {}", homology.euler());

    if opts.generators {
        let with_gens = with_generators(homology)?;
        for group in &with_gens.groups {
            println!("H_{}: beta = {}, torsion = {:?}", group.dim, group.betti, group.torsion);
            for generator in &group.generators {
                println!("  generator (torsion {}): {}", generator.torsion_order, generator.chain);
            }
        }
    }

    Ok(())
}
