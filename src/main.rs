use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use csv::ReaderBuilder;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use shortpath::geometry::{Point, euclidean_heuristic};
use shortpath::graph::DEFAULT_TOLERANCE;
use shortpath::{Algorithm, DistancePolicy, NodeLocator, UndirectedGraph, path_cost};


#[derive(Parser, Debug)]
#[command(name = "route")]
#[command(about = "Load an edge list from CSV and find the shortest path between two coordinates.", long_about = None)]
struct Cli {
    /// Path to the .csv edge list, one x1,y1,x2,y2[,weight] row per edge after a header.
    /// A missing weight is the straight-line length of the edge.
    #[arg(short, long)]
    edges: String,

    /// Start coordinates as x,y
    #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true)]
    from: Point,

    /// Goal coordinates as x,y
    #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true)]
    to: Point,

    #[arg(short, long, value_enum, default_value_t = AlgorithmChoice::Dijkstra)]
    algorithm: AlgorithmChoice,

    /// Keep the IDA* distance table across bound passes instead of resetting it
    #[arg(long, default_value_t = false)]
    persistent_distances: bool,

    /// How far the coordinates may be from a graph node
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Log search progress to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AlgorithmChoice {
    Dijkstra,
    IdaStar,
    /// Run both and compare timings
    Both,
}

impl AlgorithmChoice {
    fn algorithms(self, policy: DistancePolicy) -> Vec<Algorithm> {
        match self {
            AlgorithmChoice::Dijkstra => vec![Algorithm::Dijkstra],
            AlgorithmChoice::IdaStar => vec![Algorithm::IdaStar(policy)],
            AlgorithmChoice::Both => vec![Algorithm::Dijkstra, Algorithm::IdaStar(policy)],
        }
    }
}


/// Search progress is debug level, only warnings otherwise
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    }
}


fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = value.split_once(',')
        .ok_or_else(|| format!("expected x,y but got {value:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {value:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {value:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn load_graph(path: &str) -> Result<UndirectedGraph<Point, f64>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true) // important: skip header line
        .flexible(true) // weight column is optional
        .from_path(path)
        .with_context(|| format!("opening {path}"))?;

    let mut graph = UndirectedGraph::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() < 4 {
            bail!("row {}: expected x1,y1,x2,y2[,weight]", row + 1);
        }

        let number = |field: &str| -> Result<f64> {
            field.trim().parse().with_context(|| format!("row {}: bad number {field:?}", row + 1))
        };

        let u = Point::new(number(&record[0])?, number(&record[1])?);
        let v = Point::new(number(&record[2])?, number(&record[3])?);
        let weight = match record.get(4).map(str::trim) {
            Some(weight) if !weight.is_empty() => number(weight)?,
            _ => u.distance(&v),
        };

        if weight < 0.0 {
            tracing::warn!("row {}: negative weight {weight}, paths may not be optimal", row + 1);
        }
        graph.add_edge(u, v, weight);
    }

    Ok(graph)
}

fn report(algorithm: Algorithm, graph: &UndirectedGraph<Point, f64>, path: &[Point], elapsed: Duration) {
    let millis = elapsed.as_secs_f64() * 1000.0;
    match path_cost(graph, path) {
        Some(cost) if !path.is_empty() => {
            println!("{algorithm}: cost {cost:.6} over {} nodes in {millis:.3} ms", path.len());
            for point in path {
                println!("  {},{}", point.x, point.y);
            }
        }
        _ => println!("{algorithm}: no path found in {millis:.3} ms"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the paths, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let graph = load_graph(&cli.edges)?;
    tracing::info!("loaded {} nodes and {} edges from {}", graph.node_count(), graph.edge_count(), cli.edges);

    // Snap the requested coordinates onto graph nodes
    let locator = NodeLocator::new(&graph)?;
    let start = *locator.locate(cli.from.x.0, cli.from.y.0, cli.tolerance)
        .with_context(|| format!("start {},{} is not on the graph", cli.from.x, cli.from.y))?;
    let goal = *locator.locate(cli.to.x.0, cli.to.y.0, cli.tolerance)
        .with_context(|| format!("goal {},{} is not on the graph", cli.to.x, cli.to.y))?;

    let policy = if cli.persistent_distances {
        DistancePolicy::Persistent
    } else {
        DistancePolicy::PerIteration
    };

    for algorithm in cli.algorithm.algorithms(policy) {
        let now = Instant::now();
        let path = algorithm.plan(&graph, &start, &goal, euclidean_heuristic)?;
        report(algorithm, &graph, &path, now.elapsed());
    }

    Ok(())
}
