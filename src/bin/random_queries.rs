use std::{path::PathBuf, process};

use clap::Parser;
use log::{error, info, warn};
use rand::{Rng, SeedableRng};
use road_astar::{
    algo::{astar::Astar, dijkstra::Dijkstra},
    codec::read_binary_file,
    distance::DistanceMethod,
    error::{Error, Result},
    time::measure,
    types::{Graph, NodeIndex},
};

/// Runs random queries on a binary graph and checks A* against Dijkstra.
#[derive(Parser, Debug)]
struct Args {
    /// Binary graph file
    graph: PathBuf,
    #[arg(long, default_value_t = 100)]
    queries: usize,
    #[arg(long, default_value_t = 1269803542210214824)]
    seed: u64,
    #[arg(long, value_enum, default_value_t = DistanceMethod::Haversine)]
    distance: DistanceMethod,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(e.exit_code());
    }
}

fn run(args: &Args) -> Result<()> {
    let graph = read_binary_file(&args.graph)?;
    info!("Graph with {} nodes and {} edges", graph.num_nodes(), graph.num_arcs());
    if graph.num_nodes() == 0 {
        warn!("empty graph, nothing to query");
        return Ok(());
    }

    let mut gen = rand::rngs::StdRng::seed_from_u64(args.seed);
    let mut astar = Astar::new(&graph, args.distance);
    let mut dijkstra = Dijkstra::new(&graph, args.distance);

    let mut mismatches = 0;
    let (mut astar_ms, mut dijkstra_ms) = (0, 0);
    for i in 0..args.queries {
        let s: NodeIndex = gen.gen_range(0..graph.num_nodes());
        let t: NodeIndex = gen.gen_range(0..graph.num_nodes());

        let (astar_result, astar_time) = measure(|| astar.run_query(s, t));
        dijkstra.init_new_s(s);
        let (dijkstra_result, dijkstra_time) = measure(|| dijkstra.dist_query(t));
        astar_ms += astar_time.num_milliseconds();
        dijkstra_ms += dijkstra_time.num_milliseconds();

        let astar_dist = astar_result?.map(|path| path.total());
        let agree = match (astar_dist, dijkstra_result) {
            (Some(a), Some(d)) => (a - d).abs() <= 1e-4 * d.max(1.0),
            (None, None) => true,
            _ => false,
        };
        if !agree {
            warn!("Query #{} from {} to {}: A* {:?}, Dijkstra {:?}", i, s, t, astar_dist, dijkstra_result);
            mismatches += 1;
        }
    }

    info!("A* took {}ms in total, Dijkstra {}ms", astar_ms, dijkstra_ms);
    if mismatches > 0 {
        return Err(Error::InvariantViolation(format!("{} of {} queries disagree with Dijkstra", mismatches, args.queries)));
    }
    Ok(())
}
