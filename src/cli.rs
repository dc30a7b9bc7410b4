use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use crate::{
    algo::astar::Astar,
    codec::{read_binary_file, write_binary_file},
    distance::DistanceMethod,
    error::{Error, Result},
    parser::parse_file,
    report::write_report_file,
    time::report_time,
    types::{Graph, NodeId, STQuery},
};

pub const DEFAULT_START: NodeId = 8670491;
pub const DEFAULT_GOAL: NodeId = 8670492;

/// Shortest paths on road networks with A*.
///
/// A `.bin` input is loaded and searched, the path is written next to it with the extension `.out`.
/// Any other input is parsed as a text export and converted into a `.bin` file, without a search.
#[derive(Parser, Debug, Clone)]
#[command(name = "road_astar", version)]
pub struct Args {
    /// Graph file
    pub input: PathBuf,
    /// Id of the start node
    pub start: Option<NodeId>,
    /// Id of the goal node
    pub goal: Option<NodeId>,
    /// Distance used for both the heuristic and the edge costs
    #[arg(long, value_enum, default_value_t = DistanceMethod::Haversine)]
    pub distance: DistanceMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Convert,
    Search,
}

impl Args {
    pub fn mode(&self) -> Mode {
        match self.input.extension() {
            Some(ext) if ext == "bin" => Mode::Search,
            _ => Mode::Convert,
        }
    }

    pub fn query(&self) -> STQuery {
        STQuery {
            s: self.start.unwrap_or(DEFAULT_START),
            t: self.goal.unwrap_or(DEFAULT_GOAL),
        }
    }
}

/// Runs the mode selected by the input and returns the file that was written.
pub fn run(args: &Args) -> Result<PathBuf> {
    match args.mode() {
        Mode::Convert => convert(&args.input),
        Mode::Search => search(&args.input, args.query(), args.distance),
    }
}

fn convert(input: &Path) -> Result<PathBuf> {
    let output = input.with_extension("bin");
    let graph = report_time("parsing text graph", || parse_file(input))?;
    report_time("writing binary graph", || write_binary_file(&output, &graph))?;
    Ok(output)
}

fn search(input: &Path, query: STQuery, method: DistanceMethod) -> Result<PathBuf> {
    let graph = report_time("reading binary graph", || read_binary_file(input))?;
    info!("graph with {} nodes and {} edges", graph.num_nodes(), graph.num_arcs());

    let mut astar = Astar::new(&graph, method);
    let path = report_time("A* query", || astar.query_by_id(query))?.ok_or(Error::NoPathFound { start: query.s, goal: query.t })?;
    info!(
        "path from {} to {} with {} nodes and a length of {:.3} m, {} nodes expanded",
        query.s,
        query.t,
        path.nodes.len(),
        path.total(),
        astar.stats().expanded
    );

    let output = input.with_extension("out");
    write_report_file(&output, &graph, &path, method)?;
    Ok(output)
}
