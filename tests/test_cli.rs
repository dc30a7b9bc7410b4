use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use road_astar::{
    cli::{run, Args, Mode, DEFAULT_GOAL, DEFAULT_START},
    codec::read_binary_file,
    distance::DistanceMethod,
    error::Error as GraphError,
    types::{Graph, STQuery},
};

const NETWORK: &str = "\
# three header lines
#
#
node|1||||||||41.000|2.000
node|2||||||||41.010|2.000
node|3||||||||41.010|2.010
node|4||||||||41.000|2.010
node|5||||||||42.000|3.000
way|10|||||||50|1|2|3|4
way|11||||||oneway|50|1|4
";

fn args(input: PathBuf, start: Option<u64>, goal: Option<u64>) -> Args {
    Args {
        input,
        start,
        goal,
        distance: DistanceMethod::Haversine,
    }
}

#[test]
fn argument_parsing() {
    let parsed = Args::try_parse_from(["road_astar", "spain.bin", "240949599", "195977239", "--distance", "equirectangular"]).unwrap();
    assert_eq!(parsed.mode(), Mode::Search);
    assert_eq!(parsed.query(), STQuery { s: 240949599, t: 195977239 });
    assert_eq!(parsed.distance, DistanceMethod::Equirectangular);

    let defaults = Args::try_parse_from(["road_astar", "spain.csv"]).unwrap();
    assert_eq!(defaults.mode(), Mode::Convert);
    assert_eq!(defaults.query(), STQuery { s: DEFAULT_START, t: DEFAULT_GOAL });
    assert_eq!(defaults.distance, DistanceMethod::Haversine);

    assert_eq!(Args::try_parse_from(["road_astar", "no_extension"]).unwrap().mode(), Mode::Convert);
    assert!(Args::try_parse_from(["road_astar"]).is_err());
    assert!(Args::try_parse_from(["road_astar", "a.bin", "not_a_number"]).is_err());
}

#[test]
fn convert_then_search() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let text = dir.path().join("net.csv");
    std::fs::write(&text, NETWORK)?;

    let binary = run(&args(text, None, None))?;
    assert_eq!(binary, dir.path().join("net.bin"));
    let graph = read_binary_file(&binary)?;
    assert_eq!(graph.num_nodes(), 5);
    assert_eq!(graph.num_arcs(), 7);

    let report = run(&args(binary.clone(), Some(3), Some(4)))?;
    assert_eq!(report, dir.path().join("net.out"));
    let content = std::fs::read_to_string(&report)?;
    let rows: Vec<&str> = content.lines().filter(|line| !line.starts_with('#')).collect();
    // from the goal back to the start
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("4\t"));
    assert_eq!(rows[1], "3\t0.000");

    // the one-way edge 1 -> 4 is used forwards only
    let direct = run(&args(binary.clone(), Some(1), Some(4)))?;
    let rows = std::fs::read_to_string(direct)?.lines().filter(|line| !line.starts_with('#')).count();
    assert_eq!(rows, 2);
    let back = run(&args(binary, Some(4), Some(1)))?;
    let rows = std::fs::read_to_string(back)?.lines().filter(|line| !line.starts_with('#')).count();
    assert_eq!(rows, 4);
    Ok(())
}

#[test]
fn failures_map_to_distinct_exit_codes() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let text = dir.path().join("net.txt");
    std::fs::write(&text, NETWORK)?;
    let binary = run(&args(text, None, None))?;

    let no_path = run(&args(binary.clone(), Some(1), Some(5))).unwrap_err();
    assert!(matches!(no_path, GraphError::NoPathFound { start: 1, goal: 5 }));
    assert_eq!(no_path.exit_code(), 1);

    let missing_node = run(&args(binary, None, None)).unwrap_err();
    assert!(matches!(missing_node, GraphError::NodeNotFound(DEFAULT_START)));
    assert_eq!(missing_node.exit_code(), 4);

    let missing_file = run(&args(dir.path().join("missing.bin"), Some(1), Some(2))).unwrap_err();
    assert_eq!(missing_file.exit_code(), 2);

    let garbage = dir.path().join("garbage.bin");
    std::fs::write(&garbage, b"not a graph")?;
    assert_eq!(run(&args(garbage, Some(1), Some(2))).unwrap_err().exit_code(), 3);
    Ok(())
}
