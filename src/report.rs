use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{
    algo::astar::ShortestPath,
    distance::DistanceMethod,
    error::{Error, Result},
    types::NodeGraph,
};

/// Writes the path from goal back to start, one `<node id>\t<distance from start>` line per node.
pub fn write_report<W: Write>(writer: &mut W, graph: &NodeGraph, path: &ShortestPath, method: DistanceMethod) -> Result<()> {
    let (start, goal) = match (path.nodes.first(), path.nodes.last()) {
        (Some(&start), Some(&goal)) => (graph.node(start).id, graph.node(goal).id),
        _ => return Err(Error::InvariantViolation("report of an empty path".to_string())),
    };

    writeln!(writer, "# shortest path from node {} to node {} ({} distance)", start, goal, method.name())?;
    writeln!(writer, "# {} nodes, total distance {:.3} m", path.nodes.len(), path.total())?;
    for (&node, &cost) in path.nodes.iter().zip(path.costs.iter()).rev() {
        writeln!(writer, "{}\t{:.3}", graph.node(node).id, cost)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_report_file<P: AsRef<Path>>(file: P, graph: &NodeGraph, path: &ShortestPath, method: DistanceMethod) -> Result<()> {
    let file = file.as_ref();
    let mut writer = BufWriter::new(File::create(file).map_err(|e| Error::file(file, e))?);
    write_report(&mut writer, graph, path, method)
}
