//! Reader for the pipe-delimited text export of a road network.
//!
//! ```text
//! # comment lines start with '#'
//! node|<id>|<name>|...|<lat>|<lon>          id in field 1, lat/lon in fields 9 and 10
//! way|<id>|...|<oneway>|<maxspeed>|<m1>|<m2>|...   oneway flag in field 7, member ids from field 9 on
//! ```
//!
//! Consecutive way members are connected, in both directions unless the way is one-way.
//! Members that are not listed as nodes are skipped together with their edges.
//! The member list ends at the first field that is not a number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::{
    builder::GraphBuilder,
    error::{Error, Result},
    types::*,
};

const NODE_ID_FIELD: usize = 1;
const NODE_LAT_FIELD: usize = 9;
const NODE_LON_FIELD: usize = 10;
const WAY_ONEWAY_FIELD: usize = 7;
const WAY_FIRST_MEMBER_FIELD: usize = 9;

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<NodeGraph> {
    let path = path.as_ref();
    let graph = parse_with(|| File::open(path).map(BufReader::new).map_err(|e| Error::file(path, e)))?;
    info!("parsed {} nodes and {} edges from {}", graph.num_nodes(), graph.num_arcs(), path.display());
    Ok(graph)
}

pub fn parse_str(text: &str) -> Result<NodeGraph> {
    parse_with(|| Ok(text.as_bytes()))
}

/// `open` is called once for the nodes and twice for the ways.
fn parse_with<R: BufRead, F: Fn() -> Result<R>>(open: F) -> Result<NodeGraph> {
    let nodes = read_nodes(open()?)?;
    GraphBuilder::new(nodes).build(|emit| for_each_way_edge(open()?, emit))
}

fn records<R: BufRead>(reader: R) -> impl Iterator<Item = (usize, std::io::Result<String>)> {
    reader.lines().enumerate().map(|(i, line)| (i + 1, line))
}

fn read_nodes<R: BufRead>(reader: R) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();

    for (line_number, line) in records(reader) {
        let line = line?;
        let fields: Vec<&str> = line.trim_end().split('|').collect();
        if fields[0] != "node" {
            continue;
        }

        let id = parse_field::<NodeId>(&fields, NODE_ID_FIELD, line_number)?;
        let lat = parse_field::<f64>(&fields, NODE_LAT_FIELD, line_number)?;
        let lon = parse_field::<f64>(&fields, NODE_LON_FIELD, line_number)?;
        nodes.push(Node::new(id, lat, lon));
    }

    Ok(nodes)
}

fn for_each_way_edge<R: BufRead>(reader: R, emit: &mut dyn FnMut(NodeId, NodeId)) -> Result<()> {
    for (_, line) in records(reader) {
        let line = line?;
        let fields: Vec<&str> = line.trim_end().split('|').collect();
        if fields[0] != "way" {
            continue;
        }

        let oneway = fields.get(WAY_ONEWAY_FIELD) == Some(&"oneway");
        let members: Vec<NodeId> = fields
            .iter()
            .skip(WAY_FIRST_MEMBER_FIELD)
            .map_while(|field| field.trim().parse().ok())
            .collect();

        for pair in members.windows(2) {
            emit(pair[0], pair[1]);
            if !oneway {
                emit(pair[1], pair[0]);
            }
        }
    }

    Ok(())
}

fn parse_field<T: std::str::FromStr>(fields: &[&str], index: usize, line_number: usize) -> Result<T> {
    fields
        .get(index)
        .and_then(|field| field.trim().parse().ok())
        .ok_or_else(|| Error::Format(format!("line {}: field {} is missing or not a number", line_number, index)))
}
