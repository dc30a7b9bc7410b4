//! Binary graph format.
//!
//! All fields are 8 bytes wide and stored in native byte order:
//!
//! 1. header: node count, total successor count
//! 2. one `NodeRecord` per node, ascending by id
//! 3. all successor indices in node order, node 0's first
//!
//! The successor slices are rebuilt on load from the running sum of the per node counts.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use log::info;

use crate::{
    error::{Error, Result},
    io::{is_exhausted, read_vec, write_slice, Plain},
    types::{Graph, Node, NodeGraph, NodeIndex},
};

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeRecord {
    pub id: u64,
    pub lat: f64,
    pub lon: f64,
    pub successor_count: u64,
    /// Meaningless on disk, always written as zero and ignored on load
    pub successor_ptr: u64,
}

unsafe impl Plain for NodeRecord {}

pub const HEADER_BYTES: u64 = 2 * std::mem::size_of::<u64>() as u64;
pub const RECORD_BYTES: u64 = std::mem::size_of::<NodeRecord>() as u64;
pub const SUCCESSOR_BYTES: u64 = std::mem::size_of::<u64>() as u64;

/// Size of a well formed file with the given header.
pub fn expected_file_size(node_count: u64, successor_count: u64) -> Option<u64> {
    node_count
        .checked_mul(RECORD_BYTES)?
        .checked_add(successor_count.checked_mul(SUCCESSOR_BYTES)?)?
        .checked_add(HEADER_BYTES)
}

pub fn encode<W: Write>(graph: &NodeGraph, writer: &mut W) -> Result<()> {
    // the header comes first, so the total has to be known before anything is written
    let total_successors: u64 = (0..graph.num_nodes()).map(|node| graph.degree(node) as u64).sum();
    let header = [graph.num_nodes() as u64, total_successors];
    write_slice(writer, &header).map_err(|e| Error::from_transfer(e, "writing header"))?;

    let records: Vec<NodeRecord> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| NodeRecord {
            id: node.id,
            lat: node.lat,
            lon: node.lon,
            successor_count: graph.degree(index) as u64,
            successor_ptr: 0,
        })
        .collect();
    write_slice(writer, &records).map_err(|e| Error::from_transfer(e, "writing node records"))?;

    let successors: Vec<u64> = graph.successors().iter().map(|&s| s as u64).collect();
    write_slice(writer, &successors).map_err(|e| Error::from_transfer(e, "writing successors"))?;

    writer.flush().map_err(|e| Error::from_transfer(e, "flushing"))
}

pub fn decode<R: Read>(reader: &mut R) -> Result<NodeGraph> {
    let header: Vec<u64> = read_vec(reader, 2).map_err(|e| Error::from_transfer(e, "reading header"))?;
    let node_count = to_usize(header[0])?;
    let total_successors = to_usize(header[1])?;

    let records: Vec<NodeRecord> = read_vec(reader, node_count).map_err(|e| Error::from_transfer(e, "reading node records"))?;
    let flat: Vec<u64> = read_vec(reader, total_successors).map_err(|e| Error::from_transfer(e, "reading successors"))?;

    if !is_exhausted(reader)? {
        return Err(Error::Format("trailing bytes after the successor array".to_string()));
    }

    let mut first_out = Vec::with_capacity(node_count + 1);
    let mut offset: usize = 0;
    first_out.push(0);
    for record in &records {
        offset = offset
            .checked_add(to_usize(record.successor_count)?)
            .filter(|&o| o <= total_successors)
            .ok_or_else(|| Error::Format(format!("successor counts exceed the header total of {}", total_successors)))?;
        first_out.push(offset);
    }
    if offset != total_successors {
        return Err(Error::Format(format!(
            "successor counts sum to {} but the header announces {}",
            offset, total_successors
        )));
    }

    let nodes = records.iter().map(|r| Node::new(r.id, r.lat, r.lon)).collect();
    let successors = flat.into_iter().map(to_usize).collect::<Result<Vec<NodeIndex>>>()?;

    NodeGraph::new(nodes, first_out, successors)
}

pub fn write_binary_file<P: AsRef<Path>>(path: P, graph: &NodeGraph) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::file(path, e))?;
    let mut writer = BufWriter::new(file);
    encode(graph, &mut writer)?;
    info!("wrote {} nodes and {} successors to {}", graph.num_nodes(), graph.num_arcs(), path.display());
    Ok(())
}

pub fn read_binary_file<P: AsRef<Path>>(path: P) -> Result<NodeGraph> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::file(path, e))?;
    let file_size = file.metadata().map_err(|e| Error::file(path, e))?.len();
    let mut reader = BufReader::new(file);

    if file_size >= HEADER_BYTES {
        let header: Vec<u64> = read_vec(&mut reader, 2).map_err(|e| Error::from_transfer(e, "reading header"))?;
        if expected_file_size(header[0], header[1]) != Some(file_size) {
            return Err(Error::Format(format!(
                "header announces {} nodes and {} successors, which does not match the file size of {} bytes",
                header[0], header[1], file_size
            )));
        }
        reader.rewind().map_err(|e| Error::file(path, e))?;
        let graph = decode(&mut reader)?;
        info!("read {} nodes and {} successors from {}", graph.num_nodes(), graph.num_arcs(), path.display());
        return Ok(graph);
    }

    decode(&mut reader)
}

fn to_usize(value: u64) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::Format(format!("value {} does not fit the address space", value)))
}
