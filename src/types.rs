//! This module contains the basic type definitions and the node graph
use crate::error::{Error, Result};

/// Node ids are the unsigned 64 bit ids of the source data
pub type NodeId = u64;
/// Node indices address the node array of a `NodeGraph`
pub type NodeIndex = usize;
/// Distances are meters
pub type Distance = f64;
/// Tentative distance of nodes that have not been reached yet
pub const INFINITY: Distance = f64::INFINITY;

pub trait DefaultReset: Clone {
    const DEFAULT: Self;
    fn reset(&mut self) {
        *self = Self::DEFAULT
    }
}

impl DefaultReset for Distance {
    const DEFAULT: Distance = INFINITY;
}

impl<T: Clone> DefaultReset for Option<T> {
    const DEFAULT: Option<T> = None;
}

/// Latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self { id, lat, lon }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates { lat: self.lat, lon: self.lon }
    }
}

pub trait Graph {
    fn num_nodes(&self) -> usize;
    fn num_arcs(&self) -> usize;
    fn degree(&self, node: NodeIndex) -> usize;
    fn neighbors(&self, node: NodeIndex) -> &[NodeIndex];
    fn coordinates(&self, node: NodeIndex) -> Coordinates;
}

/// Nodes sorted strictly ascending by id, plus one successor vector shared by all nodes.
/// The successors of node `i` are `successors[first_out[i]..first_out[i + 1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    first_out: Vec<usize>,
    successors: Vec<NodeIndex>,
}

impl NodeGraph {
    pub fn new(nodes: Vec<Node>, first_out: Vec<usize>, successors: Vec<NodeIndex>) -> Result<Self> {
        if first_out.len() != nodes.len() + 1 {
            return Err(Error::Format(format!("{} offsets for {} nodes", first_out.len(), nodes.len())));
        }
        if first_out[0] != 0 || first_out[nodes.len()] != successors.len() || first_out.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::Format("successor offsets are not a prefix sum of the successor counts".to_string()));
        }
        if let Some(w) = nodes.windows(2).find(|w| w[0].id >= w[1].id) {
            return Err(Error::Format(format!("node ids not strictly ascending: {} followed by {}", w[0].id, w[1].id)));
        }
        if let Some(&bad) = successors.iter().find(|&&s| s >= nodes.len()) {
            return Err(Error::Format(format!("successor index {} out of range for {} nodes", bad, nodes.len())));
        }

        Ok(Self { nodes, first_out, successors })
    }

    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            first_out: vec![0],
            successors: Vec::new(),
        }
    }

    /// Binary search over the ascending ids.
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.nodes.binary_search_by_key(&id, |node| node.id).ok()
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn first_out(&self) -> &[usize] {
        &self.first_out
    }

    pub fn successors(&self) -> &[NodeIndex] {
        &self.successors
    }
}

impl Graph for NodeGraph {
    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn num_arcs(&self) -> usize {
        self.successors.len()
    }

    fn degree(&self, node: NodeIndex) -> usize {
        self.first_out[node + 1] - self.first_out[node]
    }

    #[inline]
    fn neighbors(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.successors[self.first_out[node]..self.first_out[node + 1]]
    }

    #[inline]
    fn coordinates(&self, node: NodeIndex) -> Coordinates {
        self.nodes[node].coordinates()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct STQuery {
    pub s: NodeId,
    pub t: NodeId,
}
