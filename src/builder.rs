//! Construction of a `NodeGraph` from nodes and id based edges.
//!
//! Edges are streamed twice: the first pass counts the successors of every node so that
//! the successor vector can be allocated once, the second pass fills it.

use log::{debug, warn};

use crate::{
    error::{Error, Result},
    types::*,
};

pub struct GraphBuilder {
    nodes: Vec<Node>,
}

impl GraphBuilder {
    /// Sorts the nodes by id. Of several nodes with the same id only the first is kept.
    pub fn new(mut nodes: Vec<Node>) -> Self {
        nodes.sort_by_key(|node| node.id);
        let before = nodes.len();
        nodes.dedup_by_key(|node| node.id);
        if nodes.len() != before {
            warn!("dropped {} nodes with duplicate ids", before - nodes.len());
        }
        Self { nodes }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.nodes.binary_search_by_key(&id, |node| node.id).ok()
    }

    /// `for_each_edge` must report the same edges on both calls.
    /// Edges with an endpoint that is not a known node are skipped.
    pub fn build<F>(self, mut for_each_edge: F) -> Result<NodeGraph>
    where
        F: FnMut(&mut dyn FnMut(NodeId, NodeId)) -> Result<()>,
    {
        let n = self.nodes.len();
        let mut first_out = vec![0usize; n + 1];
        let mut skipped = 0usize;

        for_each_edge(&mut |tail, head| match (self.index_of(tail), self.index_of(head)) {
            (Some(tail), Some(_)) => first_out[tail + 1] += 1,
            _ => skipped += 1,
        })?;

        let mut prefix_sum = 0;
        for deg in &mut first_out {
            prefix_sum += *deg;
            *deg = prefix_sum;
        }

        let mut successors = vec![0; prefix_sum];
        let mut next_slot = first_out.clone();
        let mut overflow = false;

        for_each_edge(&mut |tail, head| {
            if let (Some(tail), Some(head)) = (self.index_of(tail), self.index_of(head)) {
                if next_slot[tail] < first_out[tail + 1] {
                    successors[next_slot[tail]] = head;
                    next_slot[tail] += 1;
                } else {
                    overflow = true;
                }
            }
        })?;

        if overflow || (0..n).any(|node| next_slot[node] != first_out[node + 1]) {
            return Err(Error::Format("edge source changed between the counting and the filling pass".to_string()));
        }
        if skipped > 0 {
            debug!("skipped {} edges with unknown endpoints", skipped);
        }

        let (first_out, successors) = dedup_successors(&first_out, &successors);
        NodeGraph::new(self.nodes, first_out, successors)
    }
}

/// Removes repeated successors of each node, keeping the first occurrence in place.
fn dedup_successors(first_out: &[usize], successors: &[NodeIndex]) -> (Vec<usize>, Vec<NodeIndex>) {
    let mut new_first_out = Vec::with_capacity(first_out.len());
    let mut new_successors = Vec::with_capacity(successors.len());
    new_first_out.push(0);

    for range in first_out.windows(2) {
        let begin = new_successors.len();
        for &head in &successors[range[0]..range[1]] {
            if !new_successors[begin..].contains(&head) {
                new_successors.push(head);
            }
        }
        new_first_out.push(new_successors.len());
    }

    (new_first_out, new_successors)
}

impl NodeGraph {
    pub fn from_id_edges(nodes: Vec<Node>, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        GraphBuilder::new(nodes).build(|emit| {
            for &(tail, head) in edges {
                emit(tail, head);
            }
            Ok(())
        })
    }
}
