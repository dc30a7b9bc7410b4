//! Plain Dijkstra with lazy deletion, used as the reference A* results are checked against.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{
    distance::{DistanceMethod, EdgeCost},
    types::*,
};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct State {
    pub distance: Distance,
    pub node: NodeIndex,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for a min heap
        other.distance.total_cmp(&self.distance).then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct Dijkstra<'a, G: Graph, C: EdgeCost = DistanceMethod> {
    graph: &'a G,
    cost: C,
    s: NodeIndex,
    dist: Vec<Distance>,
    pred: Vec<Option<NodeIndex>>,
}

impl<'a, G: Graph, C: EdgeCost> Dijkstra<'a, G, C> {
    pub fn new(graph: &'a G, cost: C) -> Self {
        Self {
            graph,
            cost,
            s: 0,
            dist: vec![INFINITY; graph.num_nodes()],
            pred: vec![None; graph.num_nodes()],
        }
    }

    pub fn init_new_s(&mut self, s: NodeIndex) {
        self.s = s;
        self.dist.iter_mut().for_each(|d| *d = INFINITY);
        self.pred.iter_mut().for_each(|p| *p = None);
    }

    pub fn dist_query(&mut self, t: NodeIndex) -> Option<Distance> {
        let mut queue = BinaryHeap::new();
        self.dist[self.s] = 0.0;
        queue.push(State { distance: 0.0, node: self.s });

        while let Some(State { distance, node }) = queue.pop() {
            if node == t {
                return Some(distance);
            }
            if distance > self.dist[node] {
                continue;
            }

            for &neighbor in self.graph.neighbors(node) {
                let new_dist = distance + self.cost.cost(self.graph, node, neighbor);
                if new_dist < self.dist[neighbor] {
                    self.dist[neighbor] = new_dist;
                    self.pred[neighbor] = Some(node);
                    queue.push(State {
                        distance: new_dist,
                        node: neighbor,
                    });
                }
            }
        }

        None
    }

    pub fn current_node_path_to(&self, t: NodeIndex) -> Option<Vec<NodeIndex>> {
        if self.dist[t] == INFINITY {
            return None;
        }

        let mut path = vec![t];
        let mut current = t;
        while let Some(pred) = self.pred[current] {
            path.push(pred);
            current = pred;
        }
        path.reverse();
        Some(path)
    }
}
