//! The A* open list: an indexed binary min-heap over node indices.
//!
//! The heap stores no scores. Comparisons read `f` from a `ScoreTable`, so the caller
//! must keep the table and the frontier consistent: a score may only change for a node
//! that is not in the frontier, or be lowered followed by `reinsert_on_decrease`.
//!
//! Entries with equal `f` leave in insertion order. A reinsertion counts as a new insertion.

use crate::{
    error::{Error, Result},
    types::{Distance, NodeIndex},
};

const INVALID_POSITION: usize = usize::MAX;

pub trait ScoreTable {
    fn f_score(&self, node: NodeIndex) -> Distance;
}

impl ScoreTable for [Distance] {
    fn f_score(&self, node: NodeIndex) -> Distance {
        self[node]
    }
}

impl ScoreTable for Vec<Distance> {
    fn f_score(&self, node: NodeIndex) -> Distance {
        self[node]
    }
}

#[derive(Debug, Clone)]
pub struct PriorityFrontier {
    heap: Vec<NodeIndex>,
    positions: Vec<usize>,
    stamps: Vec<u64>,
    next_stamp: u64,
}

impl PriorityFrontier {
    /// Frontier for node indices `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            heap: Vec::new(),
            positions: vec![INVALID_POSITION; n],
            stamps: vec![0; n],
            next_stamp: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.positions.get(node).map_or(false, |&p| p != INVALID_POSITION)
    }

    pub fn peek(&self) -> Option<NodeIndex> {
        self.heap.first().copied()
    }

    pub fn clear(&mut self) {
        for &node in &self.heap {
            self.positions[node] = INVALID_POSITION;
        }
        self.heap.clear();
        self.next_stamp = 0;
    }

    pub fn insert<S: ScoreTable + ?Sized>(&mut self, node: NodeIndex, scores: &S) -> Result<()> {
        if node >= self.positions.len() {
            return Err(Error::InvariantViolation(format!(
                "node {} inserted into a frontier for {} nodes",
                node,
                self.positions.len()
            )));
        }
        if self.contains(node) {
            return Err(Error::InvariantViolation(format!("node {} inserted into the frontier twice", node)));
        }

        self.stamps[node] = self.next_stamp;
        self.next_stamp += 1;

        let position = self.heap.len();
        self.heap.push(node);
        self.positions[node] = position;
        self.sift_up(position, scores);
        Ok(())
    }

    pub fn extract_min<S: ScoreTable + ?Sized>(&mut self, scores: &S) -> Option<NodeIndex> {
        let min = self.peek()?;
        self.remove_at(0, scores);
        Some(min)
    }

    pub fn remove<S: ScoreTable + ?Sized>(&mut self, node: NodeIndex, scores: &S) -> Result<()> {
        if !self.contains(node) {
            return Err(Error::InvariantViolation(format!("node {} removed from the frontier but not present", node)));
        }
        self.remove_at(self.positions[node], scores);
        Ok(())
    }

    /// Restores the order after the score of `node` was lowered.
    pub fn reinsert_on_decrease<S: ScoreTable + ?Sized>(&mut self, node: NodeIndex, scores: &S) -> Result<()> {
        self.remove(node, scores)?;
        self.insert(node, scores)
    }

    /// Checks the heap order and the position map.
    pub fn check<S: ScoreTable + ?Sized>(&self, scores: &S) -> bool {
        let order_ok = (1..self.heap.len()).all(|i| !self.precedes(self.heap[i], self.heap[(i - 1) / 2], scores));
        let positions_ok = self.heap.iter().enumerate().all(|(i, &node)| self.positions[node] == i);
        let count_ok = self.positions.iter().filter(|&&p| p != INVALID_POSITION).count() == self.heap.len();
        order_ok && positions_ok && count_ok
    }

    fn precedes<S: ScoreTable + ?Sized>(&self, a: NodeIndex, b: NodeIndex, scores: &S) -> bool {
        match scores.f_score(a).total_cmp(&scores.f_score(b)) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => self.stamps[a] < self.stamps[b],
        }
    }

    fn remove_at<S: ScoreTable + ?Sized>(&mut self, position: usize, scores: &S) {
        let node = self.heap.swap_remove(position);
        self.positions[node] = INVALID_POSITION;

        if position < self.heap.len() {
            self.positions[self.heap[position]] = position;
            let position = self.sift_up(position, scores);
            self.sift_down(position, scores);
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions[self.heap[i]] = i;
        self.positions[self.heap[j]] = j;
    }

    fn sift_up<S: ScoreTable + ?Sized>(&mut self, mut position: usize, scores: &S) -> usize {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.precedes(self.heap[position], self.heap[parent], scores) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
        position
    }

    fn sift_down<S: ScoreTable + ?Sized>(&mut self, mut position: usize, scores: &S) {
        loop {
            let left = 2 * position + 1;
            if left >= self.heap.len() {
                return;
            }
            let right = left + 1;
            let smaller_child = if right < self.heap.len() && self.precedes(self.heap[right], self.heap[left], scores) {
                right
            } else {
                left
            };
            if !self.precedes(self.heap[smaller_child], self.heap[position], scores) {
                return;
            }
            self.swap(position, smaller_child);
            position = smaller_child;
        }
    }
}
