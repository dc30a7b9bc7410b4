use log::debug;

use crate::{
    distance::{DistanceMethod, EdgeCost},
    error::{Error, Result},
    frontier::{PriorityFrontier, ScoreTable},
    timestamped_vector::TimestampedVector,
    types::*,
};

/// Estimate of the remaining distance to the target.
/// The search only returns optimal paths if the estimate never exceeds the true remaining cost.
pub trait Potential {
    fn init_new_t(&mut self, t: NodeIndex);
    fn potential(&mut self, node: NodeIndex) -> Distance;
}

/// Zero estimate, turns A* into Dijkstra's algorithm
#[derive(Clone, Debug, Default)]
pub struct NoPotential {}

impl Potential for NoPotential {
    fn init_new_t(&mut self, _t: NodeIndex) {}

    fn potential(&mut self, _node: NodeIndex) -> Distance {
        0.0
    }
}

/// Straight-line distance to the target
#[derive(Clone, Debug)]
pub struct GeoPotential<'a, G> {
    graph: &'a G,
    method: DistanceMethod,
    target: Coordinates,
}

impl<'a, G: Graph> GeoPotential<'a, G> {
    pub fn new(graph: &'a G, method: DistanceMethod) -> Self {
        Self {
            graph,
            method,
            target: Coordinates::default(),
        }
    }
}

impl<'a, G: Graph> Potential for GeoPotential<'a, G> {
    fn init_new_t(&mut self, t: NodeIndex) {
        self.target = self.graph.coordinates(t);
    }

    fn potential(&mut self, node: NodeIndex) -> Distance {
        self.method.between(self.graph.coordinates(node), self.target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership {
    Unvisited,
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchStatus {
    pub g: Distance,
    pub h: Distance,
    pub parent: Option<NodeIndex>,
    pub membership: Membership,
}

impl SearchStatus {
    pub fn f(&self) -> Distance {
        self.g + self.h
    }
}

impl DefaultReset for SearchStatus {
    const DEFAULT: SearchStatus = SearchStatus {
        g: INFINITY,
        h: 0.0,
        parent: None,
        membership: Membership::Unvisited,
    };
}

pub type StatusTable = TimestampedVector<SearchStatus, u32>;

impl ScoreTable for StatusTable {
    #[inline]
    fn f_score(&self, node: NodeIndex) -> Distance {
        self.get(node).f()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken from the frontier and expanded
    pub expanded: usize,
    /// Open nodes whose cost improved
    pub decreased: usize,
    /// Closed nodes moved back to the frontier
    pub reopened: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath {
    /// Node indices from start to goal
    pub nodes: Vec<NodeIndex>,
    /// Cost from the start for each entry of `nodes`
    pub costs: Vec<Distance>,
}

impl ShortestPath {
    pub fn total(&self) -> Distance {
        self.costs.last().copied().unwrap_or(0.0)
    }
}

pub struct Astar<'a, G: Graph, P: Potential = GeoPotential<'a, G>, C: EdgeCost = DistanceMethod> {
    graph: &'a G,
    cost: C,
    potential: P,
    status: StatusTable,
    frontier: PriorityFrontier,
    stats: SearchStats,
}

impl<'a, G: Graph> Astar<'a, G> {
    /// A* with the straight-line heuristic of the same distance method used for edge costs.
    pub fn new(graph: &'a G, method: DistanceMethod) -> Self {
        Self::with_potential(graph, method, GeoPotential::new(graph, method))
    }
}

impl<'a, G: Graph, P: Potential, C: EdgeCost> Astar<'a, G, P, C> {
    pub fn with_potential(graph: &'a G, cost: C, potential: P) -> Self {
        Self {
            graph,
            cost,
            potential,
            status: StatusTable::with_size(graph.num_nodes()),
            frontier: PriorityFrontier::new(graph.num_nodes()),
            stats: SearchStats::default(),
        }
    }

    pub fn status(&self, node: NodeIndex) -> &SearchStatus {
        self.status.get(node)
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn init_new_query(&mut self, goal: NodeIndex) {
        self.status.reset();
        self.frontier.clear();
        self.stats = SearchStats::default();
        self.potential.init_new_t(goal);
    }

    /// Runs A* between two node indices. `Ok(None)` means the goal is unreachable.
    pub fn run_query(&mut self, start: NodeIndex, goal: NodeIndex) -> Result<Option<ShortestPath>> {
        let n = self.graph.num_nodes();
        if start >= n || goal >= n {
            return Err(Error::InvariantViolation(format!("query {} -> {} on a graph with {} nodes", start, goal, n)));
        }

        self.init_new_query(goal);
        let graph = self.graph;

        let h = self.potential.potential(start);
        self.status.set(
            start,
            SearchStatus {
                g: 0.0,
                h,
                parent: None,
                membership: Membership::Open,
            },
        );
        self.frontier.insert(start, &self.status)?;

        while let Some(current) = self.frontier.extract_min(&self.status) {
            if current == goal {
                debug!(
                    "reached goal after {} expansions ({} decreases, {} reopens)",
                    self.stats.expanded, self.stats.decreased, self.stats.reopened
                );
                return self.path_to(goal).map(Some);
            }

            self.stats.expanded += 1;
            let current_g = self.status.get(current).g;

            for &neighbor in graph.neighbors(current) {
                let successor_cost = current_g + self.cost.cost(graph, current, neighbor);
                let neighbor_status = *self.status.get(neighbor);

                match neighbor_status.membership {
                    Membership::Open => {
                        if neighbor_status.g <= successor_cost {
                            continue;
                        }
                        self.relax(neighbor, current, successor_cost);
                        self.frontier.reinsert_on_decrease(neighbor, &self.status)?;
                        self.stats.decreased += 1;
                    }
                    Membership::Closed => {
                        if neighbor_status.g <= successor_cost {
                            continue;
                        }
                        debug!("reopening node {} (g {} -> {})", neighbor, neighbor_status.g, successor_cost);
                        self.relax(neighbor, current, successor_cost);
                        self.status.get_mut(neighbor).membership = Membership::Open;
                        self.frontier.insert(neighbor, &self.status)?;
                        self.stats.reopened += 1;
                    }
                    Membership::Unvisited => {
                        let h = self.potential.potential(neighbor);
                        self.status.set(
                            neighbor,
                            SearchStatus {
                                g: successor_cost,
                                h,
                                parent: Some(current),
                                membership: Membership::Open,
                            },
                        );
                        self.frontier.insert(neighbor, &self.status)?;
                    }
                }
            }

            self.status.get_mut(current).membership = Membership::Closed;
        }

        debug!("frontier exhausted after {} expansions without reaching node {}", self.stats.expanded, goal);
        Ok(None)
    }

    fn relax(&mut self, node: NodeIndex, parent: NodeIndex, g: Distance) {
        let status = self.status.get_mut(node);
        status.g = g;
        status.parent = Some(parent);
    }

    fn path_to(&self, goal: NodeIndex) -> Result<ShortestPath> {
        let mut nodes = vec![goal];
        let mut current = goal;
        while let Some(parent) = self.status.get(current).parent {
            if nodes.len() > self.graph.num_nodes() {
                return Err(Error::InvariantViolation(format!("parent links from node {} form a cycle", goal)));
            }
            nodes.push(parent);
            current = parent;
        }
        nodes.reverse();

        let costs = nodes.iter().map(|&node| self.status.get(node).g).collect();
        Ok(ShortestPath { nodes, costs })
    }
}

impl<'a, P: Potential, C: EdgeCost> Astar<'a, NodeGraph, P, C> {
    /// Resolves the ids and runs the query, unknown ids are reported as `NodeNotFound`.
    pub fn query_by_id(&mut self, query: STQuery) -> Result<Option<ShortestPath>> {
        let start = self.graph.index_of(query.s).ok_or(Error::NodeNotFound(query.s))?;
        let goal = self.graph.index_of(query.t).ok_or(Error::NodeNotFound(query.t))?;
        self.run_query(start, goal)
    }
}
