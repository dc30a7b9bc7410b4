//! Geographic distances between nodes.
//!
//! The configured method is used for both the A* heuristic and the cost of traversing an edge.
//! The heuristic is only admissible if travelling along edges is never shorter than the
//! straight-line distance between their endpoints. With edge costs computed by the same
//! method this follows from the triangle inequality, but a graph with stored road lengths
//! would have to satisfy it on its own, see `EdgeCost`.

use std::f64::consts::PI;

use crate::types::{Coordinates, Distance, Graph, NodeIndex};

/// Mean earth radius in meters
pub const EARTH_RADIUS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DistanceMethod {
    /// Great-circle distance, accurate
    #[default]
    Haversine,
    /// Flat projection around the mean latitude, cheaper and less accurate
    Equirectangular,
}

impl DistanceMethod {
    #[inline]
    pub fn between(self, a: Coordinates, b: Coordinates) -> Distance {
        match self {
            DistanceMethod::Haversine => haversine(a, b),
            DistanceMethod::Equirectangular => equirectangular(a, b),
        }
    }

    #[inline]
    pub fn node_distance<G: Graph>(self, graph: &G, a: NodeIndex, b: NodeIndex) -> Distance {
        self.between(graph.coordinates(a), graph.coordinates(b))
    }

    pub fn name(self) -> &'static str {
        match self {
            DistanceMethod::Haversine => "haversine",
            DistanceMethod::Equirectangular => "equirectangular",
        }
    }
}

/// Cost of traversing the edge `tail -> head`.
/// A straight-line potential stays admissible as long as no edge is cheaper than the distance between its endpoints.
pub trait EdgeCost {
    fn cost<G: Graph>(&self, graph: &G, tail: NodeIndex, head: NodeIndex) -> Distance;
}

impl EdgeCost for DistanceMethod {
    #[inline]
    fn cost<G: Graph>(&self, graph: &G, tail: NodeIndex, head: NodeIndex) -> Distance {
        self.node_distance(graph, tail, head)
    }
}

pub fn haversine(a: Coordinates, b: Coordinates) -> Distance {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let half_dlat = (lat_b - lat_a) / 2.0;
    let half_dlon = (b.lon - a.lon).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlon.sin().powi(2);
    // rounding may push h marginally past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS * h.sqrt().atan2((1.0 - h).sqrt())
}

pub fn equirectangular(a: Coordinates, b: Coordinates) -> Distance {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    // shortest way around, across the antimeridian if needed
    let dlon = ((b.lon - a.lon).to_radians() + PI).rem_euclid(2.0 * PI) - PI;
    let x = dlon * ((lat_a + lat_b) / 2.0).cos();
    let y = lat_b - lat_a;
    EARTH_RADIUS * (x * x + y * y).sqrt()
}
