pub mod astar;
pub mod dijkstra;
