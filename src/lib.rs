pub mod algo;
pub mod builder;
pub mod cli;
pub mod codec;
pub mod distance;
pub mod error;
pub mod frontier;
pub mod io;
pub mod parser;
pub mod report;
pub mod time;
pub mod timestamped_vector;
pub mod types;
