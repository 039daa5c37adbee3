//! Pack calculator: picks the combination of fixed-size packs that covers an
//! order with the least overshoot, then the fewest packs, and serves it over HTTP.

pub mod config;
pub mod error;
pub mod server;
pub mod solver;

pub use config::ConfigError;
pub use error::AppError;
pub use solver::{solve, PackSelection, PackSizes};
