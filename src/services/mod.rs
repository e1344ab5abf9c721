pub mod aggregator;
pub mod team_resolver;

pub use aggregator::*;
pub use team_resolver::*;
