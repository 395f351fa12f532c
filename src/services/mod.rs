//! Business logic services.

pub mod clickup;
pub mod distribution;
pub mod summary;
pub mod tally;
