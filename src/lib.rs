pub mod config;
pub mod contract;
pub mod errors;
pub mod logs;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use contract::DroplinkedContract;
pub use state::{build_snapshot, build_snapshot_report, StateSnapshot};
