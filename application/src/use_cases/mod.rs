//! Use cases (application services)

pub mod participant;
pub mod run_batch;
pub mod run_debate;
pub mod verdict;
