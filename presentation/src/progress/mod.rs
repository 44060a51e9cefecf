//! Progress reporting for batch runs

pub mod reporter;
