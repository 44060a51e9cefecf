//! Lineup providers drawing personas from debate file pools

mod picker;

pub use picker::{ModelSelection, PersonaPicker};
