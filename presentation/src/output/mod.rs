//! Terminal output: live debate rendering and batch statistics

pub mod console;
pub mod stats;
pub(crate) mod style;
mod wrap;

pub use console::ConsoleListener;
pub use stats::StatsFormatter;
