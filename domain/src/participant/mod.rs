//! Participant domain
//!
//! - [`Persona`]: configuration record for one debater or judge
//! - [`Side`]: `for` / `against` assignment relative to a premise

mod persona;
mod side;

pub use persona::{DEFAULT_COLOR, Persona};
pub use side::Side;
