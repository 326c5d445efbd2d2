pub mod grid;
pub mod input;

pub use grid::Grid;
pub use input::read_input;
