pub mod cave;
pub mod part1;
pub mod part2;
pub mod render;
pub mod scan;
pub mod simulator;
