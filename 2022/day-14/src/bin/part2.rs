use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use miette::*;

use aoc2022_day_14::cave::Variant;
use aoc2022_day_14::part2;
use aoc2022_day_14::render;
use aoc2022_day_14::scan::Scan;
use aoc2022_day_14::simulator::Simulation;

#[derive(Parser, Debug)]
#[command(about = "Units of sand at rest once the source is blocked")]
struct Args {
    /// Watch the simulation in the terminal (space: pause/resume, wasd: scroll, q: quit)
    #[arg(short, long)]
    display: bool,
    /// Milliseconds to wait between rendered frames
    #[arg(long, default_value_t = 0)]
    delay: u64,
    /// Path to the puzzle input, `-` for standard input
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let input = aoc_common::read_input(&args.input)?;

    let result = if args.display {
        let scan = Scan::parse(&input)?;
        let mut simulation = Simulation::new(&scan, Variant::Floor);
        render::play(&mut simulation, Duration::from_millis(args.delay))?.to_string()
    } else {
        part2::process(&input)?
    };

    println!("--- Part Two ---");
    println!("Using your scan, simulate the falling sand until the source of the sand becomes blocked. How many units of sand come to rest?");
    println!("Result: {}", result);
    Ok(())
}
