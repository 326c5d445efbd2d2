use std::path::PathBuf;

use clap::Parser;
use miette::*;

use aoc2022_day_12::part2;

#[derive(Parser, Debug)]
#[command(about = "Fewest steps from any elevation 'a' square to the best signal")]
struct Args {
    /// Path to the puzzle input, `-` for standard input
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let input = aoc_common::read_input(&args.input)?;

    println!("--- Part Two ---");
    println!("What is the fewest steps required to move starting from any square with elevation a to the location that should get the best signal?");
    let result = part2::process(&input)?;
    println!("Result: {}", result);
    Ok(())
}
