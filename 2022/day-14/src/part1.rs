use miette::*;

use crate::cave::Variant;
use crate::scan::Scan;
use crate::simulator::Simulation;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let scan = Scan::parse(input)?;
    let settled = Simulation::new(&scan, Variant::Abyss).run();
    Ok(settled.to_string())
}
