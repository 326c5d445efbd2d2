use miette::*;

use crate::cave::Variant;
use crate::scan::Scan;
use crate::simulator::Simulation;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let scan = Scan::parse(input)?;
    let settled = Simulation::new(&scan, Variant::Floor).run();
    Ok(settled.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "498,4 -> 498,6 -> 496,6
503,4 -> 502,4 -> 502,9 -> 494,9";
        assert_eq!("93", process(input)?);
        Ok(())
    }
}
