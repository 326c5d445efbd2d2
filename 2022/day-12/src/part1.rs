use miette::*;

use crate::heightmap::{Height, HeightMap};
use crate::pathfinder::Pathfinder;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let map = HeightMap::parse(input)?;
    let pathfinder = Pathfinder::new(&map.grid, Height::can_step_to);

    match pathfinder.shortest_path(map.start, map.end) {
        Some(steps) => Ok(steps.to_string()),
        None => {
            tracing::warn!(start = ?map.start, end = ?map.end, "no route to the best signal");
            Ok(String::from("unreachable"))
        }
    }
}
