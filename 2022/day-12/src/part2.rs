use indicatif::ProgressIterator;
use miette::*;

use crate::heightmap::{Height, HeightMap};
use crate::pathfinder::Pathfinder;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let map = HeightMap::parse(input)?;
    let pathfinder = Pathfinder::new(&map.grid, Height::can_step_to);

    // Each trailhead is searched on its own; only the running minimum is kept.
    let starts = map.lowest_points().collect::<Vec<_>>();
    let fewest = starts
        .into_iter()
        .progress()
        .filter_map(|start| {
            let steps = pathfinder.shortest_path(start, map.end);
            if steps.is_none() {
                tracing::debug!(?start, "no route from trailhead");
            }
            steps
        })
        .min();

    match fewest {
        Some(steps) => Ok(steps.to_string()),
        None => {
            tracing::warn!(end = ?map.end, "no elevation 'a' square reaches the best signal");
            Ok(String::from("unreachable"))
        }
    }
}
