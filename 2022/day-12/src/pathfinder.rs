use std::collections::{HashMap, HashSet};

use aoc_common::Grid;
use glam::IVec2;
use itertools::Itertools;

/// Axis-aligned neighbours, in the order they are expanded.
const NEIGHBORS: [IVec2; 4] = [IVec2::Y, IVec2::X, IVec2::NEG_Y, IVec2::NEG_X];

type NodeId = usize;

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    position: IVec2,
    /// Steps taken from the start.
    g: u32,
    /// Manhattan distance left to the goal.
    h: u32,
    parent: Option<NodeId>,
}

impl SearchNode {
    /// Ordering key for open nodes. `g + h` never overestimates on unit
    /// steps, so the first closed path to the goal is a shortest one; among
    /// equally promising nodes the smaller `g * h` is expanded first.
    fn rank(&self) -> (u64, u64) {
        let (g, h) = (u64::from(self.g), u64::from(self.h));
        (g + h, g * h)
    }
}

/// Book-keeping for a single search. Nodes live in an arena and refer to
/// their parent by index.
#[derive(Debug, Default)]
struct Search {
    nodes: Vec<SearchNode>,
    /// Open nodes in discovery order.
    open: Vec<NodeId>,
    discovered: HashMap<IVec2, NodeId>,
    closed: HashSet<IVec2>,
}

impl Search {
    fn discover(&mut self, position: IVec2, g: u32, h: u32, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SearchNode {
            position,
            g,
            h,
            parent,
        });
        self.discovered.insert(position, id);
        id
    }

    fn steps_back(&self, mut id: NodeId) -> usize {
        let mut steps = 0;
        while let Some(parent) = self.nodes[id].parent {
            id = parent;
            steps += 1;
        }
        steps
    }
}

fn manhattan(a: IVec2, b: IVec2) -> u32 {
    (a - b).abs().element_sum() as u32
}

/// Best-first search over a grid where `traversable(from, to)` decides
/// whether a single step between adjacent cells is legal.
pub struct Pathfinder<'a, T, F> {
    grid: &'a Grid<T>,
    traversable: F,
}

impl<'a, T, F> Pathfinder<'a, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(grid: &'a Grid<T>, traversable: F) -> Self {
        Self { grid, traversable }
    }

    fn can_step(&self, from: IVec2, to: IVec2) -> bool {
        match (self.grid.get(from), self.grid.get(to)) {
            (Some(from), Some(to)) => (self.traversable)(from, to),
            _ => false,
        }
    }

    /// Number of steps from `start` to `goal`, or `None` when no sequence of
    /// legal steps connects them. Either end lying outside the grid counts
    /// as unreachable.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn shortest_path(&self, start: IVec2, goal: IVec2) -> Option<usize> {
        if !self.grid.contains(start) || !self.grid.contains(goal) {
            return None;
        }

        let mut search = Search::default();
        let mut current = search.discover(start, 0, 0, None);
        search.closed.insert(start);

        while search.nodes[current].position != goal {
            let SearchNode { position, g, .. } = search.nodes[current];

            for offset in NEIGHBORS {
                let next = position + offset;
                if search.closed.contains(&next) || !self.can_step(position, next) {
                    continue;
                }

                let cost = g + 1;
                let known = search.discovered.get(&next).copied();
                match known {
                    Some(id) => {
                        let node = &mut search.nodes[id];
                        if cost < node.g {
                            node.g = cost;
                            node.parent = Some(current);
                        }
                    }
                    None => {
                        let id = search.discover(next, cost, manhattan(next, goal), Some(current));
                        search.open.push(id);
                    }
                }
            }

            let Some(slot) = search
                .open
                .iter()
                .position_min_by_key(|&&id| search.nodes[id].rank())
            else {
                tracing::trace!(closed = search.closed.len(), "open set exhausted");
                return None;
            };

            current = search.open.remove(slot);
            search.closed.insert(search.nodes[current].position);
        }

        Some(search.steps_back(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use crate::heightmap::{Height, HeightMap};
    use miette::*;
    use rstest::rstest;

    const EXAMPLE: &str = "Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi";

    fn climb(from: &u8, to: &u8) -> bool {
        *to <= from + 1
    }

    /// Plain breadth-first distances used as a reference.
    fn reference_distance(grid: &Grid<u8>, start: IVec2, goal: IVec2) -> Option<usize> {
        let mut distance = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            if p == goal {
                return distance.get(&p).copied();
            }
            for offset in NEIGHBORS {
                let next = p + offset;
                let legal = match (grid.get(p), grid.get(next)) {
                    (Some(from), Some(to)) => climb(from, to),
                    _ => false,
                };
                if legal && !distance.contains_key(&next) {
                    distance.insert(next, distance[&p] + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Deterministic pseudo-random terrain with plenty of cliffs.
    fn terrain(seed: u64, size: IVec2) -> Grid<u8> {
        let mut state = seed;
        Grid::new(IVec2::ZERO, size - IVec2::ONE, |_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            [0, 0, 0, 0, 1, 2, 2, 9][(state >> 61) as usize]
        })
    }

    #[test]
    fn finds_example_route() -> Result<()> {
        let map = HeightMap::parse(EXAMPLE)?;
        let pathfinder = Pathfinder::new(&map.grid, Height::can_step_to);
        assert_eq!(pathfinder.shortest_path(map.start, map.end), Some(31));
        Ok(())
    }

    #[test]
    fn path_to_itself_is_empty() -> Result<()> {
        let map = HeightMap::parse(EXAMPLE)?;
        let pathfinder = Pathfinder::new(&map.grid, Height::can_step_to);
        for p in map.grid.positions() {
            assert_eq!(pathfinder.shortest_path(p, p), Some(0));
        }
        Ok(())
    }

    #[test]
    fn cliff_is_unreachable() -> Result<()> {
        let map = HeightMap::parse("SacdE")?;
        let pathfinder = Pathfinder::new(&map.grid, Height::can_step_to);
        assert_eq!(pathfinder.shortest_path(map.start, map.end), None);
        assert_eq!(pathfinder.shortest_path(map.end, map.start), Some(4));
        Ok(())
    }

    #[rstest]
    #[case(IVec2::new(-1, 0), IVec2::ZERO)]
    #[case(IVec2::ZERO, IVec2::new(4, 0))]
    #[case(IVec2::new(7, 7), IVec2::new(7, 7))]
    fn ends_outside_grid_are_unreachable(#[case] start: IVec2, #[case] goal: IVec2) {
        let grid = Grid::new(IVec2::ZERO, IVec2::new(3, 3), |_| 0u8);
        let pathfinder = Pathfinder::new(&grid, climb);
        assert_eq!(pathfinder.shortest_path(start, goal), None);
    }

    #[test]
    fn descends_any_distance() {
        let grid = Grid::from_rows(vec![vec![0u8, 1, 2, 3, 9]]).unwrap();
        let pathfinder = Pathfinder::new(&grid, climb);
        assert_eq!(pathfinder.shortest_path(IVec2::ZERO, IVec2::new(3, 0)), Some(3));
        assert_eq!(pathfinder.shortest_path(IVec2::ZERO, IVec2::new(4, 0)), None);
        assert_eq!(pathfinder.shortest_path(IVec2::new(4, 0), IVec2::ZERO), Some(4));
    }

    #[test]
    fn matches_breadth_first_distances() {
        let size = IVec2::new(16, 12);
        let goal = size - IVec2::ONE;
        for seed in 0..64 {
            let grid = terrain(seed, size);
            let pathfinder = Pathfinder::new(&grid, climb);
            assert_eq!(
                pathfinder.shortest_path(IVec2::ZERO, goal),
                reference_distance(&grid, IVec2::ZERO, goal),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn rank_prefers_estimate_then_product() {
        let node = |g, h| SearchNode {
            position: IVec2::ZERO,
            g,
            h,
            parent: None,
        };
        assert!(node(3, 4).rank() < node(2, 6).rank());
        assert!(node(1, 6).rank() < node(3, 4).rank());
        assert_eq!(node(u32::MAX, u32::MAX).rank().1, u64::from(u32::MAX).pow(2));
    }
}
