use aoc_common::Grid;
use chumsky::prelude::*;
use glam::IVec2;
use miette::*;

/// Elevation of a single square, `a` being 0 and `z` being 25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Height(u8);

impl Height {
    pub const LOWEST: Height = Height(0);
    pub const HIGHEST: Height = Height(25);

    fn from_letter(c: char) -> Self {
        Height(c as u8 - b'a')
    }

    /// A step may climb at most one unit, but may drop any distance.
    pub fn can_step_to(&self, to: &Height) -> bool {
        to.0 <= self.0 + 1
    }
}

#[derive(Debug, Clone, Copy)]
enum Square {
    Start,
    End,
    Plain(Height),
}

#[derive(Debug, Clone)]
pub struct HeightMap {
    pub grid: Grid<Height>,
    pub start: IVec2,
    pub end: IVec2,
}

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Vec<Square>>, extra::Err<Rich<'a, char>>> {
    let square = choice((
        just('S').to(Square::Start),
        just('E').to(Square::End),
        any()
            .filter(|c: &char| c.is_ascii_lowercase())
            .map(|c| Square::Plain(Height::from_letter(c))),
    ));

    square
        .repeated()
        .collect::<Vec<_>>()
        .separated_by(text::newline())
        .allow_trailing()
        .collect::<Vec<_>>()
}

impl HeightMap {
    pub fn parse(input: &str) -> Result<Self> {
        let rows = parser()
            .parse(input)
            .into_result()
            .map_err(|e| miette!("Parse failed: {:?}", e))?;

        let mut start = None;
        let mut end = None;
        let mut heights = Vec::with_capacity(rows.len());

        // Blank lines carry no squares and do not count as rows
        for row in rows.into_iter().filter(|row| !row.is_empty()) {
            let y = heights.len() as i32;
            let mut line = Vec::with_capacity(row.len());
            for (x, square) in row.into_iter().enumerate() {
                let p = IVec2::new(x as i32, y);
                let height = match square {
                    Square::Start => {
                        start = Some(p);
                        Height::LOWEST
                    }
                    Square::End => {
                        end = Some(p);
                        Height::HIGHEST
                    }
                    Square::Plain(height) => height,
                };
                line.push(height);
            }
            heights.push(line);
        }

        Ok(Self {
            grid: Grid::from_rows(heights)?,
            start: start.ok_or(miette!("No start position 'S' found in height map"))?,
            end: end.ok_or(miette!("No end position 'E' found in height map"))?,
        })
    }

    /// Every square at elevation `a`, in row-major order.
    pub fn lowest_points(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.grid
            .iter()
            .filter(|(_, &height)| height == Height::LOWEST)
            .map(|(p, _)| p)
    }
}
