use chumsky::prelude::*;
use glam::IVec2;
use itertools::Itertools;
use miette::*;

/// A rock formation traced as a polyline of horizontal and vertical segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RockPath {
    pub corners: Vec<IVec2>,
}

impl RockPath {
    /// Every point covered by the path, corners included.
    pub fn points(&self) -> impl Iterator<Item = IVec2> + '_ {
        let first = self.corners.first().copied();
        let segments = self.corners.iter().tuple_windows().flat_map(|(&from, &to)| {
            let step = (to - from).signum();
            let length = (to - from).abs().max_element();
            (1..=length).map(move |i| from + step * i)
        });
        first.into_iter().chain(segments)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scan {
    pub paths: Vec<RockPath>,
}

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<RockPath>, extra::Err<Rich<'a, char>>> {
    let number = text::int(10)
        .from_str::<i32>()
        .try_map(|n, span| n.map_err(|e| Rich::custom(span, e)));

    // 498,4
    let point = number
        .then_ignore(just(','))
        .then(number)
        .map(|(x, y)| IVec2::new(x, y));

    // 498,4 -> 498,6 -> 496,6
    let path = point
        .separated_by(just(" -> "))
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|corners| RockPath { corners });

    path.separated_by(text::newline().repeated().at_least(1))
        .allow_leading()
        .allow_trailing()
        .collect()
}

impl Scan {
    pub fn parse(input: &str) -> Result<Self> {
        let paths = parser()
            .parse(input)
            .into_result()
            .map_err(|e| miette!("Parse failed: {:?}", e))?;

        for path in &paths {
            if let Some((from, to)) = path
                .corners
                .iter()
                .tuple_windows()
                .find(|(from, to)| from.x != to.x && from.y != to.y)
            {
                return Err(miette!(
                    "Rock segment {},{} -> {},{} is neither horizontal nor vertical",
                    from.x,
                    from.y,
                    to.x,
                    to.y
                ));
            }
        }

        Ok(Self { paths })
    }

    pub fn rocks(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.paths.iter().flat_map(RockPath::points)
    }

    /// Smallest inclusive box holding every rock and `origin`.
    pub fn bounds(&self, origin: IVec2) -> (IVec2, IVec2) {
        self.rocks()
            .fold((origin, origin), |(min, max), p| (min.min(p), max.max(p)))
    }
}
