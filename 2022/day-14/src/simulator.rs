use aoc_common::Grid;
use glam::IVec2;
use strum::{EnumIter, IntoEnumIterator};

use crate::cave::{self, SandCell, Terrain, Variant, SOURCE};
use crate::scan::Scan;

/// Columns added on each side of the cave when a particle overflows it.
pub const GROWTH: i32 = 1;

/// Moves available to a falling particle, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Fall {
    Down,
    DownLeft,
    DownRight,
}

impl Fall {
    pub fn offset(self) -> IVec2 {
        match self {
            Fall::Down => IVec2::new(0, 1),
            Fall::DownLeft => IVec2::new(-1, 1),
            Fall::DownRight => IVec2::new(1, 1),
        }
    }
}

/// Outcome of looking one move ahead of the active particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Falling(IVec2),
    Settled,
    Overflowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A particle came to rest on the source.
    SourceBlocked,
    /// A particle left the cave with nothing below it.
    Escaped,
}

/// The one particle in motion. Coming to rest is reported by
/// [`State::Settled`]; a settled particle is written into the cave and a new
/// one takes its place at the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    pub position: IVec2,
}

impl Particle {
    fn spawn(at: IVec2) -> Self {
        Self { position: at }
    }
}

/// Falling sand, one particle at a time.
///
/// Only settled particles are written into the cave; the active particle is
/// tracked on its own.
#[derive(Debug, Clone)]
pub struct Simulation {
    cave: Grid<SandCell>,
    terrain: Terrain,
    variant: Variant,
    particle: Particle,
    settled: usize,
    termination: Option<Termination>,
}

impl Simulation {
    pub fn new(scan: &Scan, variant: Variant) -> Self {
        Self::with_source(scan, variant, SOURCE)
    }

    pub fn with_source(scan: &Scan, variant: Variant, source: IVec2) -> Self {
        let (cave, terrain) = cave::carve(scan, variant, source);
        Self {
            cave,
            terrain,
            variant,
            particle: Particle::spawn(source),
            settled: 0,
            termination: None,
        }
    }

    pub fn cave(&self) -> &Grid<SandCell> {
        &self.cave
    }

    pub fn particle(&self) -> Particle {
        self.particle
    }

    /// Particles that have come to rest so far.
    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Looks at the candidate moves of the active particle. The first air
    /// cell wins; a candidate outside the cave stops the search.
    pub fn next_state(&self) -> State {
        for fall in Fall::iter() {
            let candidate = self.particle.position + fall.offset();
            match self.cave.get(candidate) {
                None => return State::Overflowed,
                Some(SandCell::Air) => return State::Falling(candidate),
                Some(_) => {}
            }
        }
        State::Settled
    }

    /// Advances the simulation by a single transition. Once terminated,
    /// further calls change nothing.
    pub fn step(&mut self) -> Option<Termination> {
        if self.termination.is_some() {
            return self.termination;
        }

        match self.next_state() {
            State::Falling(next) => self.particle.position = next,
            State::Settled => self.settle(),
            State::Overflowed => match self.variant {
                Variant::Abyss => {
                    tracing::debug!(
                        position = ?self.particle.position,
                        settled = self.settled,
                        "particle escaped into the abyss"
                    );
                    self.termination = Some(Termination::Escaped);
                }
                // The same particle retries against the wider cave on the next step
                Variant::Floor => self.widen(),
            },
        }

        self.termination
    }

    fn settle(&mut self) {
        let position = self.particle.position;
        if let Some(cell) = self.cave.get_mut(position) {
            *cell = SandCell::Sand;
        }
        self.settled += 1;

        if position == self.terrain.source {
            tracing::debug!(settled = self.settled, "source blocked");
            self.termination = Some(Termination::SourceBlocked);
        } else {
            self.particle = Particle::spawn(self.terrain.source);
        }
    }

    fn widen(&mut self) {
        let terrain = self.terrain;
        let growth = IVec2::new(GROWTH, 0);
        let (min, max) = (self.cave.min() - growth, self.cave.max() + growth);
        self.cave.grow(min, max, |p| terrain.classify(p));
    }

    /// Runs until termination and returns the number of settled particles.
    pub fn run(&mut self) -> usize {
        self.run_with(|_| {})
    }

    /// Like [`Simulation::run`], handing a snapshot to `observe` after every
    /// step.
    #[tracing::instrument(level = "debug", skip_all, fields(variant = ?self.variant))]
    pub fn run_with(&mut self, mut observe: impl FnMut(&Self)) -> usize {
        loop {
            let termination = self.step();
            observe(self);
            if let Some(termination) = termination {
                tracing::debug!(?termination, settled = self.settled, "simulation finished");
                return self.settled;
            }
        }
    }
}
