use std::time::Duration;

use miette::*;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{DefaultTerminal, Frame};

use crate::cave::SandCell;
use crate::simulator::Simulation;

/// How long to wait for a key while nothing is moving.
const IDLE: Duration = Duration::from_millis(50);

/// Draws the cave as text, with the falling particle shown in place and a
/// running count underneath.
pub fn snapshot(simulation: &Simulation) -> String {
    let cave = simulation.cave();
    let particle = simulation.particle();
    let falling = simulation.termination().is_none();

    let mut out = String::with_capacity(cave.len() + cave.height() + 24);
    for (p, &cell) in cave.iter() {
        if p.x == cave.min().x && p.y != cave.min().y {
            out.push('\n');
        }
        let cell = if falling && p == particle.position {
            SandCell::Sand
        } else {
            cell
        };
        out.push(cell.glyph());
    }
    out.push_str(&format!("\n{} units of sand", simulation.settled()));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Playback state of the terminal view. Starts paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub paused: bool,
    /// Rows and columns scrolled away from the top-left corner.
    pub scroll: (u16, u16),
    delay: Duration,
}

impl Viewer {
    pub fn new(delay: Duration) -> Self {
        Self {
            paused: true,
            scroll: (0, 0),
            delay,
        }
    }

    pub fn handle(&mut self, key: KeyCode) -> Control {
        let (rows, cols) = &mut self.scroll;
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('w') | KeyCode::Up => *rows = rows.saturating_sub(1),
            KeyCode::Char('s') | KeyCode::Down => *rows = rows.saturating_add(1),
            KeyCode::Char('a') | KeyCode::Left => *cols = cols.saturating_sub(1),
            KeyCode::Char('d') | KeyCode::Right => *cols = cols.saturating_add(1),
            _ => {}
        }
        Control::Continue
    }

    fn draw(&self, frame: &mut Frame, simulation: &Simulation) {
        let status = if simulation.termination().is_some() {
            "finished"
        } else if self.paused {
            "paused"
        } else {
            "running"
        };
        let block = Block::bordered()
            .title(format!(" Falling sand ({status}) "))
            .title_bottom(" space: pause/resume  wasd: scroll  q: quit ");
        let cave = Paragraph::new(snapshot(simulation))
            .block(block)
            .scroll(self.scroll);
        frame.render_widget(cave, frame.area());
    }

    fn run(&mut self, terminal: &mut DefaultTerminal, simulation: &mut Simulation) -> Result<()> {
        loop {
            terminal
                .draw(|frame| self.draw(frame, simulation))
                .into_diagnostic()?;

            let moving = !self.paused && simulation.termination().is_none();
            let wait = if moving { self.delay } else { IDLE };
            if event::poll(wait).into_diagnostic()? {
                if let Event::Key(key) = event::read().into_diagnostic()? {
                    if key.kind == KeyEventKind::Press && self.handle(key.code) == Control::Quit {
                        return Ok(());
                    }
                }
            }

            if !self.paused && simulation.termination().is_none() {
                simulation.step();
            }
        }
    }
}

/// Shows `simulation` in the terminal until the user quits, then finishes
/// whatever is left off-screen and returns the settled count.
pub fn play(simulation: &mut Simulation, delay: Duration) -> Result<usize> {
    let mut terminal = ratatui::try_init().into_diagnostic()?;
    let shown = Viewer::new(delay).run(&mut terminal, simulation);
    ratatui::restore();
    shown?;

    Ok(simulation.run())
}
