use std::io::{BufRead, Write};

use chrono::prelude::*;
use parlor_core as game;
use parlor_protocol::{self as protocol, ScoreSubmission};

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Arrow(game::Direction),
    /// Slide the tile carrying this number.
    Tile(game::CellValue),
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        use game::Direction::*;

        match line.trim() {
            "w" | "up" => Some(Self::Arrow(Up)),
            "s" | "down" => Some(Self::Arrow(Down)),
            "a" | "left" => Some(Self::Arrow(Left)),
            "d" | "right" => Some(Self::Arrow(Right)),
            "q" | "quit" => Some(Self::Quit),
            other => other.parse().ok().map(Self::Tile),
        }
    }
}

/// Terminal front-end for the sliding puzzle, tracking the clock around the engine.
#[derive(Debug)]
pub(crate) struct PuzzleSession {
    engine: game::SlideEngine,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl PuzzleSession {
    pub(crate) fn new(engine: game::SlideEngine) -> Self {
        Self {
            engine,
            started_at: None,
            ended_at: None,
        }
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn on_successful_move(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.engine.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }

    /// Runs until the board is solved or input ends, returning the final score if solved.
    pub(crate) fn play(
        mut self,
        input: impl BufRead,
        mut out: impl Write,
    ) -> anyhow::Result<Option<ScoreSubmission>> {
        writeln!(
            out,
            "Type a tile number or an arrow (w/a/s/d) to slide, q to quit."
        )?;
        self.render(&mut out, Utc::now())?;

        for line in input.lines() {
            let line = line?;
            let Some(command) = Command::parse(&line) else {
                writeln!(out, "Unknown command {:?}", line.trim())?;
                continue;
            };

            let result = match command {
                Command::Quit => break,
                Command::Arrow(direction) => self.engine.slide_toward(direction),
                Command::Tile(value) => match self.index_of(value) {
                    Some(index) => self.engine.slide(index),
                    None => Err(game::GameError::InvalidMove),
                },
            };

            let now = Utc::now();
            match result {
                Ok(outcome) => {
                    self.on_successful_move(now);
                    self.render(&mut out, now)?;
                    if outcome.is_solved() {
                        return self.finish(&mut out, now).map(Some);
                    }
                }
                Err(err) => {
                    log::debug!("{:?} rejected: {}", command, err);
                    writeln!(out, "That tile cannot move.")?;
                }
            }
        }

        Ok(None)
    }

    fn index_of(&self, value: game::CellValue) -> Option<game::CellIndex> {
        if value == 0 {
            return None;
        }
        self.engine
            .cells()
            .iter()
            .position(|&cell| cell == value)
            .map(|index| index as game::CellIndex)
    }

    fn finish(&self, out: &mut impl Write, now: DateTime<Utc>) -> anyhow::Result<ScoreSubmission> {
        let time_in_seconds = self.elapsed_secs(now);
        let moves = self.engine.move_count();
        writeln!(
            out,
            "Solved in {} moves, time {}.",
            moves,
            protocol::format_timer(time_in_seconds)
        )?;

        let submission = ScoreSubmission::Puzzle {
            moves,
            time_in_seconds,
        };
        log::info!("score submission: {}", protocol::to_json(&submission)?);
        Ok(submission)
    }

    fn render(&self, out: &mut impl Write, now: DateTime<Utc>) -> anyhow::Result<()> {
        let size = usize::from(self.engine.size());
        for (row_index, row) in self.engine.cells().chunks(size).enumerate() {
            let cells: Vec<_> = row
                .iter()
                .enumerate()
                .map(|(col, &value)| {
                    let index = (row_index * size + col) as game::CellIndex;
                    match value {
                        0 => "  .".to_owned(),
                        _ if self.engine.is_in_place(index) => format!("{:>2}*", value),
                        _ => format!("{:>2} ", value),
                    }
                })
                .collect();
            writeln!(out, "{}", cells.join(" "))?;
        }
        writeln!(
            out,
            "Moves: {}  Time: {}",
            self.engine.move_count(),
            protocol::format_timer(self.elapsed_secs(now))
        )?;
        Ok(())
    }
}
