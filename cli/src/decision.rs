use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use parlor_core as game;
use parlor_protocol::{self as protocol, ScoreSubmission};

const TILES_PER_ROW: usize = 6;

/// Pause before the forced last tile is accepted on the player's behalf.
const AUTO_ACCEPT_DELAY: Duration = Duration::from_millis(800);

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Reveal(game::TileId),
    Accept,
    Reject,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "a" | "accept" => Some(Self::Accept),
            "r" | "reject" => Some(Self::Reject),
            "q" | "quit" => Some(Self::Quit),
            other => other.parse().ok().map(Self::Reveal),
        }
    }
}

/// Terminal front-end for the stopping game.
#[derive(Debug)]
pub(crate) struct DecisionSession {
    engine: game::StoppingEngine,
    auto_accept_delay: Duration,
}

impl DecisionSession {
    pub(crate) fn new(engine: game::StoppingEngine) -> Self {
        Self {
            engine,
            auto_accept_delay: AUTO_ACCEPT_DELAY,
        }
    }

    /// Runs until a tile is accepted or input ends, returning the decision if any.
    pub(crate) fn play(
        mut self,
        input: impl BufRead,
        mut out: impl Write,
    ) -> anyhow::Result<Option<game::Decision>> {
        writeln!(out, "Click any tile to begin: type its number, then [a]ccept or [r]eject.")?;
        self.render(&mut out)?;

        for line in input.lines() {
            let line = line?;
            let Some(command) = Command::parse(&line) else {
                writeln!(out, "Unknown command {:?}", line.trim())?;
                continue;
            };

            let result = match command {
                Command::Quit => break,
                Command::Reveal(tile_id) => self.reveal(tile_id, &mut out),
                Command::Reject => self.reject(&mut out),
                Command::Accept => self.accept(&mut out),
            };

            match result {
                Ok(Some(decision)) => return Ok(Some(decision)),
                Ok(None) => self.render(&mut out)?,
                Err(err) if err.is::<game::GameError>() => {
                    log::debug!("{:?} rejected: {}", command, err);
                    writeln!(out, "Not allowed right now.")?;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(None)
    }

    fn reveal(
        &mut self,
        tile_id: game::TileId,
        out: &mut impl Write,
    ) -> anyhow::Result<Option<game::Decision>> {
        let outcome = self.engine.reveal(tile_id)?;
        let value = self.engine.pending_tile().map(game::Tile::value).unwrap_or_default();

        if outcome.is_forced() {
            writeln!(out, "Last tile! You must accept {}.", value)?;
            thread::sleep(self.auto_accept_delay);
            return self.accept(out);
        }

        writeln!(out, "You found {}. Accept or Reject?", value)?;
        writeln!(out, "{} tiles remaining.", self.engine.remaining())?;
        Ok(None)
    }

    fn reject(&mut self, out: &mut impl Write) -> anyhow::Result<Option<game::Decision>> {
        self.engine.reject()?;
        writeln!(out, "Tile rejected. Keep looking...")?;
        Ok(None)
    }

    fn accept(&mut self, out: &mut impl Write) -> anyhow::Result<Option<game::Decision>> {
        let decision = self.engine.accept()?;

        if decision.did_win {
            writeln!(out, "You Win! You found the best tile: {}!", decision.best_value)?;
        } else {
            writeln!(
                out,
                "You Lost. You picked {}. The best was {}.",
                decision.accepted_value, decision.best_value
            )?;
        }
        self.render(out)?;

        let submission = ScoreSubmission::DecisionPoint {
            did_win: decision.did_win,
            accepted_value: decision.accepted_value,
            best_value: decision.best_value,
        };
        log::info!("score submission: {}", protocol::to_json(&submission)?);

        Ok(Some(decision))
    }

    fn render(&self, out: &mut impl Write) -> anyhow::Result<()> {
        for row in self.engine.tiles().chunks(TILES_PER_ROW) {
            let cells: Vec<_> = row.iter().map(|tile| self.cell_label(tile)).collect();
            writeln!(out, "{}", cells.join(" "))?;
        }
        Ok(())
    }

    fn cell_label(&self, tile: &game::Tile) -> String {
        use game::TileState::*;

        let is_over = self.engine.is_over();
        match tile.state() {
            Accepted => format!("<{:>3}>", tile.value()),
            _ if is_over && tile.value() == self.engine.best_value() => {
                format!("!{:>3}!", tile.value())
            }
            Hidden if is_over => format!(" {:>3} ", tile.value()),
            Hidden => format!("[{:>3}]", tile.id()),
            Revealed => format!("({:>3})", tile.value()),
            Rejected => format!(" ~{:>3}", tile.value()),
        }
    }
}
