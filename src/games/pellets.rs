//! Grid game: pacs collecting pellets in a maze.

use super::Game;
use crate::error::ParseError;
use crate::input::TokenReader;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// The grid/pellets game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pellets;

/// Maze layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PelletsInit {
    /// Grid width.
    pub width: i32,
    /// Grid height, also the number of rows.
    pub height: usize,
    /// Raw rows: `' '` is floor, `'#'` is wall.
    pub rows: Vec<String>,
}

/// A visible pac.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pac {
    /// Pac id, unique per player.
    pub pac_id: i32,
    /// Whether this pac belongs to us.
    pub mine: bool,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// `ROCK`, `PAPER`, `SCISSORS`, or `DEAD`.
    pub type_id: String,
    /// Turns of speed boost left.
    pub speed_turns_left: i32,
    /// Turns until an ability can be used again.
    pub ability_cooldown: i32,
}

/// A visible pellet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pellet {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Points awarded.
    pub value: i32,
}

/// Visible state for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PelletsTurn {
    /// Our score.
    pub my_score: i32,
    /// Opponent score.
    pub opponent_score: i32,
    /// Number of pacs in sight.
    pub visible_pac_count: usize,
    /// Pacs in sight.
    pub pacs: Vec<Pac>,
    /// Number of pellets in sight.
    pub visible_pellet_count: usize,
    /// Pellets in sight.
    pub pellets: Vec<Pellet>,
}

impl Game for Pellets {
    type Init = PelletsInit;
    type Turn = PelletsTurn;

    fn name(&self) -> &'static str {
        "pellets"
    }

    fn read_init<R: BufRead>(&self, reader: &mut TokenReader<R>) -> Result<PelletsInit, ParseError> {
        let mut size = reader.fields("grid size")?;
        let width = size.int("width")?;
        let height = size.count("height")?;
        let rows = reader.rows(height, "row")?;
        Ok(PelletsInit {
            width,
            height,
            rows,
        })
    }

    fn read_turn<R: BufRead>(&self, reader: &mut TokenReader<R>) -> Result<PelletsTurn, ParseError> {
        let mut scores = reader.fields("scores")?;
        let my_score = scores.int("myScore")?;
        let opponent_score = scores.int("opponentScore")?;

        let visible_pac_count = reader.count("visiblePacCount")?;
        let pacs = (0..visible_pac_count)
            .map(|_| {
                let mut pac = reader.fields("pac")?;
                Ok(Pac {
                    pac_id: pac.int("pacId")?,
                    mine: pac.flag("mine")?,
                    x: pac.int("x")?,
                    y: pac.int("y")?,
                    type_id: pac.word("typeId")?,
                    speed_turns_left: pac.int("speedTurnsLeft")?,
                    ability_cooldown: pac.int("abilityCooldown")?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        let visible_pellet_count = reader.count("visiblePelletCount")?;
        let pellets = (0..visible_pellet_count)
            .map(|_| {
                let mut pellet = reader.fields("pellet")?;
                Ok(Pellet {
                    x: pellet.int("x")?,
                    y: pellet.int("y")?,
                    value: pellet.int("value")?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(PelletsTurn {
            my_score,
            opponent_score,
            visible_pac_count,
            pacs,
            visible_pellet_count,
            pellets,
        })
    }
}
