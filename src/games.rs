//! Per-game input layouts.
//!
//! Each game defines an init record, read once before the first turn, and a
//! turn record, read fresh every turn. The layouts are fixed by the game
//! referee; token order is significant.
//!
//! - [`Gateway`]: graph with exit gateways, one agent position per turn
//! - [`Pellets`]: grid maze with pacs and pellets
//! - [`Mines`]: territory map with gold, buildings, and units

mod gateway;
mod mines;
mod pellets;

pub use gateway::{Gateway, GatewayInit, GatewayTurn};
pub use mines::{Building, Mines, MinesInit, MinesTurn, Position, TERRAIN_ROWS, Unit};
pub use pellets::{Pac, Pellet, Pellets, PelletsInit, PelletsTurn};

use crate::error::ParseError;
use crate::input::TokenReader;
use serde::Serialize;
use std::fmt::Debug;
use std::io::BufRead;

/// A game's stdin layout.
pub trait Game {
    /// Static data read once at startup.
    type Init: Serialize + Debug;
    /// Variable data read every turn.
    type Turn: Serialize + Debug;

    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    /// Read the init block.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is truncated or malformed.
    fn read_init<R: BufRead>(&self, reader: &mut TokenReader<R>)
    -> Result<Self::Init, ParseError>;

    /// Read one turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is truncated or malformed.
    fn read_turn<R: BufRead>(&self, reader: &mut TokenReader<R>)
    -> Result<Self::Turn, ParseError>;
}
