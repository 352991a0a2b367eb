//! Territory game: gold, mine spots, buildings, and units on a 12x12 map.

use super::Game;
use crate::error::ParseError;
use crate::input::TokenReader;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// Number of terrain rows sent every turn.
pub const TERRAIN_ROWS: usize = 12;

/// The mines/economy game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mines;

/// A map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Mine spots on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinesInit {
    /// Number of mine spots.
    pub number_mine_spots: usize,
    /// Mine spot positions.
    pub mines: Vec<Position>,
}

/// A building on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    /// 0 for us, 1 for the opponent.
    pub owner: i32,
    /// 0 headquarters, 1 mine, 2 tower.
    pub building_type: i32,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// A unit on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// 0 for us, 1 for the opponent.
    pub owner: i32,
    /// Unit id.
    pub unit_id: i32,
    /// Unit level, 1 to 3.
    pub level: i32,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// State for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinesTurn {
    /// Our gold.
    pub gold: i32,
    /// Our income.
    pub income: i32,
    /// Opponent gold.
    pub opponent_gold: i32,
    /// Opponent income.
    pub opponent_income: i32,
    /// Raw terrain rows, [`TERRAIN_ROWS`] of them.
    pub terrain: Vec<String>,
    /// Number of buildings.
    pub building_count: usize,
    /// Buildings.
    pub buildings: Vec<Building>,
    /// Number of units.
    pub unit_count: usize,
    /// Units.
    pub units: Vec<Unit>,
}

impl Game for Mines {
    type Init = MinesInit;
    type Turn = MinesTurn;

    fn name(&self) -> &'static str {
        "mines"
    }

    fn read_init<R: BufRead>(&self, reader: &mut TokenReader<R>) -> Result<MinesInit, ParseError> {
        let number_mine_spots = reader.count("numberMineSpots")?;
        let mines = (0..number_mine_spots)
            .map(|_| {
                let mut spot = reader.fields("mine spot")?;
                Ok(Position {
                    x: spot.int("x")?,
                    y: spot.int("y")?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(MinesInit {
            number_mine_spots,
            mines,
        })
    }

    fn read_turn<R: BufRead>(&self, reader: &mut TokenReader<R>) -> Result<MinesTurn, ParseError> {
        let gold = reader.int("gold")?;
        let income = reader.int("income")?;
        let opponent_gold = reader.int("opponentGold")?;
        let opponent_income = reader.int("opponentIncome")?;

        let terrain = reader.rows(TERRAIN_ROWS, "terrain")?;

        let building_count = reader.count("buildingCount")?;
        let buildings = (0..building_count)
            .map(|_| {
                let mut building = reader.fields("building")?;
                Ok(Building {
                    owner: building.int("owner")?,
                    building_type: building.int("buildingType")?,
                    x: building.int("x")?,
                    y: building.int("y")?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        let unit_count = reader.count("unitCount")?;
        let units = (0..unit_count)
            .map(|_| {
                let mut unit = reader.fields("unit")?;
                Ok(Unit {
                    owner: unit.int("owner")?,
                    unit_id: unit.int("unitId")?,
                    level: unit.int("level")?,
                    x: unit.int("x")?,
                    y: unit.int("y")?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(MinesTurn {
            gold,
            income,
            opponent_gold,
            opponent_income,
            terrain,
            building_count,
            buildings,
            unit_count,
            units,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn terrain() -> String {
        "O...........\n".repeat(TERRAIN_ROWS)
    }

    #[test]
    fn test_read_turn_with_entities() {
        let input = format!("20\n3\n15\n2\n{}2\n0 0 0 0\n1 2 11 11\n1\n0 7 1 1 0\n", terrain());
        let mut reader = TokenReader::new(Cursor::new(input));
        let turn = Mines.read_turn(&mut reader).unwrap();
        assert_eq!(turn.gold, 20);
        assert_eq!(turn.terrain.len(), TERRAIN_ROWS);
        assert_eq!(turn.buildings[1], Building { owner: 1, building_type: 2, x: 11, y: 11 });
        assert_eq!(turn.units, vec![Unit { owner: 0, unit_id: 7, level: 1, x: 1, y: 0 }]);
        assert!(reader.at_eof().unwrap());
    }

    #[test]
    fn test_missing_terrain_row() {
        let input = format!("20\n3\n15\n2\n{}", "O...........\n".repeat(TERRAIN_ROWS - 1));
        let mut reader = TokenReader::new(Cursor::new(input));
        let err = Mines.read_turn(&mut reader).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { line: 16, field: "terrain" }));
    }
}
