// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! The byte-per-cell tile encoding used by level fixtures.

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// The type of a single grid cell.
///
/// Each tile is stored as exactly one byte in a fixture file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    /// Nothing in the cell, `0x00`.
    Empty,
    /// Solid wall, `0x01`.
    Wall,
    /// Collectible coin, `0x02`.
    Coin,
}

impl Tile {
    /// All tiles, ordered by their byte value.
    pub const ALL: [Tile; 3] = [Tile::Empty, Tile::Wall, Tile::Coin];

    pub fn as_byte(self) -> u8 {
        match self {
            Tile::Empty => 0x00,
            Tile::Wall => 0x01,
            Tile::Coin => 0x02,
        }
    }

    /// Character used when drawing a grid as text.
    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Wall => '#',
            Tile::Coin => 'o',
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}

impl TryFrom<u8> for Tile {
    type Error = u8;

    /// Fails with the unrecognized byte.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Tile::Empty),
            0x01 => Ok(Tile::Wall),
            0x02 => Ok(Tile::Coin),
            other => Err(other),
        }
    }
}
