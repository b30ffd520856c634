// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! The fixture buffer: a row-major grid of tiles.

use std::collections::BTreeMap;
use std::convert::TryFrom;

use super::draw::DrawSource;
use super::error::FixtureError;
use super::tile::Tile;
use crate::app_config::GeneratorConfig;

/// A `width` x `height` grid of tiles stored row-major, one byte per cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Generate a grid by taking one draw per cell, in index order, and
    /// classifying it.
    ///
    /// The configuration is validated before the first draw.
    pub fn generate<S>(config: &GeneratorConfig, source: &mut S) -> Result<TileGrid, FixtureError>
    where
        S: DrawSource + ?Sized,
    {
        config.validate()?;
        let count = config.grid.cell_count()?;
        let (min, max) = (config.draw.min, config.draw.max);

        let tiles = (0..count)
            .map(|_| config.classification.classify(source.draw(min, max)))
            .collect();

        let mut grid = TileGrid {
            width: config.grid.width,
            height: config.grid.height,
            tiles,
        };
        if config.grid.border_walls {
            grid.wall_borders();
        }
        Ok(grid)
    }

    /// Load a grid from raw fixture bytes.
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<TileGrid, FixtureError> {
        let expected = width
            .checked_mul(height)
            .filter(|count| *count > 0)
            .ok_or(FixtureError::InvalidDimensions { width, height })?;
        if bytes.len() != expected {
            return Err(FixtureError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let tiles = bytes
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Tile::try_from(value).map_err(|value| FixtureError::InvalidTile { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TileGrid {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at column `x`, row `y`. Anything off the grid reads as empty.
    pub fn tile_at(&self, x: usize, y: usize) -> Tile {
        if x >= self.width || y >= self.height {
            return Tile::Empty;
        }
        self.tiles[y * self.width + x]
    }

    /// The fixture file contents.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tiles.iter().map(|tile| tile.as_byte()).collect()
    }

    /// Number of cells holding each tile. Every tile gets an entry.
    pub fn counts(&self) -> BTreeMap<u8, usize> {
        let mut counts: BTreeMap<u8, usize> =
            Tile::ALL.iter().map(|tile| (tile.as_byte(), 0)).collect();
        for tile in &self.tiles {
            *counts.entry(tile.as_byte()).or_insert(0) += 1;
        }
        counts
    }

    /// Draw the grid as text, one line per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            out.extend((0..self.width).map(|x| self.tile_at(x, y).glyph()));
            out.push('\n');
        }
        out
    }

    // Same layout the level builder stamps on: top row, both side columns and
    // the second-to-last row. The last row is left as drawn.
    fn wall_borders(&mut self) {
        let (width, height) = (self.width, self.height);
        for x in 0..width {
            self.tiles[x] = Tile::Wall;
            self.tiles[(height - 2) * width + x] = Tile::Wall;
        }
        for y in 0..height {
            self.tiles[y * width] = Tile::Wall;
            self.tiles[y * width + width - 1] = Tile::Wall;
        }
    }
}
