// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! Mapping from a random draw to a tile.

use log::warn;
use serde::{Deserialize, Serialize};

use super::error::FixtureError;
use super::tile::Tile;

/// One modulo check: a draw `r` matches when `r % modulus == remainder`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRule {
    pub modulus: u32,
    pub remainder: u32,
    pub tile: Tile,
}

impl ModRule {
    pub fn new(modulus: u32, remainder: u32, tile: Tile) -> Self {
        ModRule {
            modulus,
            remainder,
            tile,
        }
    }

    fn matches(&self, draw: u32) -> bool {
        draw % self.modulus == self.remainder
    }
}

/// An ordered list of [ModRule]s. The first matching rule wins and a draw
/// matching nothing is [Tile::Empty].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    pub rules: Vec<ModRule>,
}

impl Default for Classification {
    fn default() -> Self {
        Classification {
            rules: vec![ModRule::new(4, 0, Tile::Wall), ModRule::new(41, 1, Tile::Coin)],
        }
    }
}

impl Classification {
    /// Reject rules that would divide by zero.
    pub fn validate(&self) -> Result<(), FixtureError> {
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.modulus == 0 {
                return Err(FixtureError::ZeroModulus(i));
            }
            if rule.remainder >= rule.modulus {
                warn!(
                    "classification rule {} can never match: remainder {} >= modulus {}",
                    i, rule.remainder, rule.modulus
                );
            }
        }
        Ok(())
    }

    pub fn classify(&self, draw: u32) -> Tile {
        self.rules
            .iter()
            .find(|rule| rule.matches(draw))
            .map(|rule| rule.tile)
            .unwrap_or(Tile::Empty)
    }
}
