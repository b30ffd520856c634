// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use anyhow::Result;
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum_macros::{AsRefStr, EnumString, EnumVariantNames};

use crate::fixture::classify::Classification;
use crate::fixture::draw::{DrawSource, Lfsr16, RandDraw};
use crate::fixture::error::FixtureError;

/// Random number generators a fixture can be drawn from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    AsRefStr,
    EnumVariantNames,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RngChoices {
    /// Thread-local, OS-seeded generator. Every run differs.
    #[strum(serialize = "thread")]
    Thread,
    /// `StdRng` seeded from `generator.seed` (0 when unset).
    #[strum(serialize = "seeded")]
    Seeded,
    /// The console's 16-bit shift register, seeded from the low 16 bits of
    /// `generator.seed`.
    #[strum(serialize = "lfsr")]
    Lfsr,
}

impl Default for RngChoices {
    fn default() -> Self {
        RngChoices::Thread
    }
}

impl RngChoices {
    /// Build the draw source this choice names.
    pub fn draw_source(self, seed: Option<u64>) -> Box<dyn DrawSource> {
        match self {
            RngChoices::Thread => Box::new(RandDraw(rand::thread_rng())),
            RngChoices::Seeded => Box::new(RandDraw(StdRng::seed_from_u64(seed.unwrap_or(0)))),
            RngChoices::Lfsr => match seed {
                Some(seed) => Box::new(RandDraw(Lfsr16::new(lfsr_seed(seed)))),
                None => Box::new(RandDraw(Lfsr16::default())),
            },
        }
    }
}

/// The shift register only holds 16 bits; wider seeds keep their low bits.
fn lfsr_seed(seed: u64) -> u16 {
    if seed > u64::from(u16::MAX) {
        warn!(
            "lfsr seed {} does not fit in 16 bits, using {}",
            seed, seed as u16
        );
    }
    seed as u16
}

/// Complete configuration, after defaults, config file, environment and
/// command line have been layered.
///
/// Every section falls back to its default, so an empty configuration
/// reproduces the stock 32x24 fixture at `src/test_level.dat`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub grid: GridConfig,
    pub draw: DrawRange,
    pub classification: Classification,
    pub generator: GeneratorSettings,
    pub output: OutputConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cells per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Wall off the first row, the outer columns and the second-to-last row.
    pub border_walls: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: 0x20,
            height: 24,
            border_walls: false,
        }
    }
}

impl GridConfig {
    /// Total number of cells, failing on empty or overflowing dimensions.
    pub fn cell_count(&self) -> Result<usize, FixtureError> {
        let invalid = FixtureError::InvalidDimensions {
            width: self.width,
            height: self.height,
        };
        match self.width.checked_mul(self.height) {
            Some(0) | None => Err(invalid),
            Some(count) => Ok(count),
        }
    }
}

/// Inclusive range every cell's draw is taken from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRange {
    pub min: u32,
    pub max: u32,
}

impl Default for DrawRange {
    fn default() -> Self {
        DrawRange { min: 0, max: 100 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub rng: RngChoices,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Fixture destination, relative to the working directory.
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from("src/test_level.dat"),
        }
    }
}

impl GeneratorConfig {
    /// Check every invariant generation relies on.
    pub fn validate(&self) -> Result<(), FixtureError> {
        self.grid.cell_count()?;
        if self.grid.border_walls && self.grid.height < 2 {
            return Err(FixtureError::GridTooShort(self.grid.height));
        }
        if self.draw.min > self.draw.max {
            return Err(FixtureError::EmptyDrawRange {
                min: self.draw.min,
                max: self.draw.max,
            });
        }
        self.classification.validate()
    }

    /// Deserialize from layered settings.
    pub fn from_settings(mut settings: config::Config) -> Result<GeneratorConfig> {
        // An untouched Config has no root table until it is refreshed.
        settings.refresh()?;
        let mut config: GeneratorConfig = settings.try_into()?;
        config.resolve_rng();
        Ok(config)
    }

    /// A seed only means something to a seedable generator, so a seed paired
    /// with the thread rng switches it to the seeded one.
    pub fn resolve_rng(&mut self) {
        if let (RngChoices::Thread, Some(seed)) = (self.generator.rng, self.generator.seed) {
            warn!(
                "seed {} given with the thread rng, drawing from the seeded rng instead",
                seed
            );
            self.generator.rng = RngChoices::Seeded;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::classify::ModRule;
    use crate::fixture::tile::Tile;
    use std::str::FromStr;
    use strum::VariantNames;

    fn settings_from_toml(contents: &str) -> config::Config {
        let mut settings = config::Config::default();
        settings
            .merge(config::File::from_str(contents, config::FileFormat::Toml))
            .unwrap();
        settings
    }

    #[test]
    fn empty_settings_give_stock_fixture() {
        let config = GeneratorConfig::from_settings(config::Config::default()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.grid.width, 32);
        assert_eq!(config.grid.height, 24);
        assert_eq!(config.grid.cell_count().unwrap(), 768);
        assert_eq!(config.draw, DrawRange { min: 0, max: 100 });
        assert_eq!(
            config.classification.rules,
            vec![ModRule::new(4, 0, Tile::Wall), ModRule::new(41, 1, Tile::Coin)]
        );
        assert_eq!(config.output.path, PathBuf::from("src/test_level.dat"));
        assert_eq!(config.generator.rng, RngChoices::Thread);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = settings_from_toml(
            r#"
            [grid]
            width = 16

            [generator]
            rng = "lfsr"
            seed = 42
            "#,
        );
        let config = GeneratorConfig::from_settings(settings).unwrap();
        assert_eq!(config.grid.width, 16);
        assert_eq!(config.grid.height, 24);
        assert_eq!(config.generator.rng, RngChoices::Lfsr);
        assert_eq!(config.generator.seed, Some(42));
        assert_eq!(config.draw, DrawRange::default());
    }

    #[test]
    fn seed_in_file_switches_thread_rng_to_seeded() {
        let settings = settings_from_toml(
            r#"
            [generator]
            seed = 5
            "#,
        );
        let config = GeneratorConfig::from_settings(settings).unwrap();
        assert_eq!(config.generator.rng, RngChoices::Seeded);
        assert_eq!(config.generator.seed, Some(5));
    }

    #[test]
    fn explicit_thread_rng_with_seed_is_seeded() {
        let settings = settings_from_toml(
            r#"
            [generator]
            rng = "thread"
            seed = 5
            "#,
        );
        let config = GeneratorConfig::from_settings(settings).unwrap();
        assert_eq!(config.generator.rng, RngChoices::Seeded);
    }

    #[test]
    fn thread_rng_without_seed_is_kept() {
        let mut config = GeneratorConfig::default();
        config.resolve_rng();
        assert_eq!(config.generator.rng, RngChoices::Thread);
        assert_eq!(config.generator.seed, None);
    }

    #[test]
    fn wide_lfsr_seed_keeps_low_bits() {
        assert_eq!(lfsr_seed(1), 1);
        assert_eq!(lfsr_seed(65537), 1);
        assert_eq!(lfsr_seed(u64::from(u16::MAX)), u16::MAX);
    }

    #[test]
    fn rules_can_be_replaced() {
        let settings = settings_from_toml(
            r#"
            [[classification.rules]]
            modulus = 3
            remainder = 2
            tile = "coin"
            "#,
        );
        let config = GeneratorConfig::from_settings(settings).unwrap();
        assert_eq!(
            config.classification.rules,
            vec![ModRule::new(3, 2, Tile::Coin)]
        );
    }

    #[test]
    fn unknown_tile_name_is_err() {
        let settings = settings_from_toml(
            r#"
            [[classification.rules]]
            modulus = 3
            remainder = 2
            tile = "lava"
            "#,
        );
        GeneratorConfig::from_settings(settings).unwrap_err();
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let mut config = GeneratorConfig::default();
        config.grid.width = 0;
        assert_eq!(
            config.validate(),
            Err(FixtureError::InvalidDimensions {
                width: 0,
                height: 24
            })
        );

        let mut config = GeneratorConfig::default();
        config.grid.width = usize::MAX;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.draw = DrawRange { min: 10, max: 5 };
        assert_eq!(
            config.validate(),
            Err(FixtureError::EmptyDrawRange { min: 10, max: 5 })
        );

        let mut config = GeneratorConfig::default();
        config.grid.height = 1;
        config.grid.border_walls = true;
        assert_eq!(config.validate(), Err(FixtureError::GridTooShort(1)));
    }

    #[test]
    fn rng_choices_parse_from_cli_names() {
        assert_eq!(RngChoices::VARIANTS, &["thread", "seeded", "lfsr"]);
        assert_eq!(RngChoices::from_str("lfsr").unwrap(), RngChoices::Lfsr);
        assert_eq!(RngChoices::Seeded.as_ref(), "seeded");
        RngChoices::from_str("mersenne").unwrap_err();
    }

    #[test]
    fn seeded_sources_repeat() {
        for choice in [RngChoices::Seeded, RngChoices::Lfsr].iter() {
            let mut a = choice.draw_source(Some(9));
            let mut b = choice.draw_source(Some(9));
            let xs: Vec<u32> = (0..64).map(|_| a.draw(0, 100)).collect();
            let ys: Vec<u32> = (0..64).map(|_| b.draw(0, 100)).collect();
            assert_eq!(xs, ys);
        }
    }
}
