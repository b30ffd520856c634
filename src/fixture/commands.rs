// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

use super::grid::TileGrid;
use super::tile::Tile;
use crate::app_config::GeneratorConfig;

/// Generate a fixture and write it to `config.output.path`.
///
/// Any existing file is overwritten. Missing parent directories are not
/// created, so writing into one fails.
pub fn generate_fixture(config: &GeneratorConfig) -> Result<TileGrid> {
    debug!(
        "generating {}x{} grid with {:?} rng",
        config.grid.width, config.grid.height, config.generator.rng
    );
    let mut source = config.generator.rng.draw_source(config.generator.seed);
    let grid = TileGrid::generate(config, source.as_mut())?;

    write_fixture(&grid, &config.output.path)?;
    Ok(grid)
}

/// Write the grid's bytes verbatim, no header.
pub fn write_fixture(grid: &TileGrid, path: &Path) -> Result<()> {
    let bytes = grid.to_bytes();
    fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Load and validate a fixture using the configured grid dimensions.
pub fn load_fixture(config: &GeneratorConfig, path: &Path) -> Result<TileGrid> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    let grid = TileGrid::from_bytes(config.grid.width, config.grid.height, &bytes)
        .with_context(|| format!("loading fixture {}", path.display()))?;
    Ok(grid)
}

/// Summarize a fixture: dimensions, per-tile counts and, optionally, a map.
pub fn inspect_fixture(config: &GeneratorConfig, path: &Path, render: bool) -> Result<String> {
    let grid = load_fixture(config, path)?;
    let counts = grid.counts();

    let mut report = format!("{}: {}x{}\n", path.display(), grid.width(), grid.height());
    for tile in Tile::ALL.iter() {
        report.push_str(&format!(
            "{:?} ({:#04x}): {}\n",
            tile,
            tile.as_byte(),
            counts[&tile.as_byte()]
        ));
    }
    if render {
        report.push_str(&grid.render());
    }
    Ok(report)
}

/// Show the effective configuration
pub fn print_config(config: &GeneratorConfig) -> Result<()> {
    println!("{}", toml::to_string(config)?);

    Ok(())
}
