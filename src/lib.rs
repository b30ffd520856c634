//! Tilegen is a Command Line Interface (CLI) for generating tile-grid level
//! fixtures: small binary files holding one byte per grid cell, used as test
//! data by the level loader.
//!
//! # Usage
//!
//! View CLI help with `tilegen help` or `tilegen help <subcommand>`.
//!
//! Tilegen is intended to be used as a binary.
//!
//! ## Fixture format
//!
//! A fixture is a raw, row-major dump of the grid with no header and no length
//! prefix. The stock fixture is 32 cells wide and 24 rows tall, 768 bytes in
//! total. Every byte is one of:
//!
//! | Byte   | Tile  |
//! |-       |-      |
//! | `0x00` | empty |
//! | `0x01` | wall  |
//! | `0x02` | coin  |
//!
//! Each cell takes a uniform random draw `r` from `[0, 100]`. If `r % 4 == 0`
//! the cell is a wall, otherwise if `r % 41 == 1` it is a coin, otherwise it
//! is empty. The rules are checked in that order.
//!
//! ## Configuration
//!
//! Tilegen needs no configuration; with none it writes the stock fixture to
//! `src/test_level.dat` relative to the working directory. Settings are
//! layered, later layers winning:
//!
//! - built-in defaults,
//! - `tilegen.toml` in the working directory if it exists, or the file given
//!   with `--config path/to/tilegen.toml`,
//! - environment variables prefixed with `TILEGEN_`, using `__` to reach into
//!   sections (e.g. `TILEGEN_GRID__WIDTH=16`),
//! - command-line flags of the `generate` subcommand.
//!
//! A complete configuration file looks like:
//!
//! ```toml
//! [grid]
//! width = 32
//! height = 24
//! border_walls = false
//!
//! [draw]
//! min = 0
//! max = 100
//!
//! [[classification.rules]]
//! modulus = 4
//! remainder = 0
//! tile = "wall"
//!
//! [[classification.rules]]
//! modulus = 41
//! remainder = 1
//! tile = "coin"
//!
//! [generator]
//! rng = "thread"  # or "seeded", "lfsr"
//! seed = 1234     # optional
//!
//! [output]
//! path = "src/test_level.dat"
//! ```
//!
//! ## Commands
//!
//! ```tilegen [generate] [-o PATH] [-s SEED] [-r RNG]```
//!
//! Generates a fixture and writes it, overwriting any existing file. The
//! parent directory must already exist. Giving a seed switches the default
//! thread-local generator to a seeded one, so the same seed always produces
//! the same file.
//!
//! ```tilegen inspect [FILE] [--render]```
//!
//! Checks that a fixture has the configured size and only known tile bytes,
//! then prints how many cells hold each tile. `--render` also prints the grid
//! with `.` for empty, `#` for wall and `o` for coin.
//!
//! ```tilegen config```
//!
//! Echoes the effective configuration (with any overrides applied) and exits.
//!
//! ## Examples
//!
//! ```shell
//! # Write the stock fixture to src/test_level.dat
//! tilegen
//!
//! # Reproducible fixture somewhere else
//! tilegen generate --seed 42 --output fixtures/level.dat
//!
//! # Draw with the console's shift register instead
//! tilegen generate --rng lfsr
//!
//! # Look at what was generated
//! tilegen inspect --render
//! ```
//!
//! # Troubleshooting
//!
//! Set `RUST_LOG=debug` to see the configuration and random source in use.
//!
//! | Error                                    | Resolution                                                                        |
//! |-                                         |-                                                                                  |
//! | writing src/test_level.dat               | The output directory does not exist or is not writable. Create it or use `-o`.   |
//! | fixture should be N bytes long, found M  | The file was generated with different grid dimensions than are configured.        |
//! | invalid tile value 0x.. at index N       | The file is not a fixture, or was produced by something other than tilegen.      |

#[cfg(not(debug_assertions))]
use human_panic::setup_panic;

mod app_config;
mod cli;
mod fixture;

use anyhow::Result;

#[doc(hidden)]
/// Main entrypoint
pub fn run() -> Result<()> {
    // Human Panic. Only enabled when *not* debugging.
    //
    // Example of what panic message looks like:
    // https://docs.rs/human-panic/1.0.3/human_panic/
    #[cfg(not(debug_assertions))]
    {
        setup_panic!();
    }

    // Better Panic. Only enabled *when* debugging.
    #[cfg(debug_assertions)]
    {
        better_panic::Settings::debug()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .install();
    }

    env_logger::init();

    // Get CLI arguments and flags (one may have provided the config file to use)
    let cli_matches = cli::cli_config()?;

    let mut settings = config::Config::default();
    // Use cmdline arg config file if provided, otherwise pick up tilegen.toml
    // from the working directory when there is one
    if let Some(config_file) = cli_matches.get_one::<String>("config") {
        settings.merge(config::File::with_name(&shellexpand::tilde(config_file)))?;
    } else {
        settings.merge(config::File::with_name("tilegen").required(false))?;
    }

    // Override with environment variables, if present
    // Example of overriding: TILEGEN_GRID__WIDTH=16
    // (Note double underscore to reach into lower struct levels!)
    settings.merge(config::Environment::with_prefix("TILEGEN").separator("__"))?;

    // Match against CLI subcommands, which delegate to functions
    cli::cli_match(settings, cli_matches)
}
