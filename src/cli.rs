// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use anyhow::Result;
use clap::{crate_authors, crate_description, crate_version};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::debug;
use std::path::PathBuf;
use std::str::FromStr;
use strum::VariantNames;

use crate::app_config::{GeneratorConfig, RngChoices};
use crate::fixture::commands;

/// Match commands
pub fn cli_match(settings: config::Config, cli_matches: ArgMatches) -> Result<()> {
    let mut config = GeneratorConfig::from_settings(settings)?;
    debug!("loaded configuration {:?}", config);

    match cli_matches.subcommand() {
        Some(("config", _config_matches)) => {
            commands::print_config(&config)?;
        }
        Some(("inspect", inspect_matches)) => {
            let path = inspect_matches
                .get_one::<PathBuf>("file")
                .cloned()
                .unwrap_or_else(|| config.output.path.clone());
            let render = inspect_matches
                .get_one::<bool>("render")
                .copied()
                .unwrap_or(false);
            let report = commands::inspect_fixture(&config, &path, render)?;
            print!("{}", report);
        }
        Some(("generate", generate_matches)) => {
            apply_generate_overrides(&mut config, generate_matches)?;
            run_generate(&config)?;
        }
        None => {
            // No subcommand generates the stock fixture.
            run_generate(&config)?;
        }
        _ => {
            // Clap rejects unknown subcommands before we get here.
            unreachable!("No matching subcommand!");
        }
    }
    Ok(())
}

fn run_generate(config: &GeneratorConfig) -> Result<()> {
    let grid = commands::generate_fixture(config)?;
    println!(
        "Wrote {} bytes to {}",
        grid.width() * grid.height(),
        config.output.path.display()
    );
    Ok(())
}

/// Command-line flags win over every other configuration layer.
fn apply_generate_overrides(config: &mut GeneratorConfig, matches: &ArgMatches) -> Result<()> {
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        config.output.path = output.clone();
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.generator.seed = Some(*seed);
    }
    if let Some(rng) = matches.get_one::<String>("rng") {
        config.generator.rng = RngChoices::from_str(rng)?;
    }
    config.resolve_rng();
    Ok(())
}

/// Configure Clap
/// This function will configure clap and match arguments
pub fn cli_config() -> Result<ArgMatches> {
    // Get matches
    let cli_matches = cli_app().get_matches();

    Ok(cli_matches)
}

fn cli_app() -> Command<'static> {
    Command::new("tilegen")
        .version(crate_version!())
        .about(crate_description!())
        .author(crate_authors!("\n"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Set a custom config file")
                .takes_value(true)
                .value_parser(value_parser!(String))
                .global(true),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate a level fixture (the default when no subcommand is given)")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("PATH")
                        .help("Write the fixture to PATH instead of the configured output")
                        .takes_value(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed the random source for a reproducible fixture")
                        .takes_value(true)
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("rng")
                        .short('r')
                        .long("rng")
                        .value_name("RNG")
                        .help("Random source to draw cells from")
                        .takes_value(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            RngChoices::VARIANTS.iter().copied(),
                        )),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Check a fixture file and count its tiles")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .help("Fixture to inspect, defaults to the configured output")
                        .takes_value(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("render")
                        .long("render")
                        .help("Also print the grid as text")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("config").about("Show Configuration"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_config(args: &[&str]) -> GeneratorConfig {
        let matches = cli_app()
            .try_get_matches_from(args)
            .expect("arguments should parse");
        let (name, generate_matches) = matches.subcommand().unwrap();
        assert_eq!(name, "generate");
        let mut config = GeneratorConfig::default();
        apply_generate_overrides(&mut config, generate_matches).unwrap();
        config
    }

    #[test]
    fn test_seed_flag_selects_seeded_rng() {
        let config = generate_config(&["tilegen", "generate", "--seed", "5"]);
        assert_eq!(config.generator.rng, RngChoices::Seeded);
        assert_eq!(config.generator.seed, Some(5));
    }

    #[test]
    fn test_seed_with_thread_rng_is_not_dropped() {
        let config = generate_config(&["tilegen", "generate", "--seed", "5", "--rng", "thread"]);
        assert_eq!(config.generator.rng, RngChoices::Seeded);
        assert_eq!(config.generator.seed, Some(5));
    }

    #[test]
    fn test_seed_with_lfsr_rng_stays_lfsr() {
        let config = generate_config(&["tilegen", "generate", "-s", "7", "-r", "lfsr"]);
        assert_eq!(config.generator.rng, RngChoices::Lfsr);
        assert_eq!(config.generator.seed, Some(7));
    }

    #[test]
    fn test_output_flag_overrides_path() {
        let config = generate_config(&["tilegen", "generate", "-o", "out.dat"]);
        assert_eq!(config.output.path, PathBuf::from("out.dat"));
        assert_eq!(config.generator.rng, RngChoices::Thread);
    }
}
