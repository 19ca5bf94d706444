// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Amida CLI entrypoint.
//!
//! Runs the interactive TUI by default. `--print` and `--json` draw a single round from the
//! positional names and write it to stdout instead.

use std::collections::BTreeSet;
use std::error::Error;
use std::time::Duration;

use amida::config::{parse_frame_ms, Config};
use amida::lottery::Strategy;
use amida::model::Roster;
use amida::render::{render_results, render_round_unicode, LadderRenderOptions};
use amida::report::RoundReport;
use amida::session::Round;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "AMIDA_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--strategy direct|ladder] [--seed <n>] [--frame-ms <ms>] [<name>...]\n  {program} --print [--strategy direct|ladder] [--seed <n>] <name> <name> [<name>...]\n  {program} --json [--strategy direct|ladder] [--seed <n>] <name> <name> [<name>...]\n\nWithout --print/--json the interactive ladder opens, pre-filled with the given names.\n--print draws one round and prints the ladder with every result.\n--json prints the same round as a JSON report.\n\nEnvironment: AMIDA_STRATEGY, AMIDA_SEED, AMIDA_FRAME_MS (flags win), AMIDA_LOG (log filter, stderr)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    print: bool,
    json: bool,
    seed: Option<u64>,
    strategy: Option<Strategy>,
    frame_ms: Option<Duration>,
    names: Vec<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--print" => {
                if options.print {
                    return Err(());
                }
                options.print = true;
            }
            "--json" => {
                if options.json {
                    return Err(());
                }
                options.json = true;
            }
            "--seed" => {
                if options.seed.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.seed = Some(raw.trim().parse().map_err(|_| ())?);
            }
            "--strategy" => {
                if options.strategy.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.strategy = Some(raw.parse().map_err(|_| ())?);
            }
            "--frame-ms" => {
                if options.frame_ms.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.frame_ms = Some(parse_frame_ms(&raw).map_err(|_| ())?);
            }
            "--" => {
                options.names.extend(args.by_ref());
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => options.names.push(arg),
        }
    }

    if options.print && options.json {
        return Err(());
    }

    Ok(options)
}

impl CliOptions {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(frame) = self.frame_ms {
            config.frame_interval = frame;
        }
        config
    }
}

fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Draws one round and formats it fully revealed.
fn printed_round(round: &Round) -> Result<String, Box<dyn Error>> {
    let render = render_round_unicode(round, &LadderRenderOptions::default())?;
    let revealed = (0..round.len()).collect::<BTreeSet<_>>();
    Ok(format!("{}\n\n{}\n", render.text, render_results(round, &revealed)))
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "amida".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();
        let config = options.apply(Config::from_env()?);
        tracing::debug!(strategy = %config.strategy, seed = ?config.seed, "config loaded");

        if options.print || options.json {
            let roster = Roster::from_names(&options.names);
            let mut rng = config.rng();
            let round = Round::draw(roster.participants().to_vec(), config.strategy, &mut rng)?;
            if options.json {
                println!("{}", RoundReport::from_round(&round, config.seed).to_json_pretty()?);
            } else {
                print!("{}", printed_round(&round)?);
            }
            return Ok(());
        }

        amida::tui::run(config, &options.names)
    })();

    if let Err(err) = result {
        eprintln!("amida: {err}");
        std::process::exit(1);
    }
}
