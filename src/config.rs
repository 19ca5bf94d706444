// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime settings read from the environment.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `AMIDA_STRATEGY` | `direct` or `ladder` | `ladder` |
//! | `AMIDA_SEED` | `u64` seed for reproducible rounds | OS entropy |
//! | `AMIDA_FRAME_MS` | animation frame interval in milliseconds | `120` |
//!
//! Command-line flags override these values.

use std::{env, error::Error, fmt, time::Duration};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::lottery::Strategy;

pub const STRATEGY_ENV: &str = "AMIDA_STRATEGY";
pub const SEED_ENV: &str = "AMIDA_SEED";
pub const FRAME_MS_ENV: &str = "AMIDA_FRAME_MS";
pub const DEFAULT_FRAME_MS: u64 = 120;
pub const MAX_FRAME_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub strategy: Strategy,
    pub seed: Option<u64>,
    pub frame_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            seed: None,
            frame_interval: Duration::from_millis(DEFAULT_FRAME_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Builds a config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let mut config = Self::default();

        if let Some(raw) = read_var(&lookup, STRATEGY_ENV)? {
            config.strategy =
                raw.parse().map_err(|err| ConfigError::invalid(STRATEGY_ENV, &raw, err))?;
        }
        if let Some(raw) = read_var(&lookup, SEED_ENV)? {
            let seed: u64 =
                raw.parse().map_err(|err| ConfigError::invalid(SEED_ENV, &raw, err))?;
            config.seed = Some(seed);
        }
        if let Some(raw) = read_var(&lookup, FRAME_MS_ENV)? {
            config.frame_interval = parse_frame_ms(&raw)
                .map_err(|reason| ConfigError::invalid(FRAME_MS_ENV, &raw, reason))?;
        }

        Ok(config)
    }

    /// Seeded generator when a seed is configured, OS-seeded otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Parses a frame interval in milliseconds; `0` and values above [`MAX_FRAME_MS`] are rejected.
pub fn parse_frame_ms(raw: &str) -> Result<Duration, String> {
    let ms: u64 = raw.trim().parse().map_err(|err| format!("{err}"))?;
    if ms == 0 || ms > MAX_FRAME_MS {
        return Err(format!("expected 1..={MAX_FRAME_MS}"));
    }
    Ok(Duration::from_millis(ms))
}

fn read_var<F>(lookup: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_owned())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv {
            name,
            value: "<non-unicode>".to_owned(),
            reason: "not valid unicode".to_owned(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidEnv { name: &'static str, value: String, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidEnv { name, value: value.to_owned(), reason: reason.to_string() }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value, reason } => {
                write!(f, "invalid env {name}={value} ({reason})")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;
    use std::time::Duration;

    use rand::Rng;
    use rstest::rstest;

    use super::{parse_frame_ms, Config, ConfigError, FRAME_MS_ENV, SEED_ENV, STRATEGY_ENV};
    use crate::lottery::Strategy;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let vars = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn defaults_without_variables() {
        let config = Config::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, Config::default());
        assert_eq!(config.strategy, Strategy::Ladder);
        assert_eq!(config.frame_interval, Duration::from_millis(120));
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            (STRATEGY_ENV, "direct"),
            (SEED_ENV, " 42 "),
            (FRAME_MS_ENV, "50"),
        ]))
        .expect("config");
        assert_eq!(config.strategy, Strategy::Direct);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.frame_interval, Duration::from_millis(50));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_lookup(lookup(&[(SEED_ENV, "   ")])).expect("config");
        assert_eq!(config.seed, None);
    }

    #[rstest]
    #[case(STRATEGY_ENV, "zigzag")]
    #[case(SEED_ENV, "-1")]
    #[case(FRAME_MS_ENV, "0")]
    #[case(FRAME_MS_ENV, "fast")]
    fn rejects_invalid_values(#[case] name: &'static str, #[case] value: &str) {
        let err = Config::from_lookup(lookup(&[(name, value)])).unwrap_err();
        let ConfigError::InvalidEnv { name: reported, .. } = &err;
        assert_eq!(*reported, name);
        assert!(err.to_string().starts_with(&format!("invalid env {name}=")));
    }

    #[test]
    fn frame_ms_bounds() {
        assert_eq!(parse_frame_ms("1"), Ok(Duration::from_millis(1)));
        assert!(parse_frame_ms("10001").is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = Config { seed: Some(7), ..Config::default() };
        let a = config.rng().random::<u64>();
        let b = config.rng().random::<u64>();
        assert_eq!(a, b);
    }
}
