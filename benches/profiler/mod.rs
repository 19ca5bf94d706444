// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Criterion setup shared by the benches.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `AMIDA_BENCH_SAMPLES` | samples per case (10..=500) | 50 |
//! | `AMIDA_BENCH_SECS` | measurement seconds per case (1..=120) | 4 |
//! | `AMIDA_BENCH_FLAMEGRAPH_HZ` | pprof sampling rate; unset or `0` disables the flamegraph | off |

use std::ops::RangeInclusive;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

struct BenchSettings {
    samples: usize,
    measurement: Duration,
    flamegraph_hz: Option<i32>,
}

impl BenchSettings {
    fn from_env() -> Self {
        let secs = read("AMIDA_BENCH_SECS", 1..=120).unwrap_or(4);
        Self {
            samples: read("AMIDA_BENCH_SAMPLES", 10..=500).unwrap_or(50),
            measurement: Duration::from_secs(secs),
            flamegraph_hz: read("AMIDA_BENCH_FLAMEGRAPH_HZ", 1..=1000),
        }
    }
}

/// Parsed value of `name`, or `None` when unset, malformed or outside `allowed`.
fn read<T>(name: &str, allowed: RangeInclusive<T>) -> Option<T>
where
    T: std::str::FromStr + PartialOrd,
{
    let value = std::env::var(name).ok()?.trim().parse::<T>().ok()?;
    allowed.contains(&value).then_some(value)
}

pub fn criterion() -> Criterion {
    let settings = BenchSettings::from_env();
    let criterion = Criterion::default()
        .sample_size(settings.samples)
        .warm_up_time(settings.measurement / 2)
        .measurement_time(settings.measurement);

    match settings.flamegraph_hz {
        Some(hz) => criterion.with_profiler(PProfProfiler::new(hz, Output::Flamegraph(None))),
        None => criterion,
    }
}
