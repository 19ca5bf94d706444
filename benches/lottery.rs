// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use amida::lottery::{self, Strategy};
use amida::model::Roster;
use amida::render::{concealed_lanes, render_round_unicode, LadderRenderOptions, TokenPosition};
use amida::session::Round;

mod profiler;

const SIZES: [usize; 3] = [4, 16, 64];

fn roster(size: usize) -> Roster {
    Roster::from_names((0..size).map(|i| format!("p{i:02}")))
}

fn benches_draw(c: &mut Criterion) {
    // Stable IDs: lottery.draw/{direct,ladder}/{n}
    let mut group = c.benchmark_group("lottery.draw");
    for strategy in [Strategy::Direct, Strategy::Ladder] {
        for size in SIZES {
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(strategy.as_str(), size), &size, |b, &size| {
                let mut rng = StdRng::seed_from_u64(0xA31DA);
                b.iter(|| {
                    let draw = lottery::draw(strategy, black_box(size), &mut rng).expect("draw");
                    black_box(draw.attempts);
                });
            });
        }
    }
    group.finish();
}

fn benches_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("lottery.trace_all");
    for size in SIZES {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let draw = lottery::draw(Strategy::Ladder, size, &mut rng).expect("draw");
        group.throughput(Throughput::Elements(draw.ladder.rungs().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &draw.ladder, |b, ladder| {
            b.iter(|| black_box(lottery::trace_all(black_box(ladder.rungs()), ladder.columns())));
        });
    }
    group.finish();
}

fn benches_render(c: &mut Criterion) {
    // Mid-animation frame with everything still concealed, the TUI's hottest redraw.
    let mut group = c.benchmark_group("render.ladder");
    for size in SIZES {
        let roster = roster(size);
        let mut rng = StdRng::seed_from_u64(7);
        let round = Round::draw(roster.participants().to_vec(), Strategy::Ladder, &mut rng)
            .expect("round");
        let options = LadderRenderOptions {
            token: Some(TokenPosition { start: 0, rows_done: round.ladder().rows() / 2 }),
            concealed: concealed_lanes(round.assignment(), &BTreeSet::new()),
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &round, |b, round| {
            b.iter(|| {
                let render = render_round_unicode(round, &options).expect("render");
                black_box(render.text.len());
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_draw, benches_trace, benches_render
}
criterion_main!(benches);
