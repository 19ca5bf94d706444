// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Direct generator: shuffle, test, retry.

use rand::Rng;

use super::{ensure_enough, GenerationError, MAX_ATTEMPTS};

/// Returns a uniformly random derangement of `items`: no position keeps its original element.
///
/// Elements are compared with `==`, so `items` must be pairwise distinct for a derangement to
/// exist at all.
pub fn generate_derangement<T, R>(items: &[T], rng: &mut R) -> Result<Vec<T>, GenerationError>
where
    T: PartialEq + Clone,
    R: Rng + ?Sized,
{
    generate_derangement_bounded(items, rng, MAX_ATTEMPTS).map(|(shuffled, _)| shuffled)
}

/// Index form: `targets[i] != i` for every `i`, and `targets` is a permutation of `0..n`.
pub fn derangement_indices<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
) -> Result<Vec<usize>, GenerationError> {
    derangement_indices_bounded(n, rng, MAX_ATTEMPTS).map(|(targets, _)| targets)
}

pub(crate) fn derangement_indices_bounded<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Result<(Vec<usize>, usize), GenerationError> {
    let identity = (0..n).collect::<Vec<_>>();
    generate_derangement_bounded(&identity, rng, max_attempts)
}

pub(crate) fn generate_derangement_bounded<T, R>(
    items: &[T],
    rng: &mut R,
    max_attempts: usize,
) -> Result<(Vec<T>, usize), GenerationError>
where
    T: PartialEq + Clone,
    R: Rng + ?Sized,
{
    ensure_enough(items.len())?;

    let mut shuffled = items.to_vec();
    for attempt in 1..=max_attempts {
        shuffled.clone_from_slice(items);
        fisher_yates(&mut shuffled, rng);

        if items.iter().zip(&shuffled).all(|(original, drawn)| original != drawn) {
            tracing::debug!(len = items.len(), attempt, "derangement accepted");
            return Ok((shuffled, attempt));
        }
    }

    tracing::warn!(len = items.len(), max_attempts, "derangement retry bound exhausted");
    Err(GenerationError::GenerationExhausted { attempts: max_attempts })
}

fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
