// ABOUTME: Order statistics and smoothing helpers used by the metrics engine
// ABOUTME: Nearest-rank percentile and causal trailing moving average
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are far below 2^52

/// Nearest-rank percentile: element at `floor(n * p)` of the ascending sort
///
/// Returns 0 for an empty input. `p` is clamped to [0, 1] and the index to
/// the last element, so `p = 1` yields the maximum.
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (sorted.len() as f64 * p.clamp(0.0, 1.0)).floor() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

/// Causal trailing moving average
///
/// Each output averages up to `window / 2` preceding *smoothed* outputs
/// with the current raw value. The first value (no predecessors) passes
/// through unchanged. Output length always equals input length.
#[must_use]
pub fn trailing_smooth(values: &[f64], window: usize) -> Vec<f64> {
    let lookback = window / 2;
    let mut smoothed: Vec<f64> = Vec::with_capacity(values.len());

    for (i, raw) in values.iter().enumerate() {
        let prior = &smoothed[i.saturating_sub(lookback)..i];
        let value = if prior.is_empty() {
            *raw
        } else {
            (prior.iter().sum::<f64>() + raw) / (prior.len() + 1) as f64
        };
        smoothed.push(value);
    }

    smoothed
}

/// Arithmetic mean, `None` for an empty iterator
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
