//! Weighted random selection.
//!
//! Every stochastic decision in a play routes through [`select_weighted`].

use rand::Rng;

use crate::error::{Result, SimError};

/// Draws an index with probability proportional to its weight.
///
/// `key` is drawn uniformly from `[0, total)` and the running cumulative sum
/// is walked until it exceeds the key. Rounding can leave the key at or past
/// the final cumulative sum, in which case the last positive bucket wins.
pub fn select_weighted<R: Rng>(rng: &mut R, weights: &[f64]) -> Result<usize> {
    let total = validated_total(weights)?;
    let key = rng.gen::<f64>() * total;

    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = i;
        if cumulative > key {
            return Ok(i);
        }
    }
    Ok(last_positive)
}

/// Two-way contest: returns `true` when the first side wins.
pub fn contest<R: Rng>(rng: &mut R, first: f64, second: f64) -> Result<bool> {
    Ok(select_weighted(rng, &[first, second])? == 0)
}

fn validated_total(weights: &[f64]) -> Result<f64> {
    let mut total = 0.0;
    for &w in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(SimError::InvalidWeights { total: w });
        }
        total += w;
    }
    if total > 0.0 && total.is_finite() {
        Ok(total)
    } else {
        Err(SimError::InvalidWeights { total })
    }
}
