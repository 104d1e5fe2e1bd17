//! Statistics over `&[f64]`.

use crate::error::{StatsError, StatsResult};

fn non_empty(xs: &[f64]) -> StatsResult<()> {
    if xs.is_empty() {
        Err(StatsError::EmptyVector)
    } else {
        Ok(())
    }
}

fn sorted(xs: &[f64]) -> Vec<f64> {
    let mut v = xs.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Sum of all elements.
pub fn sum(xs: &[f64]) -> StatsResult<f64> {
    non_empty(xs)?;
    Ok(xs.iter().sum())
}

/// Product of all elements.
pub fn product(xs: &[f64]) -> StatsResult<f64> {
    non_empty(xs)?;
    Ok(xs.iter().product())
}

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> StatsResult<f64> {
    non_empty(xs)?;
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Median; the midpoint average for even lengths.
pub fn median(xs: &[f64]) -> StatsResult<f64> {
    non_empty(xs)?;
    let v = sorted(xs);
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        Ok(v[mid])
    } else {
        Ok((v[mid - 1] + v[mid]) / 2.0)
    }
}

/// All most-frequent values, ascending. A single-element result means the
/// mode is unique.
pub fn mode(xs: &[f64]) -> StatsResult<Vec<f64>> {
    non_empty(xs)?;
    let v = sorted(xs);
    let mut best = 0usize;
    let mut modes = Vec::new();
    let mut i = 0;
    while i < v.len() {
        let mut j = i + 1;
        while j < v.len() && v[j] == v[i] {
            j += 1;
        }
        let count = j - i;
        if count > best {
            best = count;
            modes.clear();
        }
        if count == best {
            modes.push(v[i]);
        }
        i = j;
    }
    Ok(modes)
}

/// Sample variance with `ddof` delta degrees of freedom (1 for the unbiased
/// estimator, 0 for the population variance).
pub fn variance(xs: &[f64], ddof: usize) -> StatsResult<f64> {
    non_empty(xs)?;
    let n = xs.len();
    if n <= ddof {
        return Err(StatsError::InvalidDdof { ddof, n });
    }
    let m = mean(xs)?;
    let ss: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    Ok(ss / (n - ddof) as f64)
}

/// Standard deviation, the square root of [`variance`].
pub fn std_dev(xs: &[f64], ddof: usize) -> StatsResult<f64> {
    Ok(variance(xs, ddof)?.sqrt())
}

/// Sample covariance of two equally long vectors (n - 1 denominator).
pub fn covariance(xs: &[f64], ys: &[f64]) -> StatsResult<f64> {
    if xs.len() != ys.len() {
        return Err(StatsError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(StatsError::TooFewElements {
            needed: 2,
            actual: xs.len(),
        });
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let s: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .sum();
    Ok(s / (xs.len() - 1) as f64)
}

/// Pearson correlation coefficient.
pub fn correlation(xs: &[f64], ys: &[f64]) -> StatsResult<f64> {
    let cov = covariance(xs, ys)?;
    let sx = std_dev(xs, 1)?;
    let sy = std_dev(ys, 1)?;
    if sx == 0.0 || sy == 0.0 {
        return Err(StatsError::ZeroStdDev);
    }
    Ok(cov / (sx * sy))
}

/// Smallest element.
pub fn min(xs: &[f64]) -> StatsResult<f64> {
    non_empty(xs)?;
    Ok(xs.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Largest element.
pub fn max(xs: &[f64]) -> StatsResult<f64> {
    non_empty(xs)?;
    Ok(xs.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// `(min, max)` of a vector with at least two elements.
pub fn range(xs: &[f64]) -> StatsResult<(f64, f64)> {
    non_empty(xs)?;
    if xs.len() < 2 {
        return Err(StatsError::TooFewElements {
            needed: 2,
            actual: xs.len(),
        });
    }
    Ok((min(xs)?, max(xs)?))
}

/// One-based ranks with ties assigned their average rank.
pub fn rank(xs: &[f64]) -> StatsResult<Vec<f64>> {
    non_empty(xs)?;
    let mut order: Vec<usize> = (0..xs.len()).collect();
    order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));

    let mut ranks = vec![0.0; xs.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i + 1;
        while j < order.len() && xs[order[j]] == xs[order[i]] {
            j += 1;
        }
        // Positions i..j (0-based) share the average of ranks i+1..=j.
        let avg = (i + j + 1) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg;
        }
        i = j;
    }
    Ok(ranks)
}

/// The `q`-quantile with linear interpolation between order statistics.
pub fn quantile(xs: &[f64], q: f64) -> StatsResult<f64> {
    non_empty(xs)?;
    if !(0.0..=1.0).contains(&q) {
        return Err(StatsError::InvalidQuantile(q));
    }
    let v = sorted(xs);
    let pos = q * (v.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Ok(v[lo] + (v[hi] - v[lo]) * frac)
}

/// [`quantile`] at each requested point.
pub fn quantiles(xs: &[f64], qs: &[f64]) -> StatsResult<Vec<f64>> {
    qs.iter().map(|&q| quantile(xs, q)).collect()
}
