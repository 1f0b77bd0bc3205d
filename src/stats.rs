//! Statistical utility functions shared across modules
//!
//! Descriptive statistics used by normalization, the Welch test, effect sizes
//! and the distribution summaries.

/// Arithmetic mean; NaN for an empty slice
pub fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

/// Unbiased sample variance (n - 1 denominator); NaN with fewer than two values
pub fn sample_variance(x: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(x);
    x.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / (n as f64 - 1.0)
}

/// Median; mean of the two middle values for an even count
pub fn median(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    let mut sorted = x.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Quantile of already sorted data with linear interpolation
/// (R type 7, numpy's default)
pub fn quantile_sorted(sorted_x: &[f64], p: f64) -> f64 {
    let n = sorted_x.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_x[0];
    }

    let h = (n as f64 - 1.0) * p;
    let h_floor = h.floor() as usize;
    let h_ceil = h.ceil() as usize;

    let lo = h_floor.min(n - 1);
    let hi = h_ceil.min(n - 1);

    if lo == hi {
        sorted_x[lo]
    } else {
        let frac = h - h_floor as f64;
        sorted_x[lo] + frac * (sorted_x[hi] - sorted_x[lo])
    }
}

/// Gaussian kernel density estimate evaluated at `grid`
///
/// Bandwidth follows Scott's rule: `sd * n^(-1/5)`. Returns `None` when the
/// data has fewer than two points or zero spread.
pub fn gaussian_kde(x: &[f64], grid: &[f64]) -> Option<Vec<f64>> {
    let n = x.len();
    let sd = sample_variance(x).sqrt();
    if n < 2 || !sd.is_finite() || sd == 0.0 {
        return None;
    }

    let bandwidth = sd * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    let density = grid
        .iter()
        .map(|&g| {
            let sum: f64 = x
                .iter()
                .map(|&xi| {
                    let z = (g - xi) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            sum * norm
        })
        .collect();

    Some(density)
}

/// `n` evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((mean(&x) - 3.0).abs() < 1e-12);
        assert!((sample_variance(&x) - 2.5).abs() < 1e-12);
        assert!(sample_variance(&[1.0]).is_nan());
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_quantile_sorted_interpolates() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&x, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile_sorted(&x, 0.5) - 2.5).abs() < 1e-12);
        assert_eq!(quantile_sorted(&x, 1.0), 4.0);
        assert_eq!(quantile_sorted(&[7.0], 0.3), 7.0);
    }

    #[test]
    fn test_gaussian_kde_integrates_to_one() {
        let x = vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
        let grid = linspace(-5.0, 8.0, 2001);
        let density = gaussian_kde(&x, &grid).unwrap();
        let step = grid[1] - grid[0];
        let area: f64 = density.iter().sum::<f64>() * step;
        assert!((area - 1.0).abs() < 1e-3, "KDE area should be ~1, got {}", area);
        assert!(gaussian_kde(&[1.0, 1.0], &grid).is_none());
    }

    #[test]
    fn test_linspace_endpoints() {
        let g = linspace(0.0, 1.0, 5);
        assert_eq!(g, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
