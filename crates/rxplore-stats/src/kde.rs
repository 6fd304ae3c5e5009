use std::f64::consts::PI;

use serde::Serialize;

/// Gaussian kernel density estimate of a one-dimensional sample.
///
/// The bandwidth follows Scott's rule: the sample standard deviation
/// (with Bessel's correction) scaled by `n^(-1/5)`.
#[derive(Debug, Clone, Serialize)]
pub struct KernelDensity {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl KernelDensity {
    /// Fits a density estimate to the given values.
    ///
    /// NaN values are skipped. Returns `None` when fewer than two values
    /// remain or when the sample has zero variance.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rxplore_stats::kde::KernelDensity;
    /// let kde = KernelDensity::new([1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert!(kde.density(2.5) > kde.density(10.0));
    /// assert!(KernelDensity::new([5.0, 5.0]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let samples = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect::<Vec<_>>();
        if samples.len() < 2 {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        if variance <= f64::EPSILON {
            return None;
        }
        let bandwidth = variance.sqrt() * n.powf(-0.2);
        Some(Self { samples, bandwidth })
    }

    /// Returns the kernel bandwidth.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Evaluates the probability density at `x`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        let norm = 1.0 / ((2.0 * PI).sqrt() * self.bandwidth * self.samples.len() as f64);
        self.samples
            .iter()
            .map(|s| {
                let z = (x - s) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            * norm
    }

    /// Evaluates the density at `points` evenly spaced positions over `[start, end]`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn curve(&self, start: f64, end: f64, points: usize) -> Vec<(f64, f64)> {
        match points {
            0 => vec![],
            1 => vec![(start, self.density(start))],
            _ => {
                let step = (end - start) / (points - 1) as f64;
                (0..points)
                    .map(|i| {
                        let x = start + step * i as f64;
                        (x, self.density(x))
                    })
                    .collect()
            }
        }
    }
}
