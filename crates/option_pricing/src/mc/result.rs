//! Simulation output and streaming statistics.

/// Mean and variance accumulator.
///
/// Samples are folded in with Welford's update; partial accumulators
/// combine with Chan's parallel formula. Merging a fixed sequence of
/// accumulators in a fixed order is deterministic, which is what makes
/// chunked runs reproducible.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sample.
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Combines two accumulators as if their samples had been pushed into one.
    pub fn merge(self, other: Self) -> Self {
        if self.count == 0 {
            return other;
        }
        if other.count == 0 {
            return self;
        }
        let count = self.count + other.count;
        let n = count as f64;
        let delta = other.mean - self.mean;
        let mean = self.mean + delta * other.count as f64 / n;
        let m2 = self.m2 + other.m2 + delta * delta * (self.count as f64 * other.count as f64) / n;
        Self { count, mean, m2 }
    }

    /// Number of samples.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sample mean (0 when empty).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance, normalised by `n`.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Standard error of the mean, `std/√n`.
    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.variance() / self.count as f64).sqrt()
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        for x in iter {
            stats.push(x);
        }
        stats
    }
}

/// Width of the reported band in standard errors.
pub const INTERVAL_WIDTH: f64 = 2.0;

/// Monte Carlo estimate with its sampling error.
///
/// # Examples
///
/// ```rust
/// use option_pricing::mc::{RunningStats, SimulationResult};
///
/// let stats: RunningStats = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
/// let result = SimulationResult::from_stats(&stats, 7, true);
/// assert_eq!(result.estimate, 2.5);
/// let (lo, hi) = result.confidence_interval.unwrap();
/// assert!(lo < 2.5 && 2.5 < hi);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Sample mean.
    pub estimate: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// `estimate ± 2·std_error`, when requested.
    pub confidence_interval: Option<(f64, f64)>,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Seed that reproduces this run.
    pub seed: u64,
}

impl SimulationResult {
    /// Builds a result from accumulated statistics.
    pub fn from_stats(stats: &RunningStats, seed: u64, report_interval: bool) -> Self {
        let estimate = stats.mean();
        let std_error = stats.std_error();
        let confidence_interval = report_interval.then(|| {
            (
                estimate - INTERVAL_WIDTH * std_error,
                estimate + INTERVAL_WIDTH * std_error,
            )
        });
        Self {
            estimate,
            std_error,
            confidence_interval,
            n_paths: stats.count() as usize,
            seed,
        }
    }

    /// Whether `value` lies inside the reported band.
    ///
    /// Always `false` when no band was requested.
    pub fn interval_contains(&self, value: f64) -> bool {
        self.confidence_interval
            .map(|(lo, hi)| lo <= value && value <= hi)
            .unwrap_or(false)
    }
}
