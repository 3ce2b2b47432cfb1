//! Least-squares trend fitting and slope classification

use serde::{Deserialize, Serialize};

/// Slope at or beyond which a trend counts as fast
pub const FAST_SLOPE: f64 = 0.5;
/// Slope at or beyond which a trend counts as moving at all
pub const SLOW_SLOPE: f64 = 0.1;

/// Direction of a rank trend. Rank 1 is the top, so a negative slope climbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendPattern {
    ClimbingFast,
    ClimbingSlow,
    Stable,
    FallingSlow,
    FallingFast,
    InsufficientData,
}

impl TrendPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendPattern::ClimbingFast => "climbing_fast",
            TrendPattern::ClimbingSlow => "climbing_slow",
            TrendPattern::Stable => "stable",
            TrendPattern::FallingSlow => "falling_slow",
            TrendPattern::FallingFast => "falling_fast",
            TrendPattern::InsufficientData => "insufficient_data",
        }
    }
}

/// Ordinary least squares fit of value against sequential index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    /// Standard deviation of residuals (0 with two points)
    pub residual_std: f64,
    pub points: usize,
}

impl TrendFit {
    /// Fitted value at index `x`
    pub fn project(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit `values[i]` against `i`. Fewer than two points cannot be fitted.
pub fn fit_trend(values: &[f64]) -> Option<TrendFit> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = mean_y - slope * mean_x;

    let residual_std = if n > 2 {
        let ss: f64 = values
            .iter()
            .enumerate()
            .map(|(i, y)| (y - (intercept + slope * i as f64)).powi(2))
            .sum();
        (ss / (n_f - 2.0)).sqrt()
    } else {
        0.0
    };

    Some(TrendFit {
        slope,
        intercept,
        residual_std,
        points: n,
    })
}

/// Classify a rank slope (negative = improving).
pub fn classify_slope(slope: f64) -> TrendPattern {
    if slope <= -FAST_SLOPE {
        TrendPattern::ClimbingFast
    } else if slope <= -SLOW_SLOPE {
        TrendPattern::ClimbingSlow
    } else if slope >= FAST_SLOPE {
        TrendPattern::FallingFast
    } else if slope >= SLOW_SLOPE {
        TrendPattern::FallingSlow
    } else {
        TrendPattern::Stable
    }
}
