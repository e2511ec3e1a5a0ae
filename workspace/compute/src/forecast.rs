//! Seasonal-trend forecaster with a Prophet-style surface: fit a model on
//! a `ds`/`y` frame, build a future frame extending the history by a
//! horizon, and predict values with uncertainty bounds and an additive
//! trend/weekly/yearly decomposition.
//!
//! The model itself is a ridge-regularized least-squares fit of a linear
//! trend plus weekly and yearly Fourier seasonality. Defaults only; there
//! are no per-call tuning knobs.

use chrono::{Datelike, Duration, NaiveDate};
use polars::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::error::{ComputeError, Result};
use crate::frame::{frame_dates, frame_pairs};

const WEEKLY_PERIOD: f64 = 7.0;
const YEARLY_PERIOD: f64 = 365.25;

/// Forecaster configuration. [`SeasonalTrendForecaster::default`] matches
/// the application-wide defaults.
#[derive(Debug, Clone)]
pub struct SeasonalTrendForecaster {
    weekly_order: usize,
    yearly_order: usize,
    ridge: f64,
    interval_width: f64,
}

impl Default for SeasonalTrendForecaster {
    fn default() -> Self {
        Self {
            weekly_order: 3,
            yearly_order: 6,
            ridge: 1e-6,
            interval_width: 0.8,
        }
    }
}

/// A fitted model, ready to build future frames and predict.
#[derive(Debug, Clone)]
pub struct FittedForecaster {
    config: SeasonalTrendForecaster,
    /// Training dates, ascending; reproduced in the future frame.
    history_dates: Vec<NaiveDate>,
    /// Day number of the first training date; trend time is measured
    /// from here.
    origin_day: f64,
    /// Training span in days, used to scale trend time to [0, 1].
    span_days: f64,
    coefficients: Vec<f64>,
    /// Residual standard deviation on the training data.
    sigma: f64,
}

impl SeasonalTrendForecaster {
    fn parameter_count(&self) -> usize {
        2 + 2 * self.weekly_order + 2 * self.yearly_order
    }

    /// Fit the model on a `ds`/`y` training frame.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedForecaster> {
        let pairs = frame_pairs(df)?;
        if pairs.is_empty() {
            return Err(ComputeError::ForecastComputation(
                "cannot fit on an empty training frame".to_string(),
            ));
        }

        let first_day = pairs[0].0.num_days_from_ce() as f64;
        let last_day = pairs[pairs.len() - 1].0.num_days_from_ce() as f64;
        let span_days = (last_day - first_day).max(1.0);

        let p = self.parameter_count();
        let mut xtx = vec![vec![0.0; p]; p];
        let mut xty = vec![0.0; p];
        for (date, y) in &pairs {
            let row = design_row(*date, first_day, span_days, self.weekly_order, self.yearly_order);
            for i in 0..p {
                xty[i] += row[i] * y;
                for j in 0..p {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }
        for i in 0..p {
            xtx[i][i] += self.ridge;
        }

        let coefficients = solve_linear_system(xtx, xty)?;

        let mut sse = 0.0;
        for (date, y) in &pairs {
            let row = design_row(*date, first_day, span_days, self.weekly_order, self.yearly_order);
            let fitted: f64 = row.iter().zip(&coefficients).map(|(x, b)| x * b).sum();
            sse += (y - fitted) * (y - fitted);
        }
        let dof = (pairs.len().saturating_sub(p)).max(1) as f64;
        let sigma = (sse / dof).sqrt();

        debug!(
            rows = pairs.len(),
            parameters = p,
            sigma,
            "fitted seasonal trend model"
        );

        Ok(FittedForecaster {
            config: self.clone(),
            history_dates: pairs.into_iter().map(|(d, _)| d).collect(),
            origin_day: first_day,
            span_days,
            coefficients,
            sigma,
        })
    }
}

impl FittedForecaster {
    /// Build the frame of dates to predict over: every training date plus
    /// `horizon_days` consecutive calendar days past the last one.
    pub fn make_future_frame(&self, horizon_days: u32) -> Result<DataFrame> {
        let last = *self
            .history_dates
            .last()
            .ok_or_else(|| ComputeError::ForecastComputation("empty fitted model".to_string()))?;

        let mut dates = self.history_dates.clone();
        dates.extend((1..=i64::from(horizon_days)).map(|offset| last + Duration::days(offset)));

        let df = DataFrame::new(vec![Series::new("ds".into(), dates).into()])?;
        Ok(df)
    }

    /// Predict over the `ds` column of `future`.
    ///
    /// The output frame carries `ds`, `yhat`, `yhat_lower`, `yhat_upper`
    /// and the additive components `trend`, `weekly` and `yearly`;
    /// `yhat` is exactly their sum, and the bounds are the central
    /// interval of the configured width around it.
    pub fn predict(&self, future: &DataFrame) -> Result<DataFrame> {
        let dates = frame_dates(future)?;
        let z = interval_z(self.config.interval_width)?;
        let half_width = z * self.sigma;

        let n = dates.len();
        let mut yhat = Vec::with_capacity(n);
        let mut lower = Vec::with_capacity(n);
        let mut upper = Vec::with_capacity(n);
        let mut trend = Vec::with_capacity(n);
        let mut weekly = Vec::with_capacity(n);
        let mut yearly = Vec::with_capacity(n);

        for date in &dates {
            let (t, w, y) = self.components_on(*date);
            let total = t + w + y;
            trend.push(t);
            weekly.push(w);
            yearly.push(y);
            yhat.push(total);
            lower.push(total - half_width);
            upper.push(total + half_width);
        }

        let df = DataFrame::new(vec![
            Series::new("ds".into(), dates).into(),
            Series::new("yhat".into(), yhat).into(),
            Series::new("yhat_lower".into(), lower).into(),
            Series::new("yhat_upper".into(), upper).into(),
            Series::new("trend".into(), trend).into(),
            Series::new("weekly".into(), weekly).into(),
            Series::new("yearly".into(), yearly).into(),
        ])?;
        Ok(df)
    }

    /// Evaluate the (trend, weekly, yearly) components on one date.
    fn components_on(&self, date: NaiveDate) -> (f64, f64, f64) {
        let row = design_row(
            date,
            self.origin_day,
            self.span_days,
            self.config.weekly_order,
            self.config.yearly_order,
        );
        let b = &self.coefficients;

        let trend = row[0] * b[0] + row[1] * b[1];
        let weekly_end = 2 + 2 * self.config.weekly_order;
        let weekly: f64 = (2..weekly_end).map(|i| row[i] * b[i]).sum();
        let yearly: f64 = (weekly_end..row.len()).map(|i| row[i] * b[i]).sum();
        (trend, weekly, yearly)
    }
}

/// Regression features for one date: intercept, scaled trend time and the
/// weekly/yearly Fourier terms.
fn design_row(
    date: NaiveDate,
    origin_day: f64,
    span_days: f64,
    weekly_order: usize,
    yearly_order: usize,
) -> Vec<f64> {
    let day = date.num_days_from_ce() as f64;
    let t = (day - origin_day) / span_days;

    let mut row = Vec::with_capacity(2 + 2 * weekly_order + 2 * yearly_order);
    row.push(1.0);
    row.push(t);
    for k in 1..=weekly_order {
        let phase = 2.0 * std::f64::consts::PI * k as f64 * day / WEEKLY_PERIOD;
        row.push(phase.sin());
        row.push(phase.cos());
    }
    for k in 1..=yearly_order {
        let phase = 2.0 * std::f64::consts::PI * k as f64 * day / YEARLY_PERIOD;
        row.push(phase.sin());
        row.push(phase.cos());
    }
    row
}

/// Two-sided z score for a central interval of the given width.
fn interval_z(width: f64) -> Result<f64> {
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ComputeError::ForecastComputation(format!("normal distribution: {e}")))?;
    Ok(normal.inverse_cdf(0.5 + width / 2.0))
}

/// Solve `a * x = b` by Gaussian elimination with partial pivoting.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .ok_or_else(|| ComputeError::Runtime("empty system".to_string()))?;
        if a[pivot][col].abs() < 1e-12 {
            return Err(ComputeError::ForecastComputation(
                "singular design matrix".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        let pivot_row = a[col].clone();
        let pivot_b = b[col];
        for row in (col + 1)..n {
            let factor = a[row][col] / pivot_row[col];
            for k in col..n {
                a[row][k] -= factor * pivot_row[k];
            }
            b[row] -= factor * pivot_b;
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
