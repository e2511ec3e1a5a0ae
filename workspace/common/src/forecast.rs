use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the forecast table: predicted value, uncertainty bounds and
/// the additive components it decomposes into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastPoint {
    /// Forecast date (the forecaster's `ds` column).
    pub ds: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    pub trend: f64,
    pub weekly: f64,
    pub yearly: f64,
}

/// Full forecast over the historical range plus the requested horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastTable {
    pub symbol: String,
    /// Requested horizon in days (`years * 365`).
    pub horizon_days: u32,
    pub points: Vec<ForecastPoint>,
    /// Last five rows, surfaced separately for the forecast-tail table.
    pub tail: Vec<ForecastPoint>,
}

/// Payload for the forecast chart: observed history as markers, prediction
/// as a line with an uncertainty band around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastChart {
    pub symbol: String,
    pub history_dates: Vec<NaiveDate>,
    pub history_values: Vec<f64>,
    pub dates: Vec<NaiveDate>,
    pub yhat: Vec<f64>,
    pub yhat_lower: Vec<f64>,
    pub yhat_upper: Vec<f64>,
}

/// Decomposed trend/weekly/yearly series for the components panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComponentSeries {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub trend: Vec<f64>,
    pub weekly: Vec<f64>,
    pub yearly: Vec<f64>,
}

impl ForecastTable {
    /// Assemble a table from its points, capturing the five-row tail.
    pub fn new(symbol: &str, horizon_days: u32, points: Vec<ForecastPoint>) -> Self {
        let tail = points.iter().rev().take(5).rev().cloned().collect();
        Self {
            symbol: symbol.to_string(),
            horizon_days,
            points,
            tail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32) -> ForecastPoint {
        ForecastPoint {
            ds: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            yhat: day as f64,
            yhat_lower: day as f64 - 1.0,
            yhat_upper: day as f64 + 1.0,
            trend: day as f64,
            weekly: 0.0,
            yearly: 0.0,
        }
    }

    #[test]
    fn tail_is_last_five_in_order() {
        let table = ForecastTable::new("AAPL", 365, (1..=8).map(point).collect());
        assert_eq!(table.tail.len(), 5);
        assert_eq!(table.tail[0].ds, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert_eq!(table.tail[4].ds, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    }

    #[test]
    fn tail_of_short_table_is_whole_table() {
        let table = ForecastTable::new("AAPL", 365, (1..=3).map(point).collect());
        assert_eq!(table.tail.len(), 3);
        assert_eq!(table.tail, table.points);
    }
}
