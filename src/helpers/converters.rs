//! Converters from domain/compute types to the transport DTOs in `common`.

use chrono::NaiveDate;
use polars::prelude::DataFrame;

use common::{ForecastPoint, History, PriceBarDto};
use model::{HistoryTable, PriceBar};

/// One bar into its wire shape.
pub fn bar_to_dto(bar: &PriceBar) -> PriceBarDto {
    PriceBarDto {
        date: bar.date,
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: bar.volume,
    }
}

/// A history table into its wire shape, optionally truncated to the last
/// `tail` rows. `total_rows` always reports the untruncated count.
pub fn table_to_history(table: &HistoryTable, tail: Option<usize>) -> History {
    let bars = match tail {
        Some(n) => table.tail(n),
        None => table.bars(),
    };
    History {
        symbol: table.symbol().to_string(),
        bars: bars.iter().map(bar_to_dto).collect(),
        total_rows: table.len(),
    }
}

/// Column-oriented view of a forecast frame, shared by the chart and
/// components converters.
pub struct ForecastSeries {
    pub dates: Vec<NaiveDate>,
    pub yhat: Vec<f64>,
    pub yhat_lower: Vec<f64>,
    pub yhat_upper: Vec<f64>,
    pub trend: Vec<f64>,
    pub weekly: Vec<f64>,
    pub yearly: Vec<f64>,
}

fn value_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, String> {
    let col = df
        .column(name)
        .map_err(|e| format!("Missing {name} column: {e}"))?;
    let mut values = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let value = col
            .get(i)
            .map_err(|e| format!("Error getting {name} at row {i}: {e}"))?
            .try_extract::<f64>()
            .map_err(|e| format!("Error extracting {name} as f64 at row {i}: {e}"))?;
        values.push(value);
    }
    Ok(values)
}

/// Extract all forecast columns from the frame the forecaster produced.
pub fn forecast_series(df: &DataFrame) -> Result<ForecastSeries, String> {
    let dates = compute::frame::frame_dates(df).map_err(|e| e.to_string())?;
    Ok(ForecastSeries {
        dates,
        yhat: value_column(df, "yhat")?,
        yhat_lower: value_column(df, "yhat_lower")?,
        yhat_upper: value_column(df, "yhat_upper")?,
        trend: value_column(df, "trend")?,
        weekly: value_column(df, "weekly")?,
        yearly: value_column(df, "yearly")?,
    })
}

/// Extract the forecast frame as row-oriented points.
pub fn forecast_points(df: &DataFrame) -> Result<Vec<ForecastPoint>, String> {
    let series = forecast_series(df)?;
    let mut points = Vec::with_capacity(series.dates.len());
    for i in 0..series.dates.len() {
        points.push(ForecastPoint {
            ds: series.dates[i],
            yhat: series.yhat[i],
            yhat_lower: series.yhat_lower[i],
            yhat_upper: series.yhat_upper[i],
            trend: series.trend[i],
            weekly: series.weekly[i],
            yearly: series.yearly[i],
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Ticker;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close: Some(close),
            volume: 500,
        }
    }

    #[test]
    fn history_tail_truncates_but_reports_full_count() {
        let table = HistoryTable::from_bars(
            Ticker::Msft,
            vec![bar(8, 1.0), bar(9, 2.0), bar(10, 3.0)],
        );
        let history = table_to_history(&table, Some(2));
        assert_eq!(history.bars.len(), 2);
        assert_eq!(history.total_rows, 3);
        assert_eq!(history.symbol, "MSFT");
        assert_eq!(history.bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
    }

    #[test]
    fn forecast_frame_round_trips_to_points() {
        let table = HistoryTable::from_bars(
            Ticker::Aapl,
            (1..=25).map(|d| bar(d, 100.0 + d as f64)).collect(),
        );
        let train = compute::training_frame(&table).unwrap();
        let fitted = compute::default_forecaster().fit(&train).unwrap();
        let future = fitted.make_future_frame(5).unwrap();
        let forecast = fitted.predict(&future).unwrap();

        let points = forecast_points(&forecast).unwrap();
        assert_eq!(points.len(), 30);
        assert_eq!(points[0].ds, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            points.last().unwrap().ds,
            NaiveDate::from_ymd_opt(2024, 1, 30).unwrap()
        );
        for p in &points {
            assert!(p.yhat_lower <= p.yhat && p.yhat <= p.yhat_upper);
        }
    }
}
