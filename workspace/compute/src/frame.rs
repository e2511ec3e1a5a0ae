//! DataFrame boundary between the history table and the forecaster.
//!
//! The forecaster consumes a two-column `ds`/`y` frame, the same shape the
//! Prophet-style API expects: `ds` is the date, `y` the close price, rows
//! with a missing close dropped.

use chrono::NaiveDate;
use polars::prelude::*;

use model::HistoryTable;

use crate::error::{ComputeError, Result};

/// Convert polars epoch-day offsets back into calendar dates.
///
/// 719_163 is the day number of 1970-01-01 in chrono's common-era count.
pub fn date_from_epoch_days(days: i64) -> Result<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt((days + 719_163) as i32)
        .ok_or_else(|| ComputeError::Date(format!("day offset {days} out of range")))
}

/// Project a history table onto the forecaster's `ds`/`y` input frame.
///
/// Bars without a close price are dropped here, so the output row count is
/// at most the table's row count and the `y` column is gap-free.
pub fn training_frame(table: &HistoryTable) -> Result<DataFrame> {
    let mut dates: Vec<NaiveDate> = Vec::with_capacity(table.len());
    let mut values: Vec<Option<f64>> = Vec::with_capacity(table.len());
    for bar in table.bars() {
        dates.push(bar.date);
        values.push(bar.close);
    }

    let df = DataFrame::new(vec![
        Series::new("ds".into(), dates).into(),
        Series::new("y".into(), values).into(),
    ])?;

    Ok(df.drop_nulls::<String>(None)?)
}

/// Extract a `ds`/`y` frame into (date, value) pairs for fitting.
pub fn frame_pairs(df: &DataFrame) -> Result<Vec<(NaiveDate, f64)>> {
    let ds = df.column("ds")?;
    let y = df.column("y")?;

    let mut pairs = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let days = ds
            .get(i)?
            .try_extract::<i64>()
            .map_err(|e| ComputeError::Series(format!("ds at row {i}: {e}")))?;
        let value = y
            .get(i)?
            .try_extract::<f64>()
            .map_err(|e| ComputeError::Series(format!("y at row {i}: {e}")))?;
        pairs.push((date_from_epoch_days(days)?, value));
    }
    Ok(pairs)
}

/// Extract the `ds` column of any frame that carries one.
pub fn frame_dates(df: &DataFrame) -> Result<Vec<NaiveDate>> {
    let ds = df.column("ds")?;
    let mut dates = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let days = ds
            .get(i)?
            .try_extract::<i64>()
            .map_err(|e| ComputeError::Series(format!("ds at row {i}: {e}")))?;
        dates.push(date_from_epoch_days(days)?);
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{PriceBar, Ticker};

    fn bar(day: u32, close: Option<f64>) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close,
            volume: 10,
        }
    }

    #[test]
    fn projection_keeps_ds_y_shape() {
        let table = HistoryTable::from_bars(
            Ticker::Aapl,
            vec![bar(8, Some(185.0)), bar(9, Some(186.0))],
        );
        let df = training_frame(&table).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["ds", "y"]);
    }

    #[test]
    fn projection_drops_missing_closes() {
        let table = HistoryTable::from_bars(
            Ticker::Aapl,
            vec![bar(8, Some(185.0)), bar(9, None), bar(10, Some(187.0))],
        );
        let df = training_frame(&table).unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.height() <= table.len());
        assert_eq!(df.column("y").unwrap().null_count(), 0);

        let pairs = frame_pairs(&df).unwrap();
        assert_eq!(
            pairs,
            vec![
                (NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(), 185.0),
                (NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), 187.0),
            ]
        );
    }

    #[test]
    fn dates_round_trip_through_the_frame() {
        let table = HistoryTable::from_bars(Ticker::Aapl, vec![bar(8, Some(185.0))]);
        let df = training_frame(&table).unwrap();
        assert_eq!(
            frame_dates(&df).unwrap(),
            vec![NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()]
        );
    }

    #[test]
    fn epoch_day_conversion_hits_known_dates() {
        assert_eq!(
            date_from_epoch_days(0).unwrap(),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
        assert_eq!(
            date_from_epoch_days(19_723).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }
}
