use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar. Immutable once fetched.
///
/// `close` alone is optional: the provider nulls it for bars it has not
/// finalized, and the forecast projection later drops such rows. A bar
/// missing any of the other fields is not a usable bar and is skipped
/// during normalization instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: Option<f64>,
    pub volume: u64,
}

/// Flatten a provider field label to its plain field name.
///
/// Certain request shapes label their value arrays per symbol, e.g.
/// `close.AAPL` or `volume.INFY.NS`. Only that suffix artifact is
/// stripped: everything after the first `.` goes, so the symbol's own
/// dots are harmless. Already-flat labels pass through unchanged, which
/// makes the flattening idempotent.
pub fn flatten_label(label: &str) -> &str {
    match label.split_once('.') {
        Some((field, _symbol)) => field,
        None => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_symbol_suffix() {
        assert_eq!(flatten_label("close.AAPL"), "close");
        assert_eq!(flatten_label("volume.INFY.NS"), "volume");
    }

    #[test]
    fn flat_labels_pass_through() {
        assert_eq!(flatten_label("close"), "close");
        assert_eq!(flatten_label("open"), "open");
    }

    #[test]
    fn flattening_is_idempotent() {
        for label in ["close", "close.AAPL", "volume.TCS.NS"] {
            let once = flatten_label(label);
            assert_eq!(flatten_label(once), once);
        }
    }
}
