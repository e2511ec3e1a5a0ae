use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of instruments the application offers.
///
/// Membership in this list is the only validation a symbol gets; the two
/// NSE entries carry the provider's `.NS` suffix as part of the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ticker {
    #[serde(rename = "AAPL")]
    Aapl,
    #[serde(rename = "GOOG")]
    Goog,
    #[serde(rename = "MSFT")]
    Msft,
    #[serde(rename = "GME")]
    Gme,
    #[serde(rename = "TSLA")]
    Tsla,
    #[serde(rename = "AMZN")]
    Amzn,
    #[serde(rename = "INFY.NS")]
    InfyNs,
    #[serde(rename = "TCS.NS")]
    TcsNs,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown ticker symbol: {symbol}")]
pub struct UnknownTicker {
    pub symbol: String,
}

impl Ticker {
    /// All preset symbols, in selector order.
    pub const ALL: [Ticker; 8] = [
        Ticker::Aapl,
        Ticker::Goog,
        Ticker::Msft,
        Ticker::Gme,
        Ticker::Tsla,
        Ticker::Amzn,
        Ticker::InfyNs,
        Ticker::TcsNs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ticker::Aapl => "AAPL",
            Ticker::Goog => "GOOG",
            Ticker::Msft => "MSFT",
            Ticker::Gme => "GME",
            Ticker::Tsla => "TSLA",
            Ticker::Amzn => "AMZN",
            Ticker::InfyNs => "INFY.NS",
            Ticker::TcsNs => "TCS.NS",
        }
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ticker {
    type Err = UnknownTicker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownTicker {
                symbol: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_preset_symbol() {
        for ticker in Ticker::ALL {
            assert_eq!(ticker.as_str().parse::<Ticker>(), Ok(ticker));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("aapl".parse::<Ticker>(), Ok(Ticker::Aapl));
        assert_eq!("infy.ns".parse::<Ticker>(), Ok(Ticker::InfyNs));
    }

    #[test]
    fn rejects_symbols_outside_the_preset() {
        let err = "NVDA".parse::<Ticker>().unwrap_err();
        assert_eq!(err.symbol, "NVDA");
    }

    #[test]
    fn serializes_as_the_plain_symbol() {
        assert_eq!(
            serde_json::to_string(&Ticker::InfyNs).unwrap(),
            "\"INFY.NS\""
        );
    }
}
