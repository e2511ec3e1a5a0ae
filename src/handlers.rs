pub mod forecast;
pub mod health;
pub mod history;
pub mod tickers;
