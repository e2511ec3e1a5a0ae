pub mod components_chart;
pub mod forecast_chart;
pub mod forecast_table;
pub mod history_table;
pub mod plot;
pub mod price_chart;
pub mod quote_card;
pub mod stock_page;
