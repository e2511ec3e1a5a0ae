use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api_client::stocks::get_tickers;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::components::components_chart::ComponentsChart;
use crate::components::forecast_chart::ForecastChart;
use crate::components::forecast_table::ForecastTailTable;
use crate::components::history_table::HistoryTable;
use crate::components::price_chart::PriceChart;
use crate::components::quote_card::QuoteCard;
use crate::hooks::FetchState;

const DEFAULT_SYMBOL: &str = "AAPL";

/// The single page of the application: symbol and horizon controls plus
/// the data, lookup and forecast panels. Panels remount (via `key`) when
/// the controls change.
#[function_component(StockPage)]
pub fn stock_page() -> Html {
    let symbol = use_state(|| DEFAULT_SYMBOL.to_string());
    let years = use_state(|| 1u8);
    let lookup_date = use_state(|| None::<NaiveDate>);

    let (tickers_state, _refetch) = use_fetch_with_refetch(get_tickers);

    let on_symbol_change = {
        let symbol = symbol.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            log::debug!("symbol selected: {}", select.value());
            symbol.set(select.value());
        })
    };

    let on_years_input = {
        let years = years.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(value) = input.value().parse::<u8>() {
                years.set(value);
            }
        })
    };

    let on_date_change = {
        let lookup_date = lookup_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            lookup_date.set(NaiveDate::parse_from_str(&input.value(), "%Y-%m-%d").ok());
        })
    };

    let symbol_options = match &*tickers_state {
        FetchState::Success(list) => list.symbols.clone(),
        _ => vec![DEFAULT_SYMBOL.to_string()],
    };

    html! {
        <div class="container mx-auto p-6 max-w-5xl">
            <h1 class="text-3xl font-bold mb-6">{"Stock Forecast App"}</h1>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex flex-wrap gap-6 items-end">
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Select dataset for prediction"}</span></label>
                            <select class="select select-bordered" onchange={on_symbol_change}>
                                { for symbol_options.iter().map(|s| html! {
                                    <option value={s.clone()} selected={*s == *symbol}>{s}</option>
                                }) }
                            </select>
                        </div>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">{format!("Years of prediction: {}", *years)}</span>
                            </label>
                            <input
                                type="range"
                                min="1"
                                max="6"
                                value={years.to_string()}
                                class="range"
                                oninput={on_years_input}
                            />
                        </div>

                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Look up a date"}</span></label>
                            <input
                                type="date"
                                class="input input-bordered"
                                min="2010-01-01"
                                max={chrono::Local::now().date_naive().to_string()}
                                onchange={on_date_change}
                            />
                        </div>
                    </div>
                </div>
            </div>

            <HistoryTable key={format!("hist-{}", *symbol)} symbol={(*symbol).clone()} />

            {
                if let Some(date) = *lookup_date {
                    html! {
                        <QuoteCard
                            key={format!("quote-{}-{}", *symbol, date)}
                            symbol={(*symbol).clone()}
                            date={date}
                        />
                    }
                } else {
                    html! { <></> }
                }
            }

            <PriceChart key={format!("price-{}", *symbol)} symbol={(*symbol).clone()} />

            <ForecastTailTable
                key={format!("ftail-{}-{}", *symbol, *years)}
                symbol={(*symbol).clone()}
                years={*years}
            />
            <ForecastChart
                key={format!("fchart-{}-{}", *symbol, *years)}
                symbol={(*symbol).clone()}
                years={*years}
            />
            <ComponentsChart
                key={format!("fcomp-{}-{}", *symbol, *years)}
                symbol={(*symbol).clone()}
                years={*years}
            />
        </div>
    }
}
