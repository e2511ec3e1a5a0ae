use chrono::NaiveDate;
use yew::prelude::*;

use common::converters::format_price;
use common::CODE_NO_TRADING_DATA;

use crate::api_client::stocks::get_quote;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::hooks::FetchState;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub symbol: String,
    pub date: NaiveDate,
}

/// Exact-date lookup panel: four price metrics for the chosen day, or a
/// warning when the day has no trading data.
#[function_component(QuoteCard)]
pub fn quote_card(props: &Props) -> Html {
    let symbol = props.symbol.clone();
    let date = props.date;
    let (fetch_state, _refetch) = use_fetch_with_refetch(move || get_quote(symbol.clone(), date));

    html! {
        <div class="card bg-base-100 shadow mt-6">
            <div class="card-body">
                <h3 class="card-title text-lg">{format!("Prices on {}", props.date)}</h3>

                {match &*fetch_state {
                    FetchState::Loading => html! {
                        <div class="flex justify-center items-center py-8">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    },
                    FetchState::Error(error) if error.code == CODE_NO_TRADING_DATA => html! {
                        <div class="alert alert-warning">
                            <span>{&error.message}</span>
                        </div>
                    },
                    FetchState::Error(error) => html! {
                        <div class="alert alert-error">
                            <span>{&error.message}</span>
                        </div>
                    },
                    FetchState::Success(quote) => html! {
                        <>
                            <div class="stats shadow">
                                <div class="stat">
                                    <div class="stat-title">{"Open"}</div>
                                    <div class="stat-value text-lg">{format_price(quote.open)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">{"Close"}</div>
                                    <div class="stat-value text-lg">
                                        {quote.close.map(format_price).unwrap_or_else(|| "—".to_string())}
                                    </div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">{"High"}</div>
                                    <div class="stat-value text-lg">{format_price(quote.high)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">{"Low"}</div>
                                    <div class="stat-value text-lg">{format_price(quote.low)}</div>
                                </div>
                            </div>

                            // The full matching row, unrounded.
                            <table class="table table-zebra table-sm mt-4">
                                <thead>
                                    <tr>
                                        <th>{"Date"}</th>
                                        <th>{"Open"}</th>
                                        <th>{"High"}</th>
                                        <th>{"Low"}</th>
                                        <th>{"Close"}</th>
                                        <th>{"Volume"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <tr>
                                        <td>{quote.bar.date.to_string()}</td>
                                        <td>{quote.bar.open}</td>
                                        <td>{quote.bar.high}</td>
                                        <td>{quote.bar.low}</td>
                                        <td>{quote.bar.close.map(|c| c.to_string()).unwrap_or_else(|| "—".to_string())}</td>
                                        <td>{quote.bar.volume}</td>
                                    </tr>
                                </tbody>
                            </table>
                        </>
                    },
                    FetchState::NotStarted => html! { <></> },
                }}
            </div>
        </div>
    }
}
