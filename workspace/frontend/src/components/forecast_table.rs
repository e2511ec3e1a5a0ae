use yew::prelude::*;

use common::converters::format_price;

use crate::api_client::stocks::get_forecast;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::hooks::FetchState;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub symbol: String,
    pub years: u8,
}

/// The last rows of the forecast table: predicted value and bounds.
#[function_component(ForecastTailTable)]
pub fn forecast_tail_table(props: &Props) -> Html {
    let symbol = props.symbol.clone();
    let years = props.years;
    let (fetch_state, _refetch) =
        use_fetch_with_refetch(move || get_forecast(symbol.clone(), years));

    html! {
        <div class="card bg-base-100 shadow mt-6">
            <div class="card-body">
                <h3 class="card-title text-lg">{"Forecast data"}</h3>

                {match &*fetch_state {
                    FetchState::Loading => html! {
                        <div class="flex justify-center items-center py-8">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    },
                    FetchState::Error(error) => html! {
                        <div class="alert alert-error">
                            <span>{&error.message}</span>
                        </div>
                    },
                    FetchState::Success(forecast) => html! {
                        <>
                            <p class="text-sm text-gray-500 mb-2">
                                {format!("Horizon: {} days", forecast.horizon_days)}
                            </p>
                            <table class="table table-zebra table-sm">
                                <thead>
                                    <tr>
                                        <th>{"Date"}</th>
                                        <th>{"Predicted"}</th>
                                        <th>{"Lower"}</th>
                                        <th>{"Upper"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for forecast.tail.iter().map(|p| html! {
                                        <tr>
                                            <td>{p.ds.to_string()}</td>
                                            <td>{format_price(p.yhat)}</td>
                                            <td>{format_price(p.yhat_lower)}</td>
                                            <td>{format_price(p.yhat_upper)}</td>
                                        </tr>
                                    }) }
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
